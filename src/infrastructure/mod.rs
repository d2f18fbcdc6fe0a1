//! Blob storage backends implementing [`crate::domain::ports::BlobStorage`].

pub mod file;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
