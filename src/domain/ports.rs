use crate::error::Result;

/// Flat key-value storage for opaque byte blobs.
pub trait BlobStorage {
    /// Returns `None` when nothing was ever written under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

pub type BlobStorageBox = Box<dyn BlobStorage>;

impl<S: BlobStorage + ?Sized> BlobStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }
}
