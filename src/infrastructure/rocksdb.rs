use crate::domain::ports::BlobStorage;
use crate::error::{LoanError, Result};
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the persisted blobs.
pub const CF_BLOBS: &str = "blobs";

/// A persistent blob store backed by RocksDB.
///
/// Each blob is a single value in the `blobs` column family, keyed by its
/// UTF-8 storage key.
#[derive(Clone)]
pub struct RocksDBBlobStorage {
    db: Arc<DB>,
}

impl RocksDBBlobStorage {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures the `blobs` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_blobs = ColumnFamilyDescriptor::new(CF_BLOBS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_blobs]).map_err(rocksdb_error)?;

        Ok(Self { db: Arc::new(db) })
    }
}

fn rocksdb_error(e: rocksdb::Error) -> LoanError {
    LoanError::PersistenceError(format!("RocksDB error: {e}"))
}

impl BlobStorage for RocksDBBlobStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.db.cf_handle(CF_BLOBS).ok_or_else(|| {
            LoanError::PersistenceError("Blobs column family not found".to_string())
        })?;

        self.db.get_cf(&cf, key.as_bytes()).map_err(rocksdb_error)
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let cf = self.db.cf_handle(CF_BLOBS).ok_or_else(|| {
            LoanError::PersistenceError("Blobs column family not found".to_string())
        })?;

        self.db
            .put_cf(&cf, key.as_bytes(), value)
            .map_err(rocksdb_error)
    }
}
