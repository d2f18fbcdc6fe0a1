use crate::domain::decision::DecisionPolicy;
use crate::domain::ports::BlobStorageBox;
use crate::error::Result;
use crate::infrastructure::file::FileBlobStorage;
use crate::telemetry::TelemetryConfig;
use std::path::PathBuf;
use tracing::warn;

/// Directory used for file storage when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".loan-origination";

/// Top-level configuration for the command-line front end.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub policy: DecisionPolicy,
    pub telemetry: TelemetryConfig,
}

/// Where the application blob lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// One JSON file per key inside a directory.
    File(PathBuf),
    /// A RocksDB database (requires the `storage-rocksdb` feature).
    RocksDb(PathBuf),
}

impl StorageConfig {
    /// Picks RocksDB when a database path is given and the feature is
    /// compiled in; otherwise file storage in `data_dir`.
    pub fn resolve(data_dir: PathBuf, db_path: Option<PathBuf>) -> Self {
        match db_path {
            Some(path) if cfg!(feature = "storage-rocksdb") => Self::RocksDb(path),
            Some(path) => {
                warn!(
                    db_path = %path.display(),
                    "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to file storage"
                );
                Self::File(data_dir)
            }
            None => Self::File(data_dir),
        }
    }

    pub fn open(&self) -> Result<BlobStorageBox> {
        match self {
            Self::File(dir) => Ok(Box::new(FileBlobStorage::open(dir)?)),
            #[cfg(feature = "storage-rocksdb")]
            Self::RocksDb(path) => Ok(Box::new(
                crate::infrastructure::rocksdb::RocksDBBlobStorage::open(path)?,
            )),
            #[cfg(not(feature = "storage-rocksdb"))]
            Self::RocksDb(_) => Err(crate::error::LoanError::ConfigError(
                "RocksDB storage requires the 'storage-rocksdb' feature".to_string(),
            )),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATA_DIR))
    }
}
