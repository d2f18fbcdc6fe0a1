use crate::domain::ports::BlobStorage;
use crate::error::Result;
use std::collections::HashMap;

/// Keeps blobs in a `HashMap`. Nothing survives the process; used by tests
/// and by embedders that persist elsewhere.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlobStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl InMemoryBlobStorage {
    /// Creates a new, empty in-memory blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob, e.g. to simulate data left behind by an earlier run.
    pub fn with_blob(mut self, key: &str, value: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(key.to_string(), value.into());
        self
    }
}

impl BlobStorage for InMemoryBlobStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
