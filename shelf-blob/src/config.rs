/// Configuration for blob ingestion
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Hard ceiling on a single blob's size (bytes). Enforced against both
    /// the untrusted declared length and the bytes actually observed.
    pub max_blob_bytes: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            max_blob_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl BlobConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upload size ceiling
    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }
}
