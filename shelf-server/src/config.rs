use std::env;
use std::path::PathBuf;

/// Server configuration. Explicit values passed into the router at build
/// time, not ambient globals; tests inject temporary roots and small
/// ceilings through the builders.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the index document
    pub public_root: PathBuf,
    /// Directory holding the blobs
    pub files_root: PathBuf,
    /// Upload size ceiling in bytes
    pub max_blob_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_root: PathBuf::from("public"),
            files_root: PathBuf::from("files"),
            max_blob_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("SHELF_HOST").unwrap_or(defaults.host),
            port: env::var("SHELF_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            public_root: env::var("SHELF_PUBLIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_root),
            files_root: env::var("SHELF_FILES_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.files_root),
            max_blob_bytes: env::var("SHELF_MAX_BLOB_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_blob_bytes),
        }
    }

    /// Set the blob storage root
    pub fn with_files_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.files_root = root.into();
        self
    }

    /// Set the static document root
    pub fn with_public_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.public_root = root.into();
        self
    }

    /// Set the upload size ceiling
    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }
}
