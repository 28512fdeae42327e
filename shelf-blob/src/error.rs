use thiserror::Error;

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur during blob operations.
///
/// Storage failures are classified once, at the point they cross into the
/// pipeline; everything not otherwise classified surfaces as [`BlobError::Io`].
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Invalid blob name: {name}")]
    InvalidName { name: String },

    #[error("Blob not found: {name}")]
    NotFound { name: String },

    #[error("Blob already exists: {name}")]
    AlreadyExists { name: String },

    #[error("Blob exceeds the {limit_bytes} byte limit")]
    TooLarge { limit_bytes: u64 },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BlobError {
    /// Create an invalid name error
    pub fn invalid_name<S: Into<String>>(name: S) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an already exists error
    pub fn already_exists<S: Into<String>>(name: S) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    /// Create a too large error for the given ceiling
    pub fn too_large(limit_bytes: u64) -> Self {
        Self::TooLarge { limit_bytes }
    }
}
