use std::path::PathBuf;
use std::sync::Arc;

use shelf_blob::BlobAdapter;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub blobs: Arc<BlobAdapter>,
    pub public_root: PathBuf,
}
