use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use shelf_blob::BlobError;

/// HTTP mapping for blob errors.
///
/// Classification happens exactly once, here. The pipelines report their
/// terminal outcome as a [`BlobError`] and nothing downstream re-classifies
/// it.
#[derive(Debug)]
pub struct ApiError(pub BlobError);

impl From<BlobError> for ApiError {
    fn from(err: BlobError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            BlobError::InvalidName { .. } => {
                (StatusCode::BAD_REQUEST, "Nested paths are not allowed").into_response()
            }
            BlobError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found").into_response(),
            BlobError::AlreadyExists { .. } => {
                (StatusCode::CONFLICT, "File exists").into_response()
            }
            // Tell the peer to drop the connection: a client still pushing
            // body data would otherwise keep the upload going against a
            // response it never reads.
            BlobError::TooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                [(header::CONNECTION, "close")],
                "File is too big!",
            )
                .into_response(),
            BlobError::Io { source } => {
                tracing::error!(%source, "blob operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
