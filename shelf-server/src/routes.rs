use std::io::ErrorKind;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::TryStreamExt;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;

use shelf_blob::{BlobAdapter, BlobConfig, BlobError, BlobName, FsStore};

use crate::{ApiError, AppState, ServerConfig};

/// Build the application router for the given configuration.
pub fn build(config: ServerConfig) -> Router {
    let store = FsStore::new(config.files_root);
    let blob_config = BlobConfig::new().with_max_blob_bytes(config.max_blob_bytes);

    let state = AppState {
        blobs: Arc::new(BlobAdapter::new(store, blob_config)),
        public_root: config.public_root,
    };

    // Wildcard capture: a literal nested path reaches the validator (400)
    // instead of falling through to a routing 404. axum percent-decodes the
    // capture, so validation sees the decoded name.
    Router::new()
        .route("/", get(index).post(missing_name).delete(missing_name))
        .route(
            "/{*name}",
            get(get_blob).post(post_blob).delete(delete_blob),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - the fixed index document
async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = state.public_root.join("index.html");
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(BlobError::not_found("index.html").into());
        }
        Err(err) => return Err(BlobError::from(err).into()),
    };

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

/// POST / and DELETE / - an empty name cannot be created or deleted
async fn missing_name() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "File not found")
}

async fn get_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let name = BlobName::parse(name)?;
    let blob = state.blobs.open(&name).await?;

    Ok((
        [
            (header::CONTENT_TYPE, blob.content_type.to_string()),
            (header::CONTENT_LENGTH, blob.size_bytes.to_string()),
        ],
        Body::from_stream(blob.stream),
    )
        .into_response())
}

async fn post_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Body,
) -> Result<&'static str, ApiError> {
    let name = BlobName::parse(name)?;

    // Untrusted hint; the adapter enforces the ceiling against observed
    // bytes regardless.
    let declared_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let stream = body.into_data_stream().map_err(std::io::Error::other);

    state
        .blobs
        .put(&name, declared_len, Box::pin(stream))
        .await?;

    Ok("OK")
}

async fn delete_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<&'static str, ApiError> {
    let name = BlobName::parse(name)?;
    state.blobs.delete(&name).await?;
    Ok("Ok")
}
