use futures_util::StreamExt;
use std::sync::Arc;

use crate::{
    BlobConfig, BlobError, BlobName, BlobResult, BlobStore, ByteStream, OpenedBlob, PutReceipt,
};

/// Pipelines over a [`BlobStore`]: size-capped all-or-nothing ingestion,
/// streaming retrieval and deletion. This is infrastructure a service embeds,
/// not a service itself.
pub struct BlobAdapter {
    store: Arc<dyn BlobStore>,
    config: BlobConfig,
}

impl BlobAdapter {
    /// Create a new blob adapter
    pub fn new<S: BlobStore + 'static>(store: S, config: BlobConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Stream a request body into a new blob.
    ///
    /// On success the blob holds exactly the bytes consumed from `body`,
    /// including the zero-length case. On any error the blob does not exist
    /// afterwards: partial writes are rolled back before the error is
    /// returned.
    ///
    /// `declared_len` is an untrusted hint. When present and over the ceiling
    /// it rejects the upload before a sink is opened, but the ceiling is
    /// enforced against observed bytes either way, so an absent or understated
    /// hint cannot smuggle an oversized body through.
    pub async fn put(
        &self,
        name: &BlobName,
        declared_len: Option<u64>,
        mut body: ByteStream,
    ) -> BlobResult<PutReceipt> {
        let limit = self.config.max_blob_bytes;

        if declared_len.is_some_and(|len| len > limit) {
            return Err(BlobError::too_large(limit));
        }

        // Existence is decided here, atomically: a conflict surfaces before
        // any of the body is consumed.
        let mut sink = self.store.create_exclusive(name).await?;
        let mut received: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                // Body cut short: client disconnect or transport failure.
                // The response is already lost; only cleanup matters.
                Err(err) => {
                    sink.discard().await;
                    return Err(err.into());
                }
            };

            received += chunk.len() as u64;
            if received > limit {
                sink.discard().await;
                return Err(BlobError::too_large(limit));
            }

            if let Err(err) = sink.write_chunk(chunk).await {
                sink.discard().await;
                return Err(err);
            }
        }

        // Only a finalized sink counts as an existing blob; for a zero-length
        // body this is the first moment the file is guaranteed durable.
        sink.finalize().await?;

        Ok(PutReceipt {
            size_bytes: received,
        })
    }

    /// Open a blob for streaming reads
    pub async fn open(&self, name: &BlobName) -> BlobResult<OpenedBlob> {
        self.store.open(name).await
    }

    /// Delete a blob
    pub async fn delete(&self, name: &BlobName) -> BlobResult<()> {
        self.store.delete(name).await
    }

    /// Get configuration
    pub fn config(&self) -> &BlobConfig {
        &self.config
    }
}
