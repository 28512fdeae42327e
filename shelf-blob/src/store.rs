use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::{mime, BlobError, BlobName, BlobResult, OpenedBlob};

/// Core storage operations over a flat namespace - must be implemented by all
/// storage backends.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Open a blob for reading. `NotFound` iff the entry does not exist; any
    /// other failure is `Io`.
    async fn open(&self, name: &BlobName) -> BlobResult<OpenedBlob>;

    /// Atomically create a blob that must not already exist.
    ///
    /// Creation and the existence check are a single storage operation, never
    /// a check-then-create sequence; two concurrent creators of the same name
    /// race on the primitive itself and exactly one wins. `AlreadyExists` iff
    /// an entry with that name is present.
    async fn create_exclusive(&self, name: &BlobName) -> BlobResult<Box<dyn BlobSink>>;

    /// Delete a blob. `NotFound` iff the entry is absent at call time.
    async fn delete(&self, name: &BlobName) -> BlobResult<()>;
}

/// Write side of one upload session.
///
/// The target blob does not count as existing for readers until `finalize`
/// has returned. Every session must end in exactly one of `finalize` or
/// `discard`.
#[async_trait]
pub trait BlobSink: Send {
    /// Append a chunk to the blob being written
    async fn write_chunk(&mut self, chunk: Bytes) -> BlobResult<()>;

    /// Flush, sync and close the blob.
    ///
    /// A zero-length session still goes through the full sync-and-close, so
    /// "data handed off" is never mistaken for "file exists". On failure the
    /// partial file is unlinked (best effort) before the error is returned.
    async fn finalize(self: Box<Self>) -> BlobResult<()>;

    /// Abort the session: close the handle and unlink the partial target.
    /// Unlink failures are logged and swallowed.
    async fn discard(self: Box<Self>);
}

/// Filesystem-backed blob store rooted at a single flat directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, name: &BlobName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

#[async_trait]
impl BlobStore for FsStore {
    async fn open(&self, name: &BlobName) -> BlobResult<OpenedBlob> {
        let path = self.blob_path(name);
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(BlobError::not_found(name.as_str()));
            }
            Err(err) => return Err(err.into()),
        };
        let size_bytes = file.metadata().await?.len();

        Ok(OpenedBlob {
            stream: Box::pin(ReaderStream::new(file)),
            size_bytes,
            content_type: mime::content_type_for(name.as_str()),
        })
    }

    async fn create_exclusive(&self, name: &BlobName) -> BlobResult<Box<dyn BlobSink>> {
        let path = self.blob_path(name);
        let file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(BlobError::already_exists(name.as_str()));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Box::new(FsSink { file, path }))
    }

    async fn delete(&self, name: &BlobName) -> BlobResult<()> {
        match fs::remove_file(self.blob_path(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(BlobError::not_found(name.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

struct FsSink {
    file: fs::File,
    path: PathBuf,
}

impl FsSink {
    /// Best-effort removal of a partial target. A leftover file here is a
    /// latent condition the store tolerates being retried over, never
    /// something that changes the session's outcome.
    async fn unlink_partial(path: &Path) {
        if let Err(err) = fs::remove_file(path).await {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %err, "failed to remove partial blob");
            }
        }
    }
}

#[async_trait]
impl BlobSink for FsSink {
    async fn write_chunk(&mut self, chunk: Bytes) -> BlobResult<()> {
        self.file.write_all(&chunk).await?;
        Ok(())
    }

    async fn finalize(self: Box<Self>) -> BlobResult<()> {
        let FsSink { mut file, path } = *self;

        let result = async {
            file.flush().await?;
            file.sync_all().await
        }
        .await;
        drop(file);

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                Self::unlink_partial(&path).await;
                Err(err.into())
            }
        }
    }

    async fn discard(self: Box<Self>) {
        let FsSink { file, path } = *self;
        drop(file);
        Self::unlink_partial(&path).await;
    }
}
