use bytes::Bytes;
use futures_core::Stream;
use std::pin::Pin;

/// Stream of bytes for blob content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Result of opening a blob for reading.
///
/// Dropping the stream releases the underlying read handle, so a caller that
/// disconnects mid-transfer leaks nothing.
pub struct OpenedBlob {
    pub stream: ByteStream,
    pub size_bytes: u64,
    /// Inferred from the name's extension at open time, never stored.
    pub content_type: &'static str,
}

impl std::fmt::Debug for OpenedBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedBlob")
            .field("size_bytes", &self.size_bytes)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Receipt returned after a successful put
#[derive(Debug, Clone)]
pub struct PutReceipt {
    pub size_bytes: u64,
}
