//! # shelf-blob: flat-namespace blob storage
//!
//! Streaming blob storage over a single flat directory. Blobs are addressed
//! by a validated name (no separators, no parent-directory tokens), created
//! with an atomic create-exclusive primitive, and ingested through a
//! size-capped, all-or-nothing pipeline: on any failure the target blob does
//! not exist afterwards, and on success it holds exactly the bytes that were
//! streamed in.
//!
//! ```no_run
//! use bytes::Bytes;
//! use shelf_blob::{BlobAdapter, BlobConfig, BlobName, FsStore};
//!
//! # async fn demo() -> shelf_blob::BlobResult<()> {
//! let adapter = BlobAdapter::new(FsStore::new("files"), BlobConfig::default());
//! let name = BlobName::parse("hello.txt")?;
//!
//! let body = futures_util::stream::once(async {
//!     Ok::<_, std::io::Error>(Bytes::from_static(b"hello"))
//! });
//! let receipt = adapter.put(&name, Some(5), Box::pin(body)).await?;
//! assert_eq!(receipt.size_bytes, 5);
//! # Ok(())
//! # }
//! ```

mod adapter;
mod config;
mod error;
pub mod mime;
mod name;
pub mod store;
mod types;

pub use adapter::BlobAdapter;
pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use name::BlobName;
pub use store::{BlobSink, BlobStore, FsStore};
pub use types::{ByteStream, OpenedBlob, PutReceipt};
