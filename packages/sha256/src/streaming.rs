//! Incremental hashing of chunk streams
//!
//! Each chunk is folded into the hasher as it arrives; nothing is collected.

use crate::{HashError, HashResult, Result, Sha256};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream adapter that hashes every chunk of its input
    pub struct StreamingHasher<S> {
        #[pin]
        input: S,
        hasher: Sha256,
        finished: bool,
    }
}

impl<S> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    /// Wrap a stream of byte chunks
    pub fn new(input: S) -> Self {
        Self {
            input,
            hasher: Sha256::new(),
            finished: false,
        }
    }

    /// Total number of bytes hashed so far
    pub fn total_bytes(&self) -> u64 {
        self.hasher.len()
    }
}

/// Result of hashing a whole stream
#[derive(Debug, Clone)]
pub struct StreamHashResult {
    /// Digest of the concatenated chunks
    pub digest: HashResult,
    /// Total bytes processed
    pub total_bytes: u64,
}

/// Progress item produced by [`StreamingHasher`]
#[derive(Debug, Clone)]
pub struct StreamHashChunk {
    /// Bytes in the chunk just processed
    pub bytes_processed: u64,
    /// Total bytes processed so far
    pub total_bytes: u64,
    /// Whether this item carries the digest
    pub is_final: bool,
    /// Final digest (only present if `is_final` = true)
    pub digest: Option<HashResult>,
}

impl<S> Stream for StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    type Item = Result<StreamHashChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.input.as_mut().poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                if let Err(e) = this.hasher.append(&chunk) {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }

                Poll::Ready(Some(Ok(StreamHashChunk {
                    bytes_processed: chunk.len() as u64,
                    total_bytes: this.hasher.len(),
                    is_final: false,
                    digest: None,
                })))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                let digest = this
                    .hasher
                    .finalize()
                    .and_then(|()| this.hasher.hash_result());

                Poll::Ready(Some(digest.map(|digest| StreamHashChunk {
                    bytes_processed: 0,
                    total_bytes: this.hasher.len(),
                    is_final: true,
                    digest: Some(digest),
                })))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a streaming SHA-256 hasher from any stream of byte chunks
pub fn stream_sha256<S>(input: S) -> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    StreamingHasher::new(input)
}

/// Drive a streaming hasher to completion
///
/// # Errors
///
/// Returns `HashError::StreamProcessing` if the stream ends without a
/// final digest, or any error raised while hashing a chunk.
pub async fn collect_hash<S>(mut hasher: StreamingHasher<S>) -> Result<StreamHashResult>
where
    S: Stream<Item = Vec<u8>> + Unpin,
{
    use futures::StreamExt;

    while let Some(chunk) = hasher.next().await {
        let chunk = chunk?;
        if chunk.is_final {
            if let Some(digest) = chunk.digest {
                return Ok(StreamHashResult {
                    digest,
                    total_bytes: chunk.total_bytes,
                });
            }
        }
    }

    Err(HashError::StreamProcessing(
        "stream ended without producing final digest".to_string(),
    ))
}
