//! SHA-256 hash builder

use std::path::Path;

use futures::Stream;

use crate::config::ChecksumOptions;
use crate::streaming::{collect_hash, stream_sha256};
use crate::{HashResult, Result};

/// Entry point for one-call hashing of buffers, streams and files
#[derive(Debug, Clone, Default)]
pub struct Sha256Builder {
    options: ChecksumOptions,
}

impl Sha256Builder {
    /// Create new SHA-256 builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given options for file hashing
    #[must_use]
    pub fn with_options(options: ChecksumOptions) -> Self {
        Self { options }
    }

    /// Read size used by [`Sha256Builder::compute_file`]
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.options.block_size = block_size;
        self
    }

    /// Hash a complete buffer
    ///
    /// # Errors
    ///
    /// Returns `HashError::MessageTooLong` past `MAX_MESSAGE_LEN`.
    pub async fn compute<T: Into<Vec<u8>>>(self, data: T) -> Result<HashResult> {
        crate::sha256(&data.into())
    }

    /// Hash a stream of chunks as one message
    ///
    /// # Errors
    ///
    /// Returns `HashError::StreamProcessing` if the stream does not complete
    /// cleanly.
    pub async fn compute_stream<S>(self, stream: S) -> Result<HashResult>
    where
        S: Stream<Item = Vec<u8>> + Send + 'static,
    {
        let hasher = stream_sha256(Box::pin(stream));
        Ok(collect_hash(hasher).await?.digest)
    }

    /// Hash the contents of a file
    ///
    /// # Errors
    ///
    /// Returns `HashError::Io` if the file cannot be read and
    /// `HashError::InvalidParameters` for a zero block size.
    pub async fn compute_file(self, path: impl AsRef<Path>) -> Result<HashResult> {
        crate::io::checksum_file(path, &self.options).await
    }
}
