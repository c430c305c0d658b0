//! Hashing from readers and files

use std::io::{self, Read, Write};
use std::path::Path;

use tokio::io::AsyncReadExt;

use crate::config::ChecksumOptions;
use crate::{HashResult, Result, Sha256};

impl Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hash everything a reader yields until EOF
///
/// # Errors
///
/// Returns `HashError::InvalidParameters` for bad options and
/// `HashError::Io` if a read fails.
pub fn checksum_reader<R: Read>(mut reader: R, options: &ChecksumOptions) -> Result<HashResult> {
    options.validate()?;

    let mut hasher = Sha256::new();
    let mut block = vec![0u8; options.block_size];
    loop {
        let n = match reader.read(&mut block) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.append(&block[..n])?;
    }
    hasher.finalize()?;
    hasher.hash_result()
}

/// Hash a file asynchronously, reading `block_size` bytes at a time
///
/// # Errors
///
/// Returns `HashError::InvalidParameters` for bad options and
/// `HashError::Io` if the file cannot be opened or read.
pub async fn checksum_file(path: impl AsRef<Path>, options: &ChecksumOptions) -> Result<HashResult> {
    options.validate()?;
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), block_size = options.block_size, "Hashing file");

    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut block = vec![0u8; options.block_size];
    loop {
        let n = file.read(&mut block).await?;
        if n == 0 {
            break;
        }
        hasher.append(&block[..n])?;
    }
    hasher.finalize()?;

    tracing::debug!(path = %path.display(), bytes = hasher.len(), "File hashed");
    hasher.hash_result()
}
