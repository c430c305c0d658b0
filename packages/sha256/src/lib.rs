//! Streaming SHA-256 (FIPS 180-4)
//!
//! [`Sha256`] accepts a message in chunks of any size, including single
//! bytes and nul-terminated strings, and produces the 32-byte digest once
//! [`Sha256::finalize`] is called. Wrappers cover readers, files, async
//! streams and one-shot buffers.
//!
//! ```
//! # fn main() -> cryypt_sha256::Result<()> {
//! assert_eq!(
//!     cryypt_sha256::sha256(b"abc")?.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod api;
mod compress;
pub mod config;
pub mod error;
pub mod hash_result;
pub mod hasher;
pub mod io;
pub mod streaming;

pub use api::Sha256Builder;
pub use config::ChecksumOptions;
pub use error::{HashError, Phase, Result};
pub use hash_result::{DIGEST_LEN, HashResult};
pub use hasher::{MAX_MESSAGE_LEN, Sha256};
pub use io::{checksum_file, checksum_reader};
pub use streaming::{
    StreamHashChunk, StreamHashResult, StreamingHasher, collect_hash, stream_sha256,
};

/// Hash a complete buffer in one call
///
/// # Errors
///
/// Returns [`HashError::MessageTooLong`] if `data` exceeds [`MAX_MESSAGE_LEN`].
pub fn sha256(data: &[u8]) -> Result<HashResult> {
    let mut hasher = Sha256::new();
    hasher.append(data)?;
    hasher.finalize()?;
    hasher.hash_result()
}
