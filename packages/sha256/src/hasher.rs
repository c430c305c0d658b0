//! Incremental SHA-256 state machine
//!
//! Input of any size is buffered into 64-byte blocks across calls. Complete
//! blocks are compressed as soon as they are available, so memory use is
//! constant regardless of message length.

use std::ffi::CStr;

use crate::compress::{BLOCK_LEN, INITIAL_STATE, compress};
use crate::error::Phase;
use crate::hash_result::{DIGEST_LEN, HashResult};
use crate::{HashError, Result};

/// Largest cumulative input, in bytes, whose bit length fits the 64-bit
/// length field appended during padding.
pub const MAX_MESSAGE_LEN: u64 = u64::MAX >> 3;

// Offset of the 64-bit length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// Streaming SHA-256 hasher
///
/// ```
/// use cryypt_sha256::Sha256;
///
/// # fn main() -> cryypt_sha256::Result<()> {
/// let mut hasher = Sha256::new();
/// hasher.append(b"The quick brown fox ")?;
/// hasher.append_str("jumps over the lazy dog")?;
/// hasher.finalize()?;
/// assert_eq!(
///     hasher.hex_string()?,
///     "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"
/// );
/// # Ok(())
/// # }
/// ```
///
/// Cloning an accepting hasher forks the stream: both copies share the
/// prefix hashed so far and continue independently.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_LEN],
    length: u64,
    phase: Phase,
    digest: [u8; DIGEST_LEN],
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256")
            .field("phase", &self.phase)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Sha256 {
    /// Create a hasher ready to accept input
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            buffer: [0; BLOCK_LEN],
            length: 0,
            phase: Phase::Accepting,
            digest: [0; DIGEST_LEN],
        }
    }

    /// Discard all input and any computed digest
    ///
    /// Afterwards the instance behaves exactly like one returned by
    /// [`Sha256::new`].
    pub fn reset(&mut self) {
        tracing::debug!(discarded_bytes = self.length, phase = %self.phase, "SHA-256 reset");
        *self = Self::new();
    }

    /// Append bytes to the message
    ///
    /// Zero-length input is accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidState`] once the hasher is finalized and
    /// [`HashError::MessageTooLong`] if the total would exceed
    /// [`MAX_MESSAGE_LEN`]. The hasher is left untouched in both cases.
    pub fn append(&mut self, data: &[u8]) -> Result<()> {
        self.require(Phase::Accepting, "append")?;

        let total = u64::try_from(data.len())
            .ok()
            .and_then(|n| self.length.checked_add(n))
            .filter(|&n| n <= MAX_MESSAGE_LEN)
            .ok_or(HashError::MessageTooLong {
                limit: MAX_MESSAGE_LEN,
            })?;

        let mut input = data;
        let fill = self.buffered();

        if fill > 0 {
            let take = (BLOCK_LEN - fill).min(input.len());
            self.buffer[fill..fill + take].copy_from_slice(&input[..take]);
            input = &input[take..];

            if fill + take < BLOCK_LEN {
                self.length = total;
                return Ok(());
            }
            compress(&mut self.state, &self.buffer);
        }

        // Whole blocks go straight from the caller's slice
        let mut blocks = input.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.length = total;
        Ok(())
    }

    /// Append a single byte
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::append`].
    pub fn append_byte(&mut self, byte: u8) -> Result<()> {
        self.append(&[byte])
    }

    /// Append a UTF-8 string
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::append`].
    pub fn append_str(&mut self, s: &str) -> Result<()> {
        self.append(s.as_bytes())
    }

    /// Append a nul-terminated string; the terminator is not hashed
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::append`].
    pub fn append_cstr(&mut self, s: &CStr) -> Result<()> {
        self.append(s.to_bytes())
    }

    /// Apply the final padding and compute the digest
    ///
    /// Pads with a single `1` bit, zeros, and the 64-bit big-endian message
    /// length in bits. When fewer than eight bytes remain in the current
    /// block the padding spills into one extra block.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidState`] if already finalized.
    pub fn finalize(&mut self) -> Result<()> {
        self.require(Phase::Accepting, "finalize")?;

        let trailing = self.buffered();
        self.buffer[trailing] = 0x80;
        self.buffer[trailing + 1..].fill(0);

        let spills = trailing >= LENGTH_OFFSET;
        if spills {
            compress(&mut self.state, &self.buffer);
            self.buffer[..=trailing].fill(0);
        }

        let bit_len = self.length << 3;
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buffer);

        for (out, word) in self.digest.chunks_exact_mut(4).zip(self.state) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        self.phase = Phase::Finalized;

        let padding_blocks: u32 = if spills { 2 } else { 1 };
        tracing::trace!(bytes = self.length, padding_blocks, "SHA-256 finalized");
        Ok(())
    }

    /// The 32-byte digest, most significant byte first
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidState`] before [`Sha256::finalize`].
    pub fn digest(&self) -> Result<&[u8; DIGEST_LEN]> {
        self.require(Phase::Finalized, "digest")?;
        Ok(&self.digest)
    }

    /// Owned copy of the digest
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::digest`].
    pub fn hash_result(&self) -> Result<HashResult> {
        self.digest().map(|d| HashResult::new(*d))
    }

    /// Digest as 64 lowercase hex characters
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::digest`].
    pub fn hex_string(&self) -> Result<String> {
        self.hash_result().map(|d| d.to_hex())
    }

    /// Digest as raw binary, a verbatim copy of the 32 bytes
    ///
    /// # Errors
    ///
    /// Same as [`Sha256::digest`].
    pub fn bin_string(&self) -> Result<Vec<u8>> {
        self.digest().map(|d| d.to_vec())
    }

    /// Bytes appended since the last reset
    #[must_use]
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether nothing has been appended since the last reset
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether [`Sha256::finalize`] has run since the last reset
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    // Pending bytes in the block buffer
    #[inline]
    fn buffered(&self) -> usize {
        (self.length % BLOCK_LEN as u64) as usize
    }

    fn require(&self, expected: Phase, operation: &'static str) -> Result<()> {
        if self.phase == expected {
            return Ok(());
        }
        tracing::warn!(operation, phase = %self.phase, "SHA-256 operation rejected");
        Err(HashError::InvalidState {
            operation,
            phase: self.phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha2::Digest as _;

    fn hash_of(data: &[u8]) -> Result<[u8; 32]> {
        let mut h = Sha256::new();
        h.append(data)?;
        h.finalize()?;
        Ok(*h.digest()?)
    }

    fn reference(data: &[u8]) -> [u8; 32] {
        sha2::Sha256::digest(data).into()
    }

    #[test]
    fn test_empty_message() -> Result<()> {
        let mut h = Sha256::new();
        h.finalize()?;
        assert_eq!(
            h.digest()?,
            &hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        Ok(())
    }

    #[test]
    fn test_zero_length_appends_hash_as_empty() -> Result<()> {
        let mut h = Sha256::new();
        h.append(b"")?;
        h.append(&[])?;
        h.finalize()?;
        assert_eq!(
            h.hex_string()?,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        Ok(())
    }

    #[test]
    fn test_abc() -> Result<()> {
        assert_eq!(
            hash_of(b"abc")?,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        Ok(())
    }

    #[test]
    fn test_two_block_message() -> Result<()> {
        // 56 bytes: length field no longer fits in the first block
        assert_eq!(
            hash_of(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")?,
            hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
        );
        Ok(())
    }

    #[test]
    fn test_block_boundaries_match_reference() -> Result<()> {
        for len in [1usize, 3, 4, 5, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129] {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 + 7) as u8).collect();
            assert_eq!(hash_of(&data)?, reference(&data), "length {len}");
        }
        Ok(())
    }

    #[test]
    fn test_byte_at_a_time_matches_single_call() -> Result<()> {
        let data: Vec<u8> = (0..=255u8).cycle().take(300).collect();

        let mut h = Sha256::new();
        for &b in &data {
            h.append_byte(b)?;
        }
        h.finalize()?;

        assert_eq!(h.digest()?, &hash_of(&data)?);
        Ok(())
    }

    #[test]
    fn test_length_tracks_appends() -> Result<()> {
        let mut h = Sha256::new();
        assert!(h.is_empty());
        h.append(&[0u8; 70])?;
        h.append(&[0u8; 3])?;
        assert_eq!(h.len(), 73);
        assert_eq!(h.buffered(), 9);
        Ok(())
    }

    #[test]
    fn test_cstr_excludes_terminator() -> Result<()> {
        let mut h = Sha256::new();
        h.append_cstr(c"abc")?;
        h.finalize()?;
        assert_eq!(h.digest()?, &hash_of(b"abc")?);
        Ok(())
    }

    #[test]
    fn test_reset_clears_buffer_and_digest() -> Result<()> {
        let mut h = Sha256::new();
        h.append(&[0xcc; 70])?;
        h.finalize()?;
        assert_ne!(h.digest, [0; DIGEST_LEN]);

        h.reset();
        let fresh = Sha256::new();
        assert_eq!(h.state, fresh.state);
        assert_eq!(h.buffer, fresh.buffer);
        assert_eq!(h.digest, fresh.digest);
        assert_eq!(h.length, 0);
        assert_eq!(h.phase, Phase::Accepting);
        Ok(())
    }

    #[test]
    fn test_reset_after_finalize_behaves_like_new() -> Result<()> {
        let mut h = Sha256::new();
        h.append(&[0xaa; 100])?;
        h.finalize()?;
        h.reset();

        assert_eq!(h.phase(), Phase::Accepting);
        assert!(h.is_empty());
        h.append(b"abc")?;
        h.finalize()?;
        assert_eq!(h.digest()?, &hash_of(b"abc")?);
        Ok(())
    }

    #[test]
    fn test_append_after_finalize_is_rejected() -> Result<()> {
        let mut h = Sha256::new();
        h.append(b"abc")?;
        h.finalize()?;
        let before = *h.digest()?;

        let err = h.append(b"more");
        assert!(matches!(
            err,
            Err(HashError::InvalidState {
                operation: "append",
                phase: Phase::Finalized
            })
        ));
        assert_eq!(h.digest()?, &before);
        assert_eq!(h.len(), 3);
        Ok(())
    }

    #[test]
    fn test_double_finalize_is_rejected() -> Result<()> {
        let mut h = Sha256::new();
        h.finalize()?;
        assert!(matches!(h.finalize(), Err(e) if e.is_invalid_state()));
        Ok(())
    }

    #[test]
    fn test_digest_before_finalize_is_rejected() {
        let h = Sha256::new();
        assert!(matches!(
            h.digest(),
            Err(HashError::InvalidState {
                operation: "digest",
                phase: Phase::Accepting
            })
        ));
        assert!(h.hex_string().is_err());
        assert!(h.bin_string().is_err());
    }

    #[test]
    fn test_length_limit_is_enforced_without_mutation() -> Result<()> {
        let mut h = Sha256::new();
        h.append(b"xy")?;
        h.length = MAX_MESSAGE_LEN - 1;

        assert!(matches!(
            h.append(b"ab"),
            Err(HashError::MessageTooLong { .. })
        ));
        assert_eq!(h.len(), MAX_MESSAGE_LEN - 1);
        h.append(b"a")?;
        assert_eq!(h.len(), MAX_MESSAGE_LEN);
        Ok(())
    }

    #[test]
    fn test_fork_mid_stream() -> Result<()> {
        let mut a = Sha256::new();
        a.append(b"First part")?;
        let mut ab = a.clone();

        a.finalize()?;
        ab.append(b"Second part")?;
        ab.finalize()?;

        assert_eq!(a.digest()?, &reference(b"First part"));
        assert_eq!(ab.digest()?, &reference(b"First partSecond part"));
        Ok(())
    }

    #[test]
    fn test_debug_hides_buffer() -> Result<()> {
        let mut h = Sha256::new();
        h.append(b"secret")?;
        let shown = format!("{h:?}");
        assert!(shown.contains("length: 6"));
        assert!(!shown.contains("buffer"));
        Ok(())
    }
}
