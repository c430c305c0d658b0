//! Digest value with encoding support

use crate::HashError;

/// Length of a SHA-256 digest in bytes
pub const DIGEST_LEN: usize = 32;

/// A finished SHA-256 digest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashResult {
    bytes: [u8; DIGEST_LEN],
}

impl HashResult {
    /// Wrap raw digest bytes
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes of the digest
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// Copy the digest into a `Vec<u8>`
    #[must_use]
    pub fn to_vec(self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Lowercase hexadecimal, 64 characters, most significant nibble first
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Standard base64 with padding
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{Engine as _, engine::general_purpose};
        general_purpose::STANDARD.encode(self.bytes)
    }

    /// URL-safe base64
    #[must_use]
    pub fn to_base64url(&self) -> String {
        base64_url::encode(&self.bytes)
    }

    /// Always [`DIGEST_LEN`]
    #[must_use]
    pub const fn len(&self) -> usize {
        DIGEST_LEN
    }

    /// A digest is never empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl From<[u8; DIGEST_LEN]> for HashResult {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self::new(bytes)
    }
}

impl From<HashResult> for Vec<u8> {
    fn from(result: HashResult) -> Self {
        result.to_vec()
    }
}

impl From<HashResult> for [u8; DIGEST_LEN] {
    fn from(result: HashResult) -> Self {
        result.bytes
    }
}

impl AsRef<[u8]> for HashResult {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::str::FromStr for HashResult {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| HashError::invalid_parameters(format!("bad SHA-256 hex digest: {e}")))?;
        Ok(Self { bytes })
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
