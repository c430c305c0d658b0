//! Checksum options for reader and file hashing

use serde::{Deserialize, Serialize};

use crate::{HashError, Result};

/// Default read size: 64 KiB
pub const DEFAULT_BLOCK_SIZE: usize = 65_536;

/// Options controlling how readers and files are consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumOptions {
    /// Bytes requested per read
    pub block_size: usize,
}

impl Default for ChecksumOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl ChecksumOptions {
    /// Options with a custom read size
    #[must_use]
    pub fn with_block_size(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Check that the options are usable
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidParameters`] for a zero block size.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(HashError::invalid_parameters(
                "block_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_size() {
        assert_eq!(ChecksumOptions::default().block_size, 65_536);
        assert!(ChecksumOptions::default().validate().is_ok());
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let opts = ChecksumOptions::with_block_size(0);
        assert!(matches!(
            opts.validate(),
            Err(HashError::InvalidParameters(_))
        ));
    }
}
