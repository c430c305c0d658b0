//! Error handling for the SHA-256 hasher

use thiserror::Error;

/// Lifecycle phase of a [`Sha256`](crate::Sha256) instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting input; entered on construction and on `reset`
    Accepting,
    /// Digest computed; only `digest` and `reset` are valid
    Finalized,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepting => f.write_str("accepting"),
            Self::Finalized => f.write_str("finalized"),
        }
    }
}

/// Hashing errors
#[derive(Debug, Error)]
pub enum HashError {
    /// An operation was called in a phase that does not permit it
    #[error("Invalid state: `{operation}` is not allowed while the hasher is {phase}")]
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// Phase the hasher was in
        phase: Phase,
    },

    /// Total input would exceed what the 64-bit length field can encode
    #[error("Message too long: at most {limit} bytes can be hashed")]
    MessageTooLong {
        /// Maximum cumulative input length in bytes
        limit: u64,
    },

    /// Rejected configuration or malformed input text
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Stream adapter failure
    #[error("Stream processing error: {0}")]
    StreamProcessing(String),

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HashError {
    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Whether this is a lifecycle precondition violation
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
