//! Error handling for the huffzip library
//!
//! Decoding is fail-fast: the first inconsistency found in a container
//! aborts the whole operation with one of the error kinds below. Encoding
//! has no error paths of its own beyond resource exhaustion, with one
//! exception: encoding against an explicitly supplied codebook that does
//! not cover the input alphabet.

use thiserror::Error;

/// Main error type for the huffzip library
#[derive(Error, Debug)]
pub enum HuffzipError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container header is unrecognized, truncated, or self-inconsistent
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Error message describing the issue
        message: String,
    },

    /// Padding-bit count outside the valid 0..=7 range
    #[error("Padding out of range: {bits} bits (valid range is 0..=7)")]
    PaddingOutOfRange {
        /// The invalid padding-bit count
        bits: u8,
    },

    /// Serialized code tree is truncated or does not describe a valid code
    #[error("Tree deserialization failed: {message}")]
    TreeDeserialization {
        /// Error message describing the issue
        message: String,
    },

    /// Packed payload ends before decoding completes
    #[error("Unexpected end of stream: {message}")]
    UnexpectedEndOfStream {
        /// Error message describing the issue
        message: String,
    },

    /// A symbol in the input has no code in the supplied codebook
    #[error("Symbol 0x{symbol:02x} has no code in this codebook")]
    SymbolNotInCodebook {
        /// The uncovered symbol
        symbol: u8,
    },
}

impl HuffzipError {
    /// Create a malformed header error
    pub fn malformed_header<S: Into<String>>(message: S) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create a padding out of range error
    pub fn padding_out_of_range(bits: u8) -> Self {
        Self::PaddingOutOfRange { bits }
    }

    /// Create a tree deserialization error
    pub fn tree_deserialization<S: Into<String>>(message: S) -> Self {
        Self::TreeDeserialization {
            message: message.into(),
        }
    }

    /// Create an unexpected end of stream error
    pub fn unexpected_end_of_stream<S: Into<String>>(message: S) -> Self {
        Self::UnexpectedEndOfStream {
            message: message.into(),
        }
    }

    /// Create a symbol not in codebook error
    pub fn symbol_not_in_codebook(symbol: u8) -> Self {
        Self::SymbolNotInCodebook { symbol }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::MalformedHeader { .. } => false,
            Self::PaddingOutOfRange { .. } => false,
            Self::TreeDeserialization { .. } => false,
            Self::UnexpectedEndOfStream { .. } => false,
            Self::SymbolNotInCodebook { .. } => false,
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::MalformedHeader { .. } => "header",
            Self::PaddingOutOfRange { .. } => "padding",
            Self::TreeDeserialization { .. } => "tree",
            Self::UnexpectedEndOfStream { .. } => "stream",
            Self::SymbolNotInCodebook { .. } => "codebook",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HuffzipError>;
