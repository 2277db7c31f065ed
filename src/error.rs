//! Error handling for the huffman_coding crate

use thiserror::Error;

/// Errors produced while building a code or encoding/decoding a stream
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A textual bit string contained something other than '0' or '1'
    #[error("invalid bit character {character:?} at position {position}")]
    InvalidBitCharacter {
        /// The offending character
        character: char,
        /// Index of the character in the bit string
        position: usize,
    },

    /// An input byte is outside the 7-bit alphabet
    #[error("symbol {value} at position {position} is outside the 7-bit alphabet")]
    SymbolOutOfRange {
        /// The offending byte
        value: u8,
        /// Index of the byte in the input
        position: usize,
    },

    /// The symbol was never observed when the code was built
    #[error("symbol {symbol} has no code in the encoding table")]
    UnknownSymbol {
        /// The symbol without a code
        symbol: u8,
    },

    /// The tree builder needs at least two entries
    #[error("cannot build a tree from {count} frequency entries")]
    InsufficientSymbols {
        /// Number of entries that were supplied
        count: usize,
    },

    /// A payload was supplied to a codec trained on empty input
    #[error("no code tree available to decode a non-empty payload")]
    MissingTree,

    /// Decoding ended in the middle of a code word
    #[error("{bits} trailing bits do not complete a code word")]
    TrailingBits {
        /// Number of dangling bits
        bits: usize,
    },

    /// Malformed persisted frequency table or archive
    #[error("invalid data: {message}")]
    InvalidData {
        /// What was wrong
        message: String,
    },

    /// Decoded output length disagrees with the recorded original length
    #[error("length mismatch: expected {expected} symbols, decoded {actual}")]
    LengthMismatch {
        /// Length recorded at encode time
        expected: usize,
        /// Length actually decoded
        actual: usize,
    },

    /// Invalid codec configuration
    #[error("invalid configuration: {message}")]
    Configuration {
        /// What was wrong
        message: String,
    },
}

impl HuffmanError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for errors caused by corrupt or truncated encoded input
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::TrailingBits { .. } | Self::InvalidData { .. } | Self::LengthMismatch { .. }
        )
    }
}

/// Result type for huffman_coding operations
pub type Result<T> = std::result::Result<T, HuffmanError>;
