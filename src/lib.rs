//! # huffman_coding
//!
//! Huffman compression over a 7-bit (ASCII) alphabet.
//!
//! The code tree is derived from the symbol probabilities of the input with a
//! deterministic two-queue merge, so the same frequency list always yields the
//! same tree. The decoder needs that tree (or the frequency list to rebuild it);
//! [`HuffmanCodec::encode_from_file`] bundles both into one archive.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_coding::HuffmanCodec;
//!
//! let text = b"aaaaaabccd";
//! let codec = HuffmanCodec::from_bytes(text)?;
//!
//! let encoded = codec.encode(text)?;
//! assert_eq!(codec.decode(&encoded)?, text.to_vec());
//! # Ok::<(), huffman_coding::HuffmanError>(())
//! ```
//!
//! ## Encoded layout
//!
//! Bits are packed most-significant first. The payload is preceded by `k - 1`
//! zero bits and a single one bit, where `k = 8 - (payload_bits % 8)`, so the
//! buffer is always byte aligned and never empty.

pub mod bit_vec;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;

mod compressed_data;

pub use compressed_data::CompressedData;
pub use config::{CodecConfig, TrailingBitsPolicy};
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyEntry, SortedFrequencyList, Symbol, ALPHABET_SIZE};
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{EncodingTable, HuffNode, HuffmanTree};
