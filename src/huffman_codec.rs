use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::bit_vec::{self, BitVec};
use crate::compressed_data::CompressedData;
use crate::config::{CodecConfig, TrailingBitsPolicy};
use crate::error::{HuffmanError, Result};
use crate::frequency::{SortedFrequencyList, ALPHABET_SIZE};
use crate::hufftree::{EncodingTable, HuffmanTree};

/// One encode/decode session: the frequency model, the tree built from it and
/// the derived code table.
///
/// A codec trained on empty input has no tree. It still encodes the empty
/// stream and decodes an empty payload.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: SortedFrequencyList,
    tree: Option<HuffmanTree>,
    encode_table: EncodingTable,
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn from_frequencies(frequencies: SortedFrequencyList) -> Result<Self> {
        let tree = if frequencies.is_empty() {
            None
        } else {
            Some(HuffmanTree::build(&frequencies)?)
        };
        let encode_table = tree
            .as_ref()
            .map(HuffmanTree::generate_table)
            .unwrap_or_default();

        Ok(HuffmanCodec {
            frequencies,
            tree,
            encode_table,
            config: CodecConfig::default(),
        })
    }

    /// Train on `data`
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(SortedFrequencyList::build(data)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_frequencies(SortedFrequencyList::from_reader(reader)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn frequencies(&self) -> &SortedFrequencyList {
        &self.frequencies
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn encoding_table(&self) -> &EncodingTable {
        &self.encode_table
    }

    /// Concatenated code words for `data`, before padding
    pub fn encode_bits(&self, data: &[u8]) -> Result<BitVec> {
        let mut bits = BitVec::with_capacity(data.len() * self.encode_table.max_code_length());

        for (position, &value) in data.iter().enumerate() {
            if value as usize >= ALPHABET_SIZE {
                return Err(HuffmanError::SymbolOutOfRange { value, position });
            }
            let code = self
                .encode_table
                .get(value)
                .ok_or(HuffmanError::UnknownSymbol { symbol: value })?;
            bits.push_code(code);
        }

        Ok(bits)
    }

    /// Encode `data` into the padded byte format
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let bits = self.encode_bits(data)?;
        let encoded = bit_vec::pack(&bits);

        log::debug!(
            "encoded {} symbols into {} payload bits, {} bytes",
            data.len(),
            bits.bit_count(),
            encoded.len()
        );

        Ok(encoded)
    }

    /// Strip the padding header and walk the tree over the payload
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        let payload = bit_vec::unpack(encoded);
        if payload.is_empty() {
            return Ok(Vec::new());
        }

        let tree = self.tree.as_ref().ok_or(HuffmanError::MissingTree)?;
        let decoded = tree.decode_bits(payload.iter());

        if decoded.trailing_bits > 0 {
            match self.config.trailing_bits {
                TrailingBitsPolicy::Reject => {
                    return Err(HuffmanError::TrailingBits {
                        bits: decoded.trailing_bits,
                    })
                }
                TrailingBitsPolicy::Truncate => log::warn!(
                    "dropping {} trailing bits that do not complete a code word",
                    decoded.trailing_bits
                ),
            }
        }

        log::debug!(
            "decoded {} payload bits into {} symbols",
            payload.bit_count(),
            decoded.symbols.len()
        );

        Ok(decoded.symbols)
    }

    /// Read `reader` to completion, encode it and write the result to `writer`.
    /// Returns the number of bytes written.
    pub fn encode_to_writer<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let encoded = self.encode(&data)?;
        writer.write_all(&encoded)?;
        writer.flush()?;
        Ok(encoded.len())
    }

    /// Read an encoded buffer to completion, decode it and write the symbols to
    /// `writer`. Returns the number of symbols written.
    pub fn decode_to_writer<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<usize> {
        let mut encoded = Vec::new();
        reader.read_to_end(&mut encoded)?;

        let decoded = self.decode(&encoded)?;
        writer.write_all(&decoded)?;
        writer.flush()?;
        Ok(decoded.len())
    }

    /// Encode `data` and bundle it with this codec's frequency table
    pub fn compress(&self, data: &[u8]) -> Result<CompressedData> {
        Ok(CompressedData {
            frequencies: self.frequencies.clone(),
            encoded: self.encode(data)?,
            original_length: data.len(),
        })
    }

    /// Rebuild the tree stored in `archive` and decode its payload
    pub fn decompress(archive: &CompressedData, config: CodecConfig) -> Result<Vec<u8>> {
        let codec = Self::from_frequencies(archive.frequencies.clone())?.with_config(config);
        let decoded = codec.decode(&archive.encoded)?;

        if codec.config.verify_length && decoded.len() != archive.original_length {
            return Err(HuffmanError::LengthMismatch {
                expected: archive.original_length,
                actual: decoded.len(),
            });
        }

        Ok(decoded)
    }

    /// Train on the whole input and write a self-contained archive.
    ///
    /// Takes any reader and writer; open files with [`File::open`] and
    /// [`File::create`] to work on paths.
    pub fn encode_from_file<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let codec = Self::from_bytes(&data)?;
        codec.compress(&data)?.write_to(&mut output)?;
        output.flush()?;
        Ok(())
    }

    /// Reverse [`HuffmanCodec::encode_from_file`] with the default configuration.
    /// Like it, this accepts any reader and writer, not only files.
    pub fn decode_from_file<R: Read, W: Write>(input: R, output: W) -> Result<()> {
        Self::decode_from_file_with_config(input, output, CodecConfig::default())
    }

    pub fn decode_from_file_with_config<R: Read, W: Write>(
        mut input: R,
        mut output: W,
        config: CodecConfig,
    ) -> Result<()> {
        let archive = CompressedData::deserialize(&mut input)?;
        let decoded = Self::decompress(&archive, config)?;
        output.write_all(&decoded)?;
        output.flush()?;
        Ok(())
    }
}
