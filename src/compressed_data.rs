use std::io::{Read, Write};

use crate::error::{HuffmanError, Result};
use crate::frequency::SortedFrequencyList;
use crate::metadata::{read_frequency_table, write_frequency_table};

/// Self-contained archive: the frequency table needed to rebuild the tree,
/// the padded encoded buffer, and the original symbol count.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedData {
    pub frequencies: SortedFrequencyList,
    pub encoded: Vec<u8>,
    pub original_length: usize,
}

impl CompressedData {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let original_length = self.original_length as u64;
        writer.write_all(&original_length.to_le_bytes())?;

        write_frequency_table(writer, &self.frequencies)?;

        let encoded_len = self.encoded.len() as u64;
        writer.write_all(&encoded_len.to_le_bytes())?;
        writer.write_all(&self.encoded)?;

        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn deserialize<R: Read>(reader: &mut R) -> Result<CompressedData> {
        let mut original_length_bytes = [0u8; 8];
        reader.read_exact(&mut original_length_bytes)?;
        let original_length = u64::from_le_bytes(original_length_bytes) as usize;

        let frequencies = read_frequency_table(reader)?;

        let mut encoded_len_bytes = [0u8; 8];
        reader.read_exact(&mut encoded_len_bytes)?;
        let encoded_len = u64::from_le_bytes(encoded_len_bytes) as usize;

        // guard the allocation against a corrupt length field
        let mut encoded = Vec::new();
        reader.by_ref().take(encoded_len as u64).read_to_end(&mut encoded)?;
        if encoded.len() != encoded_len {
            return Err(HuffmanError::invalid_data(format!(
                "archive declares {} encoded bytes, found {}",
                encoded_len,
                encoded.len()
            )));
        }

        Ok(CompressedData {
            frequencies,
            encoded,
            original_length,
        })
    }
}
