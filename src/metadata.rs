//! Binary layout for storing a [`SortedFrequencyList`] next to an encoded file.
//!
//! ```text
//! u32 LE   entry count
//! u64 LE   symbols observed when the list was built
//! repeat:
//!   u8     symbol
//!   u64 LE probability as IEEE-754 bits
//! ```
//!
//! Probabilities are stored bit-exact so the rebuilt tree matches the one used
//! to encode.

use std::io::{self, Read, Write};

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyEntry, SortedFrequencyList, ALPHABET_SIZE};

pub fn write_frequency_table<W: Write>(
    writer: &mut W,
    frequencies: &SortedFrequencyList,
) -> io::Result<()> {
    let count = frequencies.len() as u32;
    writer.write_all(&count.to_le_bytes())?;
    writer.write_all(&(frequencies.total() as u64).to_le_bytes())?;

    for entry in frequencies.iter() {
        writer.write_all(&[entry.symbol])?;
        writer.write_all(&entry.probability.to_bits().to_le_bytes())?;
    }
    Ok(())
}

pub fn read_frequency_table<R: Read>(reader: &mut R) -> Result<SortedFrequencyList> {
    let mut count_bytes = [0u8; 4];
    reader.read_exact(&mut count_bytes)?;
    let count = u32::from_le_bytes(count_bytes) as usize;

    if count > ALPHABET_SIZE {
        return Err(HuffmanError::invalid_data(format!(
            "frequency table lists {} entries, alphabet has {}",
            count, ALPHABET_SIZE
        )));
    }

    let mut total_bytes = [0u8; 8];
    reader.read_exact(&mut total_bytes)?;
    let total = u64::from_le_bytes(total_bytes) as usize;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let mut symbol = [0u8; 1];
        reader.read_exact(&mut symbol)?;

        let mut probability_bytes = [0u8; 8];
        reader.read_exact(&mut probability_bytes)?;
        let probability = f64::from_bits(u64::from_le_bytes(probability_bytes));

        entries.push(FrequencyEntry::new(symbol[0], probability));
    }

    SortedFrequencyList::from_sorted_entries(entries, total)
}

/// Serialize a frequency table into a fresh buffer
pub fn frequency_table_bytes(frequencies: &SortedFrequencyList) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(12 + frequencies.len() * 9);
    write_frequency_table(&mut bytes, frequencies)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_table_layout() {
        let list = SortedFrequencyList::build(b"aab").unwrap();
        let bytes = frequency_table_bytes(&list).unwrap();

        assert_eq!(bytes.len(), 12 + 2 * 9);
        assert_eq!(&bytes[..4], &2u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &3u64.to_le_bytes());
        assert_eq!(bytes[12], b'b');
        assert_eq!(bytes[21], b'a');
    }

    #[test]
    fn test_read_back_is_bit_exact() {
        let list = SortedFrequencyList::build(b"abracadabra, said the wizard").unwrap();
        let bytes = frequency_table_bytes(&list).unwrap();

        let restored = read_frequency_table(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(restored, list);
        assert_eq!(restored.total(), 28);
        for (a, b) in restored.iter().zip(list.iter()) {
            assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        }
    }

    #[test]
    fn test_empty_table() {
        let list = SortedFrequencyList::build(b"").unwrap();
        let bytes = frequency_table_bytes(&list).unwrap();
        assert_eq!(bytes, vec![0; 12]);
        assert!(read_frequency_table(&mut Cursor::new(&bytes)).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_table_is_io_error() {
        let list = SortedFrequencyList::build(b"xyz").unwrap();
        let bytes = frequency_table_bytes(&list).unwrap();
        let err = read_frequency_table(&mut Cursor::new(&bytes[..bytes.len() - 3])).unwrap_err();
        assert!(matches!(err, HuffmanError::Io(_)));
    }

    #[test]
    fn test_rejects_oversized_count() {
        let bytes = 500u32.to_le_bytes();
        let err = read_frequency_table(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidData { .. }));
    }

    #[test]
    fn test_rejects_unsorted_table() {
        let mut bytes = 2u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&4u64.to_le_bytes());
        bytes.push(b'a');
        bytes.extend_from_slice(&0.75f64.to_bits().to_le_bytes());
        bytes.push(b'b');
        bytes.extend_from_slice(&0.25f64.to_bits().to_le_bytes());

        let err = read_frequency_table(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidData { .. }));
    }

    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WriteZero, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let list = SortedFrequencyList::build(b"abc").unwrap();
        let err = write_frequency_table(&mut FullWriter, &list).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }
}
