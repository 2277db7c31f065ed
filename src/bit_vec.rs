use crate::error::{HuffmanError, Result};

/// Growable sequence of bits stored most-significant-bit first within each byte
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Every bit of every byte, in byte order
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BitVec {
            bits: bytes.to_vec(),
            bit_count: bytes.len() * 8,
        }
    }

    /// Parse a textual bit string made of '0' and '1' characters
    pub fn from_bit_str(text: &str) -> Result<Self> {
        let mut bit_vec = BitVec::with_capacity(text.len());
        for (position, character) in text.chars().enumerate() {
            match character {
                '0' => bit_vec.push_bit(false),
                '1' => bit_vec.push_bit(true),
                _ => {
                    return Err(HuffmanError::InvalidBitCharacter {
                        character,
                        position,
                    })
                }
            }
        }
        Ok(bit_vec)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn push_code(&mut self, code: &[bool]) {
        for &bit in code {
            self.push_bit(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// Bits starting at `start` as a new vector
    pub fn tail(&self, start: usize) -> BitVec {
        let mut out = BitVec::with_capacity(self.bit_count.saturating_sub(start));
        for bit in self.iter().skip(start) {
            out.push_bit(bit);
        }
        out
    }
}

impl std::fmt::Display for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Number of header bits placed before a payload of `payload_bits` bits.
///
/// Always 1..=8; an aligned payload still gets a full byte of header.
pub fn padding_len(payload_bits: usize) -> usize {
    8 - payload_bits % 8
}

/// Byte-align `payload` behind a padding header of zeros closed by a single 1 bit
pub fn pack(payload: &BitVec) -> Vec<u8> {
    let padding = padding_len(payload.bit_count());
    let mut packed = BitVec::with_capacity(padding + payload.bit_count());

    for _ in 0..padding - 1 {
        packed.push_bit(false);
    }
    packed.push_bit(true);
    for bit in payload.iter() {
        packed.push_bit(bit);
    }

    debug_assert_eq!(packed.bit_count() % 8, 0);
    packed.into_bytes()
}

/// Pack a textual bit string, rejecting anything other than '0' and '1'
pub fn pack_bit_str(text: &str) -> Result<Vec<u8>> {
    let payload = BitVec::from_bit_str(text)?;
    Ok(pack(&payload))
}

/// Strip the padding header written by [`pack`] and return the payload bits.
///
/// Only the first byte is searched for the marker. If it holds no 1 bit (or the
/// buffer is empty) exactly 8 bits are dropped instead.
pub fn unpack(bytes: &[u8]) -> BitVec {
    let bits = BitVec::from_bytes(bytes);

    let start = match (0..8).find(|&i| bits.get(i) == Some(true)) {
        Some(marker) => marker + 1,
        None => {
            log::warn!(
                "no padding marker in first byte of {}-byte buffer, dropping 8 bits",
                bytes.len()
            );
            8
        }
    };

    bits.tail(start)
}
