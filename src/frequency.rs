use std::cmp::Ordering;
use std::io::Read;

use crate::error::{HuffmanError, Result};

/// A value of the 7-bit alphabet
pub type Symbol = u8;

/// Number of distinct symbols in the alphabet
pub const ALPHABET_SIZE: usize = 128;

/// A symbol and its probability of occurrence in the training input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub probability: f64,
}

impl FrequencyEntry {
    pub fn new(symbol: Symbol, probability: f64) -> Self {
        FrequencyEntry {
            symbol,
            probability,
        }
    }

    /// Ascending by probability, ties broken by ascending symbol value
    pub fn sort_order(&self, other: &Self) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then(self.symbol.cmp(&other.symbol))
    }
}

/// Frequency entries sorted ascending by (probability, symbol).
///
/// This ordering seeds the tree builder, so two lists that compare equal always
/// produce the same tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortedFrequencyList {
    entries: Vec<FrequencyEntry>,
    total: usize,
}

impl SortedFrequencyList {
    /// Count every symbol of `data` and produce the sorted probability list.
    ///
    /// Empty input yields an empty list. When only one distinct symbol occurs,
    /// a zero-probability entry for the following symbol value is added so the
    /// tree always has two leaves.
    pub fn build(data: &[u8]) -> Result<Self> {
        let mut counts = [0usize; ALPHABET_SIZE];

        for (position, &value) in data.iter().enumerate() {
            let slot = counts
                .get_mut(value as usize)
                .ok_or(HuffmanError::SymbolOutOfRange { value, position })?;
            *slot += 1;
        }

        let total = data.len();
        let mut entries: Vec<FrequencyEntry> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| {
                FrequencyEntry::new(symbol as Symbol, count as f64 / total as f64)
            })
            .collect();

        if let [only] = entries.as_slice() {
            // 127 has no successor inside the alphabet, wrap to 0
            let next = ((only.symbol as usize + 1) % ALPHABET_SIZE) as Symbol;
            entries.push(FrequencyEntry::new(next, 0.0));
        }

        entries.sort_by(FrequencyEntry::sort_order);

        log::debug!(
            "frequency model: {} symbols observed, {} entries",
            total,
            entries.len()
        );

        Ok(SortedFrequencyList { entries, total })
    }

    /// Read `reader` to completion and build the list from its contents
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::build(&data)
    }

    /// Wrap entries that are already sorted, e.g. a list read back from storage.
    /// `total` is the symbol count the probabilities were computed from.
    ///
    /// Fails if a symbol is out of range, appears twice, or the entries are not
    /// in ascending (probability, symbol) order.
    pub fn from_sorted_entries(entries: Vec<FrequencyEntry>, total: usize) -> Result<Self> {
        let mut seen = [false; ALPHABET_SIZE];
        for entry in &entries {
            let slot = seen.get_mut(entry.symbol as usize).ok_or_else(|| {
                HuffmanError::invalid_data(format!(
                    "symbol {} outside the 7-bit alphabet",
                    entry.symbol
                ))
            })?;
            if *slot {
                return Err(HuffmanError::invalid_data(format!(
                    "symbol {} listed twice",
                    entry.symbol
                )));
            }
            *slot = true;

            if !entry.probability.is_finite() || entry.probability < 0.0 {
                return Err(HuffmanError::invalid_data(format!(
                    "symbol {} has invalid probability {}",
                    entry.symbol, entry.probability
                )));
            }
        }

        if entries
            .windows(2)
            .any(|pair| pair[0].sort_order(&pair[1]) != Ordering::Less)
        {
            return Err(HuffmanError::invalid_data(
                "frequency entries are not sorted by (probability, symbol)",
            ));
        }

        if entries.is_empty() != (total == 0) {
            return Err(HuffmanError::invalid_data(format!(
                "{} entries recorded for {} observed symbols",
                entries.len(),
                total
            )));
        }

        Ok(SortedFrequencyList { entries, total })
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols observed when the list was built
    pub fn total(&self) -> usize {
        self.total
    }

    /// Probability recorded for `symbol`, if it has an entry
    pub fn probability(&self, symbol: Symbol) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.symbol == symbol)
            .map(|entry| entry.probability)
    }
}
