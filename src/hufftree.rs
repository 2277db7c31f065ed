use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write;

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyEntry, SortedFrequencyList, Symbol};

#[derive(Debug, Clone, PartialEq)]
pub enum HuffNode {
    Leaf {
        entry: FrequencyEntry,
    },
    Internal {
        probability: f64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(entry: FrequencyEntry) -> Self {
        HuffNode::Leaf { entry }
    }

    pub fn probability(&self) -> f64 {
        match self {
            HuffNode::Leaf { entry } => entry.probability,
            HuffNode::Internal { probability, .. } => *probability,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            HuffNode::Leaf { entry } => Some(entry.symbol),
            HuffNode::Internal { .. } => None,
        }
    }

    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            probability: left.probability() + right.probability(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Child reached by following `bit` (false = left, true = right)
    pub fn child(&self, bit: bool) -> Option<&HuffNode> {
        match self {
            HuffNode::Leaf { .. } => None,
            HuffNode::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}

/// Symbols recovered by walking the tree, plus any bits left over mid-code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedSymbols {
    pub symbols: Vec<Symbol>,
    pub trailing_bits: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Merge the sorted entries with two FIFO queues.
    ///
    /// Leaves wait in `source` in sorted order; merged nodes are appended to
    /// `target`, which stays ordered by probability. Each step takes the smaller
    /// head of the two queues, and `source` wins ties. The first node taken
    /// becomes the left child.
    pub fn build(frequencies: &SortedFrequencyList) -> Result<Self> {
        if frequencies.len() < 2 {
            return Err(HuffmanError::InsufficientSymbols {
                count: frequencies.len(),
            });
        }

        let mut source: VecDeque<HuffNode> =
            frequencies.iter().copied().map(HuffNode::leaf).collect();
        let mut target: VecDeque<HuffNode> = VecDeque::with_capacity(source.len());

        loop {
            let left = take_smallest(&mut source, &mut target)?;
            let right = take_smallest(&mut source, &mut target)?;

            log::trace!(
                "merge {:?}:{} + {:?}:{}",
                left.symbol(),
                left.probability(),
                right.symbol(),
                right.probability()
            );

            target.push_back(HuffNode::merge(left, right));

            if source.is_empty() && target.len() == 1 {
                break;
            }
        }

        let root = target
            .pop_front()
            .ok_or(HuffmanError::InsufficientSymbols { count: 0 })?;
        let tree = HuffmanTree { root };

        log::debug!(
            "built tree with {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );

        Ok(tree)
    }

    pub fn generate_table(&self) -> EncodingTable {
        EncodingTable::build(self)
    }

    /// Walk the tree once per code word, restarting at the root after each leaf
    pub fn decode_bits<I>(&self, bits: I) -> DecodedSymbols
    where
        I: IntoIterator<Item = bool>,
    {
        let mut decoded = DecodedSymbols::default();
        let mut cursor = &self.root;
        let mut pending = 0;

        for bit in bits {
            // the root always has two children, so a cursor is never a leaf here
            let Some(next) = cursor.child(bit) else {
                break;
            };
            pending += 1;

            match next.symbol() {
                Some(symbol) => {
                    decoded.symbols.push(symbol);
                    cursor = &self.root;
                    pending = 0;
                }
                None => cursor = next,
            }
        }

        decoded.trailing_bits = pending;
        decoded
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => count += 1,
                HuffNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        deepest
    }

    /// Indented dump of the tree, one node per line
    pub fn structure(&self) -> String {
        let mut out = String::from("Huffman Tree Structure:\n");
        Self::write_node(&mut out, &self.root, 0, "root");
        out
    }

    fn write_node(out: &mut String, node: &HuffNode, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        match node {
            HuffNode::Leaf { entry } => {
                let _ = writeln!(
                    out,
                    "{}{}-> Leaf: {:?} ({}) [p: {}]",
                    indent, label, entry.symbol as char, entry.symbol, entry.probability
                );
            }
            HuffNode::Internal {
                probability,
                left,
                right,
            } => {
                let _ = writeln!(out, "{}{}-> Internal [p: {}]", indent, label, probability);
                Self::write_node(out, left, depth + 1, "L");
                Self::write_node(out, right, depth + 1, "R");
            }
        }
    }
}

// An empty queue never wins, so its head counts as f64::MAX
fn take_smallest(
    source: &mut VecDeque<HuffNode>,
    target: &mut VecDeque<HuffNode>,
) -> Result<HuffNode> {
    let source_prob = source.front().map_or(f64::MAX, HuffNode::probability);
    let target_prob = target.front().map_or(f64::MAX, HuffNode::probability);

    let node = if source_prob <= target_prob {
        source.pop_front()
    } else {
        target.pop_front()
    };

    node.ok_or(HuffmanError::InsufficientSymbols { count: 1 })
}

/// Root-to-leaf bit path for every symbol in a tree (left = 0, right = 1)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodingTable {
    codes: BTreeMap<Symbol, Vec<bool>>,
}

impl EncodingTable {
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(&HuffNode, Vec<bool>)> = vec![(&tree.root, Vec::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                HuffNode::Leaf { entry } => {
                    codes.insert(entry.symbol, code);
                }
                HuffNode::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    stack.push((right, right_code));

                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((left, left_code));
                }
            }
        }

        EncodingTable { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Code for `symbol` written as a string of '0' and '1'
    pub fn code_string(&self, symbol: Symbol) -> Option<String> {
        self.get(symbol)
            .map(|code| code.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(Vec::len).max().unwrap_or(0)
    }
}
