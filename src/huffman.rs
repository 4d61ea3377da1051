//! Frequency-driven prefix coder.
//!
//! Wire layout: `[u32 LE tree length][serialized tree][payload]`. The tree is
//! written pre-order, `1` + 8-bit symbol for a leaf and `0` followed by both
//! subtrees for an internal node. The payload carries no length; decoding
//! stops when its bits run out.

use std::cmp::Ordering;
use std::collections::HashMap;

use bitvec::prelude::*;
use log::{debug, trace};

use crate::bitio::{BitReader, BitWriter, Bits};
use crate::error::{CompressionError, Result};
use crate::heap::MinHeap;
use crate::traits::{Compressor, Decompressor};

const TREE_LENGTH_BYTES: usize = 4;
/// Leaf depth a padding guard reaches. Payload padding is at most 7 bits.
const GUARD_DEPTH: usize = 8;
const MAX_TREE_DEPTH: usize = 256;

#[derive(Debug, Clone, Eq, PartialEq)]
struct HuffmanNode {
    weight: usize,
    data: NodeData,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum NodeData {
    Leaf(u8),
    Internal {
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

/// Heap entry ordered by weight, then by insertion sequence.
#[derive(Debug)]
struct Pending {
    seq: usize,
    node: HuffmanNode,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .weight
            .cmp(&other.node.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl HuffmanNode {
    const fn new_leaf(byte: u8, weight: usize) -> Self {
        Self {
            weight,
            data: NodeData::Leaf(byte),
        }
    }

    fn new_internal(left: Self, right: Self) -> Self {
        let weight = left.weight + right.weight;
        Self {
            weight,
            data: NodeData::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// `levels` nested internal nodes whose leaves all carry `byte`.
    /// The leftmost leaf keeps `weight` and is the one the code table uses.
    fn guard_chain(byte: u8, weight: usize, levels: usize) -> Self {
        let tail = (1..levels).fold(Self::new_leaf(byte, 0), |tail, _| {
            Self::new_internal(Self::new_leaf(byte, 0), tail)
        });
        Self::new_internal(Self::new_leaf(byte, weight), tail)
    }

    fn code_table(&self) -> HashMap<u8, Bits> {
        let mut codes = HashMap::new();
        self.build_codes(&mut Bits::new(), &mut codes);
        codes
    }

    fn build_codes(&self, prefix: &mut Bits, codes: &mut HashMap<u8, Bits>) {
        match &self.data {
            NodeData::Leaf(byte) => {
                codes.entry(*byte).or_insert_with(|| prefix.clone());
            }
            NodeData::Internal { left, right } => {
                prefix.push(false);
                left.build_codes(prefix, codes);
                prefix.pop();

                prefix.push(true);
                right.build_codes(prefix, codes);
                prefix.pop();
            }
        }
    }

    /// Path to the first leaf of maximal depth, in pre-order.
    fn deepest_path(&self) -> Bits {
        fn walk(node: &HuffmanNode, path: &mut Bits, best: &mut Bits) {
            match &node.data {
                NodeData::Leaf(_) => {
                    if path.len() > best.len() {
                        best.clone_from(path);
                    }
                }
                NodeData::Internal { left, right } => {
                    path.push(false);
                    walk(left, path, best);
                    path.pop();

                    path.push(true);
                    walk(right, path, best);
                    path.pop();
                }
            }
        }

        let mut best = Bits::new();
        walk(self, &mut Bits::new(), &mut best);
        best
    }

    /// Replaces the leaf at the end of `path` with a guard chain reaching
    /// `GUARD_DEPTH`, so the tree has a path longer than any pad run.
    fn guarded(self, path: &BitSlice<u8, Msb0>, depth: usize) -> Self {
        let weight = self.weight;
        match (self.data, path.split_first()) {
            (NodeData::Leaf(byte), _) => {
                Self::guard_chain(byte, weight, GUARD_DEPTH.saturating_sub(depth).max(1))
            }
            (NodeData::Internal { left, right }, Some((go_right, rest))) => {
                let (left, right) = if *go_right {
                    (left, Box::new((*right).guarded(rest, depth + 1)))
                } else {
                    (Box::new((*left).guarded(rest, depth + 1)), right)
                };
                Self {
                    weight,
                    data: NodeData::Internal { left, right },
                }
            }
            (data, None) => Self { weight, data },
        }
    }

    fn serialize(&self, writer: &mut BitWriter) {
        match &self.data {
            NodeData::Leaf(byte) => {
                writer.write_bit(true);
                writer.write_byte(*byte);
            }
            NodeData::Internal { left, right } => {
                writer.write_bit(false);
                left.serialize(writer);
                right.serialize(writer);
            }
        }
    }

    fn deserialize(reader: &mut BitReader<'_>, depth: usize) -> Result<Self> {
        if depth > MAX_TREE_DEPTH {
            return Err(CompressionError::CorruptedData("tree exceeds maximum depth"));
        }

        match reader.read_bit() {
            None => Err(CompressionError::CorruptedData("tree stream ended early")),
            Some(true) => reader
                .read_byte()
                .map(|byte| Self::new_leaf(byte, 0))
                .ok_or(CompressionError::CorruptedData("tree stream ended inside a leaf")),
            Some(false) => {
                let left = Self::deserialize(reader, depth + 1)?;
                let right = Self::deserialize(reader, depth + 1)?;
                Ok(Self::new_internal(left, right))
            }
        }
    }
}

fn build_frequency_table(data: &[u8]) -> [usize; 256] {
    let mut freq = [0usize; 256];
    for &byte in data {
        freq[usize::from(byte)] += 1;
    }
    freq
}

fn build_huffman_tree(freq_table: &[usize; 256]) -> Option<HuffmanNode> {
    let mut symbols: Vec<(u8, usize)> = (0..=u8::MAX)
        .zip(freq_table.iter().copied())
        .filter(|&(_, count)| count > 0)
        .collect();

    // A lone symbol still needs a one-bit code, so give it a weightless sibling.
    if let &[(byte, _)] = symbols.as_slice() {
        symbols.push((!byte, 0));
    }

    let mut heap: MinHeap<Pending> = symbols
        .into_iter()
        .enumerate()
        .map(|(seq, (byte, weight))| Pending {
            seq,
            node: HuffmanNode::new_leaf(byte, weight),
        })
        .collect();

    let mut seq = heap.len();
    while heap.len() > 1 {
        let left = heap.pop()?;
        let right = heap.pop()?;
        heap.push(Pending {
            seq,
            node: HuffmanNode::new_internal(left.node, right.node),
        });
        seq += 1;
    }

    heap.pop().map(|pending| pending.node)
}

fn encode_payload(tree: &HuffmanNode, input: &[u8]) -> Result<BitWriter> {
    let codes = tree.code_table();
    let mut writer = BitWriter::new();
    for byte in input {
        let code = codes
            .get(byte)
            .ok_or(CompressionError::CorruptedData("symbol missing from code table"))?;
        writer.write_bits(code);
    }
    Ok(writer)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Huffman;

impl Huffman {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Compressor for Huffman {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let freq_table = build_frequency_table(input);
        let Some(mut tree) = build_huffman_tree(&freq_table) else {
            debug!("Huffman: compressed empty input to bare header");
            return Ok(vec![0; TREE_LENGTH_BYTES]);
        };

        let mut payload = encode_payload(&tree, input)?;
        let mut pad_path = tree.deepest_path();
        if pad_path.len() <= payload.padding() {
            trace!(
                "Huffman: {} pad bits would complete a {}-bit code, guarding deepest leaf",
                payload.padding(),
                pad_path.len()
            );
            tree = tree.guarded(&pad_path, 0);
            payload = encode_payload(&tree, input)?;
            pad_path = tree.deepest_path();
        }
        // A proper prefix of a leaf path never lands on a leaf.
        let padding = payload.padding();
        payload.write_bits(&pad_path[..padding]);

        let mut tree_writer = BitWriter::new();
        tree.serialize(&mut tree_writer);
        let tree_bytes = tree_writer.finish();
        let tree_len = u32::try_from(tree_bytes.len())
            .map_err(|_| CompressionError::InvalidInput("serialized tree too large".to_string()))?;
        let payload_bytes = payload.finish();

        let mut output =
            Vec::with_capacity(TREE_LENGTH_BYTES + tree_bytes.len() + payload_bytes.len());
        output.extend_from_slice(&tree_len.to_le_bytes());
        output.extend_from_slice(&tree_bytes);
        output.extend_from_slice(&payload_bytes);

        debug!(
            "Huffman: compressed {} bytes to {} ({} tree bytes)",
            input.len(),
            output.len(),
            tree_bytes.len()
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "Huffman"
    }
}

impl Decompressor for Huffman {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let Some((length_bytes, rest)) = input.split_first_chunk::<TREE_LENGTH_BYTES>() else {
            return Ok(Vec::new());
        };

        let tree_len = usize::try_from(u32::from_le_bytes(*length_bytes))
            .map_err(|_| CompressionError::CorruptedData("tree length overflows usize"))?;
        if tree_len > rest.len() {
            return Err(CompressionError::CorruptedData("tree length exceeds input"));
        }
        let (tree_bytes, payload) = rest.split_at(tree_len);

        if tree_bytes.is_empty() {
            if payload.is_empty() {
                return Ok(Vec::new());
            }
            return Err(CompressionError::CorruptedData("payload without a tree"));
        }

        let root = HuffmanNode::deserialize(&mut BitReader::new(tree_bytes), 0)?;
        if matches!(root.data, NodeData::Leaf(_)) {
            return Err(CompressionError::CorruptedData("tree root is a leaf"));
        }

        let mut output = Vec::new();
        let mut reader = BitReader::new(payload);
        let mut current = &root;

        while let Some(bit) = reader.read_bit() {
            if let NodeData::Internal { left, right } = &current.data {
                current = if bit { right } else { left };
            }
            if let NodeData::Leaf(byte) = current.data {
                output.push(byte);
                current = &root;
            }
        }

        debug!(
            "Huffman: decompressed {} bytes to {}",
            input.len(),
            output.len()
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "Huffman"
    }
}
