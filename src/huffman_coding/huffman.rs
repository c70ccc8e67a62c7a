use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::header::FrequencyTable;
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Bits available in a Code.
const MAX_CODE_LEN: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeData {
    Kids { left: usize, right: usize },
    Leaf(u8),
}

/// A Huffman tree stored as an arena of nodes. Leaves occupy the first slots in table
/// order, internal nodes follow in the order they were merged.
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<NodeData>,
    root: usize,
}

/// A code word. Bit 0 of `bits` is the branch taken at the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl HuffmanTree {
    /*
    Greedy merge with a min-heap keyed on (weight, arena slot). A node's arena slot is the
    order it was created in, so ties go to the oldest node: first to table order among
    leaves, then to earlier merges. The first node popped becomes the left (0) child.
    Both compressor and decompressor build from the same table, so they get the same tree.
    */
    /// Build the tree for a frequency table. Returns None for an empty table.
    pub fn from_table(table: &FrequencyTable) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        let mut nodes = Vec::with_capacity(table.len() * 2);
        let mut heap = BinaryHeap::with_capacity(table.len());

        for &(sym, freq) in table.entries() {
            heap.push(Reverse((freq as u64, nodes.len())));
            nodes.push(NodeData::Leaf(sym));
        }

        while heap.len() > 1 {
            if let (Some(Reverse((w_left, left))), Some(Reverse((w_right, right)))) =
                (heap.pop(), heap.pop())
            {
                heap.push(Reverse((w_left + w_right, nodes.len())));
                nodes.push(NodeData::Kids { left, right });
            }
        }

        let root = nodes.len() - 1;
        Some(Self { nodes, root })
    }

    /// True when the table had a single symbol, so no bits are needed at all.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], NodeData::Leaf(_))
    }

    /// Walk the tree without recursion and return the code for every leaf. A tree that is
    /// a single leaf gets the one bit code "1".
    pub fn codes(&self) -> Result<FxHashMap<u8, Code>> {
        let mut codes = FxHashMap::default();
        if let NodeData::Leaf(sym) = self.nodes[self.root] {
            codes.insert(sym, Code { bits: 1, len: 1 });
            return Ok(codes);
        }

        let mut stack = vec![(self.root, 0_u64, 0_usize)];
        while let Some((node, bits, len)) = stack.pop() {
            match self.nodes[node] {
                NodeData::Leaf(sym) => {
                    codes.insert(sym, Code { bits, len: len as u8 });
                }
                NodeData::Kids { left, right } => {
                    if len == MAX_CODE_LEN {
                        return Err(Error::CodeTooLong(len + 1));
                    }
                    stack.push((right, bits | (1_u64 << len), len + 1));
                    stack.push((left, bits, len + 1));
                }
            }
        }
        Ok(codes)
    }

    /// Decode `data_length` symbols from the bitstream. Padding after the last symbol is ignored.
    pub fn decode_bits(&self, bitstream: &[u8], data_length: usize) -> Result<Vec<u8>> {
        // A single symbol carries no bits: the header alone says how many copies
        if let NodeData::Leaf(sym) = self.nodes[self.root] {
            return Ok(vec![sym; data_length]);
        }

        // Every symbol takes at least one bit
        let mut br = BitReader::new(bitstream);
        let mut out = Vec::with_capacity(data_length.min(bitstream.len() * 8));
        let mut node = self.root;

        while out.len() < data_length {
            let bit = br.bool_bit().ok_or(Error::TruncatedBitstream {
                decoded: out.len(),
                expected: data_length,
            })?;
            if let NodeData::Kids { left, right } = self.nodes[node] {
                node = if bit { right } else { left };
            }
            if let NodeData::Leaf(sym) = self.nodes[node] {
                out.push(sym);
                node = self.root;
            }
        }
        trace!("Decoding stopped at {}, {} bits unused", br.loc(), br.remaining());
        Ok(out)
    }
}

/// Pack the code of every byte of data, least significant bit first.
pub fn encode_bits(data: &[u8], codes: &FxHashMap<u8, Code>) -> Result<Vec<u8>> {
    let mut bp = BitPacker::new(data.len() / 2 + 1);
    for byte in data {
        let code = codes.get(byte).ok_or(Error::UnknownSymbol(*byte))?;
        bp.out_bits(code.bits, code.len);
    }
    bp.flush();
    trace!("Packed {} symbols into {}", data.len(), bp.loc());
    Ok(bp.output)
}

/// Huffman code a buffer into a complete archive: header followed by the packed bitstream.
pub fn huf_encode(data: &[u8]) -> Result<Vec<u8>> {
    let data_length = u32::try_from(data.len()).map_err(|_| Error::DataTooLarge(data.len()))?;
    let table = FrequencyTable::from_data(data);

    let mut archive = Vec::with_capacity(6 + table.len() * 2 + data.len() / 2);
    table.write_header(data_length, &mut archive);
    let header_len = archive.len();

    if let Some(tree) = HuffmanTree::from_table(&table) {
        // One symbol: the header is enough
        if !tree.is_single_leaf() {
            archive.extend(encode_bits(data, &tree.codes()?)?);
        }
    }

    debug!(
        "Huffman: {} symbols in use, {} header bytes, {} bitstream bytes",
        table.len(),
        header_len,
        archive.len() - header_len
    );
    Ok(archive)
}

/// Decode a complete archive produced by huf_encode.
pub fn huf_decode(archive: &[u8]) -> Result<Vec<u8>> {
    let (data_length, table, start) = FrequencyTable::read_header(archive)?;
    debug!(
        "Huffman: {} symbols in use, expecting {} bytes",
        table.len(),
        data_length
    );
    match HuffmanTree::from_table(&table) {
        Some(tree) => tree.decode_bits(&archive[start..], data_length as usize),
        // read_header only allows an empty table for empty data
        None => Ok(Vec::new()),
    }
}
