//! The archive header: the length of the coded data and the frequency table the Huffman
//! tree is rebuilt from.
//!
//! Layout (all multi-byte fields little-endian):
//! - 4 bytes: number of coded symbols
//! - 2 bytes: number of table entries
//! - per entry: 1 byte symbol, then the frequency as 1 byte (below 0xFE),
//!   0xFF + 2 bytes (up to 0xFFFF), or 0xFE + 4 bytes.
//!

use log::trace;

use crate::error::{Error, Result};
use crate::tools::freq_count::{first_seen_order, freqs};

const ESCAPE_U16: u8 = 0xFF;
const ESCAPE_U32: u8 = 0xFE;
/// Largest frequency stored in a table entry without rescaling.
const MAX_FREQ: u64 = 255;

/// Symbol frequencies, in the order each symbol was first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(u8, u32)>,
}

impl FrequencyTable {
    /// Build a table from explicit entries.
    pub fn new(entries: Vec<(u8, u32)>) -> Self {
        Self { entries }
    }

    /// Count the data. When any count is above 255 every count is rescaled to
    /// 1 + count * 255 / (max + 1), which keeps them in 1..=255 and keeps their order.
    pub fn from_data(data: &[u8]) -> Self {
        let counts = freqs(data);
        let max = counts.iter().copied().max().unwrap_or(0);
        let entries = first_seen_order(data)
            .into_iter()
            .map(|sym| {
                let count = counts[sym as usize];
                let freq = if max > MAX_FREQ {
                    1 + count * MAX_FREQ / (max + 1)
                } else {
                    count
                };
                (sym, freq as u32)
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[(u8, u32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the header for `data_length` coded symbols and this table to `out`.
    pub fn write_header(&self, data_length: u32, out: &mut Vec<u8>) {
        out.extend_from_slice(&data_length.to_le_bytes());
        out.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        for &(sym, freq) in &self.entries {
            out.push(sym);
            // 0xFE and 0xFF are escape markers, so those values take the two byte form
            if freq < ESCAPE_U32 as u32 {
                out.push(freq as u8);
            } else if freq <= u16::MAX as u32 {
                out.push(ESCAPE_U16);
                out.extend_from_slice(&(freq as u16).to_le_bytes());
            } else {
                out.push(ESCAPE_U32);
                out.extend_from_slice(&freq.to_le_bytes());
            }
            trace!("Header entry {:#04x}: {}", sym, freq);
        }
    }

    /// Parse a header from the front of `archive`. Returns the coded symbol count, the
    /// table, and the offset where the bitstream begins.
    pub fn read_header(archive: &[u8]) -> Result<(u32, Self, usize)> {
        let mut cursor = HeaderCursor { archive, pos: 0 };

        let data_length = u32::from_le_bytes(cursor.array::<4>()?);
        let count = u16::from_le_bytes(cursor.array::<2>()?) as usize;

        let mut entries = Vec::with_capacity(count.min(256));
        for _ in 0..count {
            let sym = cursor.take(1)?[0];
            let freq = match cursor.take(1)?[0] {
                ESCAPE_U16 => u16::from_le_bytes(cursor.array::<2>()?) as u32,
                ESCAPE_U32 => u32::from_le_bytes(cursor.array::<4>()?),
                freq => freq as u32,
            };
            entries.push((sym, freq));
        }

        if entries.is_empty() && data_length > 0 {
            return Err(Error::EmptySymbolTable { data_length });
        }
        Ok((data_length, Self { entries }, cursor.pos))
    }
}

/// Bounds-checked reads from the header bytes.
struct HeaderCursor<'a> {
    archive: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.archive.len() - self.pos;
        if n > available {
            return Err(Error::TruncatedHeader {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.archive[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_seen_order_test() {
        let table = FrequencyTable::from_data(b"mississippi");
        assert_eq!(
            table.entries(),
            &[(b'm', 1), (b'i', 4), (b's', 4), (b'p', 2)]
        );
    }

    #[test]
    fn rescale_test() {
        // 300 zeros and 10 ones: max is 300, so 0 -> 1 + 300*255/301, 1 -> 1 + 10*255/301
        let mut data = vec![0_u8; 300];
        data.extend(vec![1_u8; 10]);
        let table = FrequencyTable::from_data(&data);
        assert_eq!(table.entries(), &[(0, 255), (1, 9)]);
    }

    #[test]
    fn no_rescale_at_255_test() {
        let table = FrequencyTable::from_data(&[3_u8; 255]);
        assert_eq!(table.entries(), &[(3, 255)]);
    }

    #[test]
    fn header_layout_test() {
        let table = FrequencyTable::new(vec![(b'a', 5), (b'b', 254), (b'c', 255), (b'd', 70_000)]);
        let mut out = Vec::new();
        table.write_header(0x0102_0304, &mut out);
        assert_eq!(
            out,
            vec![
                0x04, 0x03, 0x02, 0x01, // data length
                4, 0, // entries
                b'a', 5, //
                b'b', 0xFF, 254, 0, //
                b'c', 0xFF, 255, 0, //
                b'd', 0xFE, 0x70, 0x11, 0x01, 0x00,
            ]
        );
        let (len, read, offset) = FrequencyTable::read_header(&out).unwrap();
        assert_eq!(len, 0x0102_0304);
        assert_eq!(read, table);
        assert_eq!(offset, out.len());
    }

    #[test]
    fn truncated_header_test() {
        let table = FrequencyTable::new(vec![(b'a', 5), (b'b', 300)]);
        let mut out = Vec::new();
        table.write_header(10, &mut out);
        for cut in 0..out.len() {
            assert!(matches!(
                FrequencyTable::read_header(&out[..cut]),
                Err(Error::TruncatedHeader { .. })
            ));
        }
    }

    #[test]
    fn empty_table_test() {
        let mut out = Vec::new();
        FrequencyTable::default().write_header(0, &mut out);
        assert_eq!(out, vec![0; 6]);
        let (len, table, offset) = FrequencyTable::read_header(&out).unwrap();
        assert_eq!((len, table.len(), offset), (0, 0, 6));

        let bad = [1, 0, 0, 0, 0, 0];
        assert!(matches!(
            FrequencyTable::read_header(&bad),
            Err(Error::EmptySymbolTable { data_length: 1 })
        ));
    }
}
