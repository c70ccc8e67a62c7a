//! BitReader: reads the packed Huffman bitstream of a bwzip archive.
//!
//! Bits are consumed least significant bit first within each byte, mirroring BitPacker.
//!
//! NOTE: The whole archive is held in memory, so this reads from a byte slice rather than
//! an I/O source.
//!

/// Reads single bits from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over the slice.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<u8> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u8> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte >> self.bit_index) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor.min(self.buffer.len())) * 8 - self.bit_index
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b1000_0011_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), None);
    }

    #[test]
    fn bool_bit_test() {
        let x = [0b0000_1010];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), Some(false));
    }

    #[test]
    fn remaining_and_loc_test() {
        let x = "Hello".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.remaining(), 40);
        for _ in 0..9 {
            br.bit();
        }
        assert_eq!(br.loc(), "[1.1]");
        assert_eq!(br.remaining(), 31);
    }

    #[test]
    fn empty_test() {
        let mut br = BitReader::new(&[]);
        assert_eq!(br.bit(), None);
        assert_eq!(br.remaining(), 0);
    }
}
