/// Move To Front table of all 256 byte values, shared by the encoder and decoder.
struct MtfTable {
    index: [u8; 256],
}

impl MtfTable {
    /// Start with every byte value in ascending order.
    fn new() -> Self {
        let mut index = [0_u8; 256];
        index.iter_mut().enumerate().for_each(|(i, slot)| *slot = i as u8);
        Self { index }
    }

    /// Move the symbol at `idx` to the front, shifting everything before it back one slot.
    #[inline]
    fn promote(&mut self, idx: usize) -> u8 {
        let sym = self.index[idx];
        self.index.copy_within(0..idx, 1);
        self.index[0] = sym;
        sym
    }

    /// Current position of `byte`. Every byte value is always present.
    #[inline]
    fn position(&self, byte: u8) -> usize {
        self.index
            .iter()
            .position(|&c| c == byte)
            .unwrap_or(byte as usize)
    }
}

/// Encode data using the Move To Front transform.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        let idx = table.position(byte);
        out.push(idx as u8);
        table.promote(idx);
    }
    out
}

/// Decode Move To Front indices back to the symbols they stood for.
pub fn mtf_decode(indices: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    indices
        .iter()
        .map(|&idx| table.promote(idx as usize))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_test() {
        // b a n a n a -> 98 98 110 1 1 1
        assert_eq!(mtf_encode(b"banana"), vec![98, 98, 110, 1, 1, 1]);
    }

    #[test]
    fn repeats_become_zeros_test() {
        assert_eq!(mtf_encode(&[7, 7, 7, 0]), vec![7, 0, 0, 1]);
    }

    #[test]
    fn decode_test() {
        assert_eq!(mtf_decode(&[98, 98, 110, 1, 1, 1]), b"banana".to_vec());
    }

    #[test]
    fn round_trip_test() {
        let data = "Making a silly test, with every byte: "
            .bytes()
            .chain(0..=255)
            .chain((0..=255).rev())
            .collect::<Vec<u8>>();
        assert_eq!(mtf_decode(&mtf_encode(&data)), data);
    }

    #[test]
    fn empty_test() {
        assert!(mtf_encode(&[]).is_empty());
        assert!(mtf_decode(&[]).is_empty());
    }
}
