use log::error;

/// Packs variable length codes into a byte buffer, least significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to
    /// move any pending bits to the buffer before reading the output.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal write function. Moves every complete byte from the queue to the output.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            self.output.push(self.queue as u8); //push the low byte out
            self.queue >>= 8;
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /*
    NOTE: Bits are taken from `bits` starting at the least significant end. The first
    bit of a Huffman code (the branch taken at the root) must therefore sit in bit 0.
    Each call adds at most 32 bits at a time so the 64 bit queue never overflows.
    */
    /// Puts the low `len` bits of `bits` on the stream (0-64 bits).
    pub fn out_bits(&mut self, mut bits: u64, mut len: u8) {
        while len > 0 {
            let take = len.min(32);
            let mask = (1_u64 << take) - 1;
            self.queue |= (bits & mask) << self.q_bits; //add data portion above pending bits
            self.q_bits += take; //update depth of queue bits
            self.write_stream();
            bits >>= take;
            len -= take;
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the most
    /// significant bits of the final byte.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.q_bits = 8; // the unused high bits of the queue are already zero
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!(
            "[{}.{}]",
            ((self.output.len() * 8) + self.q_bits as usize) / 8,
            ((self.output.len() * 8) + self.q_bits as usize) % 8
        )
    }
}
