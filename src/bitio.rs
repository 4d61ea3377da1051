//! MSB-first bit packing used by the Huffman codec.
//!
//! Bits fill each byte from the most significant position down. A partially
//! filled trailing byte is zero-padded on [`BitWriter::finish`]; readers get
//! no length information and simply run until the bytes are exhausted.

use bitvec::prelude::*;

pub type Bits = BitVec<u8, Msb0>;

#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bits: Bits,
}

impl BitWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends all eight bits of `byte`, most significant first.
    pub fn write_byte(&mut self, byte: u8) {
        self.bits.extend_from_bitslice(byte.view_bits::<Msb0>());
    }

    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Number of bits written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Zero bits that [`finish`](Self::finish) would append to complete the last byte.
    #[must_use]
    pub fn padding(&self) -> usize {
        (8 - self.bits.len() % 8) % 8
    }

    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        let padding = self.padding();
        self.bits.resize(self.bits.len() + padding, false);
        self.bits.into_vec()
    }
}

#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: bytes.view_bits::<Msb0>(),
            position: 0,
        }
    }

    /// Next bit, or `None` once the stream is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// Next eight bits as a byte. Consumes nothing if fewer than eight remain.
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.remaining() < 8 {
            return None;
        }
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | u8::from(self.read_bit()?);
        }
        Some(byte)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_packs_msb_first() {
        let mut writer = BitWriter::new();
        for bit in [true, false, true, false, true, false, true, false] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.finish(), vec![0b1010_1010]);
    }

    #[test]
    fn test_writer_zero_pads_partial_byte() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_bit(true);
        writer.write_bit(true);
        assert_eq!(writer.padding(), 5);
        assert_eq!(writer.finish(), vec![0b1110_0000]);
    }

    #[test]
    fn test_writer_empty() {
        let writer = BitWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.padding(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn test_write_byte_unaligned() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_byte(0x81);
        assert_eq!(writer.len(), 9);
        assert_eq!(writer.finish(), vec![0b1100_0000, 0b1000_0000]);
    }

    #[test]
    fn test_write_bits_slice() {
        let mut writer = BitWriter::new();
        writer.write_bits(bits![u8, Msb0; 0, 1, 1]);
        writer.write_bits(bits![u8, Msb0; 1, 1, 1, 1, 1]);
        assert_eq!(writer.finish(), vec![0b0111_1111]);
    }

    #[test]
    fn test_reader_reads_msb_first() {
        let mut reader = BitReader::new(&[0b1000_0001]);
        assert_eq!(reader.read_bit(), Some(true));
        for _ in 0..6 {
            assert_eq!(reader.read_bit(), Some(false));
        }
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_reader_byte_across_boundary() {
        let mut reader = BitReader::new(&[0b1110_0000, 0b1000_0000]);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_byte(), Some(0b1100_0001));
        assert_eq!(reader.remaining(), 7);
    }

    #[test]
    fn test_reader_short_byte_consumes_nothing() {
        let mut reader = BitReader::new(&[0xFF]);
        reader.read_bit();
        assert_eq!(reader.read_byte(), None);
        assert_eq!(reader.remaining(), 7);
    }

    #[test]
    fn test_reader_empty() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.read_byte(), None);
    }

    #[test]
    fn test_writer_output_feeds_reader() {
        let mut writer = BitWriter::new();
        writer.write_bit(false);
        writer.write_byte(b'z');
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.read_byte(), Some(b'z'));
        // pad bits are still visible to the reader
        assert_eq!(reader.remaining(), 7);
    }
}
