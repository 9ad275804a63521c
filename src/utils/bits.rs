//! MSB-first bit packing over in-memory byte buffers.

use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

/// Appends bits to a byte buffer, most significant bit of each byte first
pub struct MsbWriter<'a> {
    writer: BitWriter<&'a mut Vec<u8>, BigEndian>,
    written: u64,
}

impl<'a> MsbWriter<'a> {
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            writer: BitWriter::endian(out, BigEndian),
            written: 0,
        }
    }

    pub fn write_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.writer.write_bit(bit)?;
        }
        self.written += bits.len() as u64;
        Ok(())
    }

    /// Zero-pad the trailing partial byte and return how many bits were written
    pub fn finish(mut self) -> io::Result<u64> {
        self.writer.byte_align()?;
        Ok(self.written)
    }
}

/// Reads bits back in the order `MsbWriter` wrote them
pub struct MsbReader<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
}

impl<'a> MsbReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::endian(Cursor::new(data), BigEndian),
        }
    }

    /// Next bit, or `None` once the buffer is exhausted
    pub fn next_bit(&mut self) -> Option<bool> {
        self.reader.read_bit().ok()
    }
}

/// Bytes needed to hold `bits` bits once padded
pub fn packed_len(bits: u64) -> u64 {
    bits.div_ceil(8)
}
