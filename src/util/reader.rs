//! Cursor over a payload, the reading twin of [`ByteWriter`](crate::util::ByteWriter).

use crate::util::{Error, IntFormat, Result, Width, fixed_int, var_int};
use byteorder::ReadBytesExt;
use std::io::{Cursor, Read};

/// Reads fields back out of a payload in the order they were written.
#[derive(Debug)]
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    format: IntFormat,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8], format: IntFormat) -> Self {
        ByteReader {
            cursor: Cursor::new(bytes),
            format,
        }
    }

    /// Integer layout used by [`ByteReader::read_fixed`].
    #[must_use]
    #[inline]
    pub fn format(&self) -> IntFormat {
        self.format
    }

    /// Reads an integer bounded by `width`.
    pub fn read_fixed(&mut self, width: Width) -> Result<u64> {
        fixed_int::read(&mut self.cursor, width, self.format)
    }

    /// Reads a compact-size integer.
    pub fn read_var_int(&mut self) -> Result<u64> {
        var_int::read(&mut self.cursor)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.cursor.read_u8()?)
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if len > self.remaining() {
            return Err(Error::BadData(format!("Need {} bytes, {} left", len, self.remaining())));
        }
        let mut v = vec![0; len];
        self.cursor.read_exact(&mut v)?;
        Ok(v)
    }

    /// Reads bytes behind a one-byte length.
    pub fn read_short_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u8()?;
        self.read_bytes(usize::from(len))
    }

    /// Reads bytes behind a compact-size length of at most `max` bytes.
    pub fn read_var_bytes(&mut self, max: usize) -> Result<Vec<u8>> {
        let len = self.read_var_int()?;
        if len > max as u64 {
            return Err(Error::BadData(format!("Length {} exceeds {}", len, max)));
        }
        self.read_bytes(len as usize)
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len();
        len - (self.cursor.position() as usize).min(len)
    }

    /// Checks that every byte was consumed.
    ///
    /// # Errors
    /// `Error::BadData` if bytes are left over.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(Error::BadData(format!("{} trailing bytes", n))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_in_order() -> Result<()> {
        let b = hex!("03 64000000 aa 0102 03070707 00");
        let mut r = ByteReader::new(&b, IntFormat::LittleEndian);
        assert_eq!(r.read_var_int()?, 3);
        assert_eq!(r.read_fixed(Width::U32)?, 100);
        assert_eq!(r.read_u8()?, 0xaa);
        assert_eq!(r.read_bytes(2)?, vec![1, 2]);
        assert_eq!(r.read_short_bytes()?, vec![7; 3]);
        assert_eq!(r.read_var_bytes(10)?, Vec::<u8>::new());
        r.finish()
    }

    #[test]
    fn rejects_bad_lengths() {
        let b = hex!("05 0102");
        let mut r = ByteReader::new(&b, IntFormat::LittleEndian);
        assert_eq!(r.read_short_bytes().unwrap_err().to_string(), "Bad data: Need 5 bytes, 2 left");

        let b = hex!("05 0102030405");
        let mut r = ByteReader::new(&b, IntFormat::LittleEndian);
        assert_eq!(r.read_var_bytes(4).unwrap_err().to_string(), "Bad data: Length 5 exceeds 4");

        let b = hex!("00 ff");
        let mut r = ByteReader::new(&b, IntFormat::LittleEndian);
        assert_eq!(r.read_u8().unwrap(), 0);
        assert_eq!(r.finish().unwrap_err().to_string(), "Bad data: 1 trailing bytes");
    }
}
