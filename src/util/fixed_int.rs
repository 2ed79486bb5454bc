//! Width-bounded integer ser/des for heights, register ID parts and coin amounts.
//!
//! Every field has a width (2, 4 or 8 bytes) that bounds its value. How the value is laid out
//! inside that bound is a contract parameter, [`IntFormat`], shared by everyone producing or
//! checking the payload.

use crate::util::{Error, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Width of a bounded integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 2 bytes
    U16,
    /// 4 bytes
    U32,
    /// 8 bytes
    U64,
}

impl Width {
    /// Number of bytes of the width.
    #[must_use]
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Width::U16 => 2,
            Width::U32 => 4,
            Width::U64 => 8,
        }
    }

    /// Largest value that fits the width.
    #[must_use]
    #[inline]
    pub fn max(self) -> u64 {
        match self {
            Width::U16 => u64::from(u16::MAX),
            Width::U32 => u64::from(u32::MAX),
            Width::U64 => u64::MAX,
        }
    }

    /// Checks that `n` fits the width.
    ///
    /// # Errors
    /// `Error::Overflow` if it does not.
    #[inline]
    pub fn check(self, n: u64) -> Result<()> {
        if n > self.max() {
            return Err(Error::Overflow { value: n, width: self });
        }
        Ok(())
    }
}

/// Byte layout of width-bounded integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntFormat {
    /// Exactly `width` bytes, least significant first.
    #[default]
    LittleEndian,
    /// Exactly `width` bytes, most significant first.
    BigEndian,
    /// MSB-first base-128 groups where each continuation adds one, so every value has a single
    /// encoding. Small values take one byte; the width only bounds the value.
    Packed,
}

/// Returns the number of bytes `n` occupies in `format`.
///
/// # Errors
/// `Error::Overflow` if `n` does not fit `width`.
pub fn size(n: u64, width: Width, format: IntFormat) -> Result<usize> {
    width.check(n)?;
    Ok(match format {
        IntFormat::LittleEndian | IntFormat::BigEndian => width.bytes(),
        IntFormat::Packed => packed_size(n),
    })
}

/// Writes `n` bounded by `width` in `format`.
///
/// Nothing is written when the value overflows.
///
/// # Errors
/// `Error::Overflow` if `n` does not fit `width`, `Error::IOError` from the writer.
pub fn write(n: u64, width: Width, format: IntFormat, writer: &mut dyn Write) -> Result<()> {
    width.check(n)?;
    match (format, width) {
        (IntFormat::LittleEndian, Width::U16) => writer.write_u16::<LittleEndian>(n as u16)?,
        (IntFormat::LittleEndian, Width::U32) => writer.write_u32::<LittleEndian>(n as u32)?,
        (IntFormat::LittleEndian, Width::U64) => writer.write_u64::<LittleEndian>(n)?,
        (IntFormat::BigEndian, Width::U16) => writer.write_u16::<BigEndian>(n as u16)?,
        (IntFormat::BigEndian, Width::U32) => writer.write_u32::<BigEndian>(n as u32)?,
        (IntFormat::BigEndian, Width::U64) => writer.write_u64::<BigEndian>(n)?,
        (IntFormat::Packed, _) => write_packed(n, writer)?,
    }
    Ok(())
}

/// Reads an integer bounded by `width` in `format`.
///
/// # Errors
/// `Error::IOError` on short input, `Error::BadData` if a packed value exceeds `width`.
pub fn read(reader: &mut dyn Read, width: Width, format: IntFormat) -> Result<u64> {
    let n = match (format, width) {
        (IntFormat::LittleEndian, Width::U16) => u64::from(reader.read_u16::<LittleEndian>()?),
        (IntFormat::LittleEndian, Width::U32) => u64::from(reader.read_u32::<LittleEndian>()?),
        (IntFormat::LittleEndian, Width::U64) => reader.read_u64::<LittleEndian>()?,
        (IntFormat::BigEndian, Width::U16) => u64::from(reader.read_u16::<BigEndian>()?),
        (IntFormat::BigEndian, Width::U32) => u64::from(reader.read_u32::<BigEndian>()?),
        (IntFormat::BigEndian, Width::U64) => reader.read_u64::<BigEndian>()?,
        (IntFormat::Packed, _) => read_packed(reader, width)?,
    };
    Ok(n)
}

fn packed_size(mut n: u64) -> usize {
    let mut len = 1;
    while n > 0x7f {
        n = (n >> 7) - 1;
        len += 1;
    }
    len
}

fn write_packed(mut n: u64, writer: &mut dyn Write) -> std::io::Result<()> {
    // 64 bits need at most 10 groups
    let mut tmp = [0u8; 10];
    let mut len = 0;
    loop {
        let continuation = if len > 0 { 0x80 } else { 0x00 };
        tmp[len] = (n & 0x7f) as u8 | continuation;
        if n <= 0x7f {
            break;
        }
        n = (n >> 7) - 1;
        len += 1;
    }
    tmp[..=len].reverse();
    writer.write_all(&tmp[..=len])
}

fn read_packed(reader: &mut dyn Read, width: Width) -> Result<u64> {
    let max = width.max();
    let mut n = 0u64;
    loop {
        let b = reader.read_u8()?;
        if n > max >> 7 {
            return Err(Error::BadData(format!("Packed integer exceeds {} bytes", width.bytes())));
        }
        n = (n << 7) | u64::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Ok(n);
        }
        if n == max {
            return Err(Error::BadData(format!("Packed integer exceeds {} bytes", width.bytes())));
        }
        n += 1;
    }
}
