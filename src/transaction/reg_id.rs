//! Register IDs: the `<height>-<index>` name an account gets when it registers on-chain.

use crate::transaction::{CodecParams, Serializable};
use crate::util::{ByteReader, ByteWriter, Error, Result, Width};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Position of the registration transaction: block height and index within the block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegId {
    /// Block height of the registration
    pub height: u32,
    /// Index of the registration within the block
    pub index: u16,
}

impl RegId {
    /// Creates a register ID from its parts.
    #[must_use]
    pub fn new(height: u32, index: u16) -> Self {
        RegId { height, index }
    }
}

impl Serializable<RegId> for RegId {
    /// Reads a register ID block.
    ///
    /// # Errors
    /// `Error::BadData` if the announced length does not match the encoded parts.
    fn read(reader: &mut ByteReader, _params: &CodecParams) -> Result<RegId> {
        let block = reader.read_short_bytes()?;
        let mut inner = ByteReader::new(&block, reader.format());
        let height = inner.read_fixed(Width::U32)?;
        let index = inner.read_fixed(Width::U16)?;
        inner
            .finish()
            .map_err(|e| Error::BadData(format!("Register ID block: {}", e)))?;
        Ok(RegId {
            height: height as u32,
            index: index as u16,
        })
    }

    /// Writes the register ID block: a one-byte length, then height and index in the writer's
    /// integer format.
    fn write(&self, writer: &mut ByteWriter, _params: &CodecParams) -> Result<()> {
        let mut inner = ByteWriter::with_capacity(writer.format(), 6);
        inner.write_fixed(u64::from(self.height), Width::U32)?;
        inner.write_fixed(u64::from(self.index), Width::U16)?;
        writer.write_short_bytes(&inner.into_bytes())
    }
}

fn parse_part<T: FromStr>(part: &str, input: &str) -> Result<T> {
    // FromStr for integers would also take a leading '+'
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::BadRegId(format!("{:?} is not <height>-<index>", input)));
    }
    part.parse()
        .map_err(|_| Error::BadRegId(format!("{:?} is out of range", input)))
}

impl FromStr for RegId {
    type Err = Error;

    fn from_str(s: &str) -> Result<RegId> {
        let (height, index) = s
            .split_once('-')
            .ok_or_else(|| Error::BadRegId(format!("{:?} is not <height>-<index>", s)))?;
        Ok(RegId {
            height: parse_part(height, s)?,
            index: parse_part(index, s)?,
        })
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.height, self.index)
    }
}

impl Serialize for RegId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<RegId, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
