//! Wire serialization trait for transaction parts.
use crate::transaction::CodecParams;
use crate::util::{ByteReader, ByteWriter, Result};

/// An object with a wire form under a set of codec parameters.
///
/// Integers are laid out in the format of the reader or writer passed in, which callers build
/// from `params.int_format`.
pub trait Serializable<T> {
    /// Reads the object from serialized form.
    ///
    /// # Errors
    /// Propagates IO errors or invalid data.
    fn read(reader: &mut ByteReader, params: &CodecParams) -> Result<T>
    where
        Self: Sized;

    /// Writes the object to serialized form.
    ///
    /// # Errors
    /// Values that cannot be encoded, such as an integer wider than its field.
    fn write(&self, writer: &mut ByteWriter, params: &CodecParams) -> Result<()>;
}
