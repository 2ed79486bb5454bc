//! Append-only byte accumulator for building payloads.

use crate::util::{Error, IntFormat, Result, Width, fixed_int, var_int};

/// Append-only buffer that produces one payload.
///
/// Width-bounded integers are laid out in the writer's [`IntFormat`]. The writer is consumed by
/// [`ByteWriter::into_bytes`].
#[derive(Debug)]
pub struct ByteWriter {
    buf: Vec<u8>,
    format: IntFormat,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new(format: IntFormat) -> Self {
        Self::with_capacity(format, 0)
    }

    /// Creates an empty writer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(format: IntFormat, capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
            format,
        }
    }

    /// Integer layout used by [`ByteWriter::write_fixed`].
    #[must_use]
    #[inline]
    pub fn format(&self) -> IntFormat {
        self.format
    }

    /// Appends `n` bounded by `width`.
    ///
    /// # Errors
    /// `Error::Overflow` if `n` does not fit `width`; the buffer is left unchanged.
    pub fn write_fixed(&mut self, n: u64, width: Width) -> Result<()> {
        fixed_int::write(n, width, self.format, &mut self.buf)
    }

    /// Appends `n` as a compact-size integer.
    ///
    /// # Errors
    /// `Error::IOError` from the underlying buffer.
    pub fn write_var_int(&mut self, n: u64) -> Result<()> {
        var_int::write(n, &mut self.buf)?;
        Ok(())
    }

    /// Appends a single byte.
    #[inline]
    pub fn write_u8(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Appends raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends bytes behind a one-byte length.
    ///
    /// # Errors
    /// `Error::BadArgument` if `bytes` is longer than 255.
    pub fn write_short_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let len = u8::try_from(bytes.len())
            .map_err(|_| Error::BadArgument(format!("{} bytes do not fit a one-byte length", bytes.len())))?;
        self.write_u8(len);
        self.write_bytes(bytes);
        Ok(())
    }

    /// Appends bytes behind a compact-size length.
    ///
    /// # Errors
    /// As [`ByteWriter::write_var_int`].
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_var_int(bytes.len() as u64)?;
        self.write_bytes(bytes);
        Ok(())
    }

    /// Number of bytes written so far.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the accumulated bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
