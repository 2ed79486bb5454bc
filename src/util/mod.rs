//! Encoding primitives shared by the transaction codec.

pub mod fixed_int;
pub mod hash160;
mod hash256;
mod reader;
mod result;
pub mod var_int;
mod writer;

pub use self::fixed_int::{IntFormat, Width};
pub use self::hash160::{Hash160, hash160};
pub use self::hash256::{Hash256, sha256d};
pub use self::reader::ByteReader;
pub use self::result::{Error, ErrorKind, Result};
pub use self::writer::ByteWriter;
