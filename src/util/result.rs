//! Standard error and result types for the library.
use crate::util::Width;
use base58::FromBase58Error;
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;
use std::num::ParseIntError;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data given is not valid
    BadData(String),
    /// A register ID is not of the form `<height>-<index>`
    BadRegId(String),
    /// Address text could not be resolved for the requested network and kind
    BadAddress(String),
    /// A value does not fit the width it is encoded into
    Overflow {
        /// The value that was being encoded
        value: u64,
        /// The width it had to fit into
        width: Width,
    },
    /// The signature does not match the payload and public key
    BadSignature,
    /// The signer rejected the key or digest
    Signing(String),
    /// Base58 string could not be decoded
    FromBase58Error(FromBase58Error),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Standard library IO error
    IOError(io::Error),
    /// Error parsing an integer
    ParseIntError(ParseIntError),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
}

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input fields or wire bytes could not be decoded or encoded.
    Decode,
    /// The signing collaborator failed.
    Signing,
}

impl Error {
    /// Classifies the error as a decode or a signing failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Signing(_) => ErrorKind::Signing,
            _ => ErrorKind::Decode,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => write!(f, "Bad argument: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::BadRegId(s) => write!(f, "Bad register ID: {}", s),
            Error::BadAddress(s) => write!(f, "Bad address: {}", s),
            Error::Overflow { value, width } => {
                write!(f, "Overflow: {} does not fit in {} bytes", value, width.bytes())
            }
            Error::BadSignature => write!(f, "Signature verification failed"),
            Error::Signing(s) => write!(f, "Signing failed: {}", s),
            Error::FromBase58Error(e) => write!(f, "Base58 decoding error: {:?}", e),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::ParseIntError(e) => write!(f, "ParseIntError: {}", e),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::ParseIntError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::FromBase58Error(e)
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<ParseIntError> for Error {
    fn from(e: ParseIntError) -> Self {
        Error::ParseIntError(e)
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind() {
        assert_eq!(Error::BadRegId("1234".to_string()).kind(), ErrorKind::Decode);
        assert_eq!(Error::BadAddress("x".to_string()).kind(), ErrorKind::Decode);
        assert_eq!(Error::Overflow { value: 1 << 32, width: Width::U32 }.kind(), ErrorKind::Decode);
        assert_eq!(Error::BadSignature.kind(), ErrorKind::Decode);
        assert_eq!(Error::Signing("bad key".to_string()).kind(), ErrorKind::Signing);
    }

    #[test]
    fn display() {
        let e = Error::Overflow { value: 1 << 32, width: Width::U32 };
        assert_eq!(e.to_string(), "Overflow: 4294967296 does not fit in 4 bytes");
        assert_eq!(Error::BadRegId("1234".to_string()).to_string(), "Bad register ID: 1234");
    }
}
