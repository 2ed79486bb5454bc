//! 256-bit digest used as the signature commitment and transaction id.
use crate::util::{Error, Result};
use bitcoin_hashes::{Hash, sha256d as bh_sha256d};
use std::fmt;

/// 256-bit hash of a payload.
///
/// Bytes are kept in digest order. [`Hash256::encode`] renders them reversed, as the chain's
/// explorers and RPC display transaction ids.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Converts the hash into a display-order (reversed) hex string.
    #[must_use]
    #[inline]
    pub fn encode(&self) -> String {
        let mut r = self.0;
        r.reverse();
        hex::encode(r)
    }

    /// Converts a string of 64 display-order hex characters into a hash.
    ///
    /// # Errors
    /// `Error::FromHexError` for bad hex, `Error::BadArgument` for a wrong length.
    pub fn decode(s: &str) -> Result<Hash256> {
        let mut hash_bytes = Self::from_hex(s)?;
        hash_bytes.0.reverse();
        Ok(hash_bytes)
    }

    /// Parses 64 hex characters in digest order.
    ///
    /// # Errors
    /// `Error::FromHexError` for bad hex, `Error::BadArgument` for a wrong length.
    pub fn from_hex(s: &str) -> Result<Hash256> {
        let decoded_bytes = hex::decode(s)?;
        let hash_bytes: [u8; 32] = decoded_bytes
            .try_into()
            .map_err(|v: Vec<u8>| Error::BadArgument(format!("Length {} of decoded bytes", v.len())))?;
        Ok(Hash256(hash_bytes))
    }

    /// Hex string in digest order, the bytes a signer receives.
    #[must_use]
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Hashes a data array twice using SHA256.
#[must_use]
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    Hash256(bh_sha256d::Hash::hash(data).to_byte_array())
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
