//! Address handling: base58check encoding/decoding and resolution of address text into the raw
//! hash carried by transactions.
//!
//! The codec never decodes addresses itself; it goes through an [`AddressResolver`].
//! [`Base58Resolver`] is the stock implementation and any
//! `Fn(&str, Network, AddressKind) -> Result<Vec<u8>>` closure works as well.

use crate::network::Network;
use crate::util::{Error, Hash160, Result, hash160, sha256d};
use base58::{FromBase58, ToBase58};

/// What an address pays to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Hash160 of a public key
    #[default]
    PubKeyHash,
    /// Hash160 of a script
    ScriptHash,
}

impl AddressKind {
    /// Version byte of this kind of address on `network`.
    #[must_use]
    #[inline]
    pub fn version(self, network: Network) -> u8 {
        match self {
            AddressKind::PubKeyHash => network.pubkey_hash_version(),
            AddressKind::ScriptHash => network.script_hash_version(),
        }
    }
}

/// Turns address text into the raw hash bytes written into a transaction.
///
/// Implementations must be reentrant; the signer may call them from several threads.
pub trait AddressResolver {
    /// Resolves `address` for `network` and `kind`.
    ///
    /// # Errors
    /// Any error if the text is not a valid address of that network and kind.
    fn resolve(&self, address: &str, network: Network, kind: AddressKind) -> Result<Vec<u8>>;
}

impl<F> AddressResolver for F
where
    F: Fn(&str, Network, AddressKind) -> Result<Vec<u8>>,
{
    fn resolve(&self, address: &str, network: Network, kind: AddressKind) -> Result<Vec<u8>> {
        self(address, network, kind)
    }
}

/// Resolves base58check address text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base58Resolver;

impl AddressResolver for Base58Resolver {
    fn resolve(&self, address: &str, network: Network, kind: AddressKind) -> Result<Vec<u8>> {
        resolve_address(address, network, kind)
    }
}

/// Encodes a base58check address from version byte and 20-byte payload.
///
/// # Errors
/// Returns `Error::BadArgument` if payload is not exactly 20 bytes.
pub fn encode_address(version: u8, payload: &[u8]) -> Result<String> {
    let payload: &[u8; 20] = payload
        .try_into()
        .map_err(|_| Error::BadArgument("Payload must be 20 bytes".to_string()))?;
    Ok(encode_hash(version, payload))
}

fn encode_hash(version: u8, payload: &[u8; 20]) -> String {
    let mut v = [0u8; 25];
    v[0] = version;
    v[1..21].copy_from_slice(payload);
    let checksum = sha256d(&v[..21]);
    v[21..25].copy_from_slice(&checksum.0[..4]);
    v.to_base58()
}

/// Decodes a base58check address into version and payload.
///
/// # Errors
/// Returns `Error::FromBase58Error` on decode failure, `Error::BadAddress` on invalid
/// length/checksum.
pub fn decode_address(input: &str) -> Result<(u8, Vec<u8>)> {
    let bytes = input.from_base58()?;
    if bytes.len() != 25 {
        return Err(Error::BadAddress(format!("{}: invalid length {}", input, bytes.len())));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::BadAddress(format!("{}: invalid checksum", input)));
    }
    Ok((bytes[0], bytes[1..21].to_vec()))
}

/// Decodes address text and checks that it belongs to `network` and `kind`.
///
/// # Errors
/// As [`decode_address`], plus `Error::BadAddress` for a version byte of another network or
/// kind.
pub fn resolve_address(input: &str, network: Network, kind: AddressKind) -> Result<Vec<u8>> {
    let (version, payload) = decode_address(input)?;
    if version != kind.version(network) {
        return Err(Error::BadAddress(format!(
            "{}: version {} is not a {:?} address on {}",
            input, version, kind, network
        )));
    }
    Ok(payload)
}

/// Encodes the address of a hash.
#[must_use]
pub fn from_hash(network: Network, kind: AddressKind, hash: &Hash160) -> String {
    encode_hash(kind.version(network), &hash.0)
}

/// Pubkey-hash address of a serialized public key.
#[must_use]
pub fn from_public_key(network: Network, public_key: &[u8]) -> String {
    from_hash(network, AddressKind::PubKeyHash, &hash160(public_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const TESTNET_ADDR: &str = "wLKf2NqwtHk3BfzK5wMDfbKYN1SC3weyR4";

    #[test]
    fn encode_decode() -> Result<()> {
        let address = encode_address(73, &[0; 20])?;
        assert_eq!(address, "WNg2svm2qApxheBKndKGQ9sRwporvRgRpT");
        let (version, payload) = decode_address(&address)?;
        assert_eq!(version, 73);
        assert_eq!(payload, vec![0; 20]);
        assert_eq!(encode_address(135, &[0; 20])?, "wKdRvfEtrMZHQWphJdy2TvkCy6nM2sRvXd");
        assert_eq!(encode_address(135, &[0; 19]).unwrap_err().to_string(), "Bad argument: Payload must be 20 bytes");
        Ok(())
    }

    #[test]
    fn resolve() -> Result<()> {
        let hash = resolve_address(TESTNET_ADDR, Network::Testnet, AddressKind::PubKeyHash)?;
        assert_eq!(hash, hex!("079b9296a00a2b655787fa90e66ec3cde4bf1c8c"));
        assert_eq!(Base58Resolver.resolve(TESTNET_ADDR, Network::Testnet, AddressKind::PubKeyHash)?, hash);
        let script = from_hash(Network::Testnet, AddressKind::ScriptHash, &Hash160(hash.try_into().unwrap()));
        assert_eq!(script, "cRSJkGqQWoxrkJSEwDhEshXZnJKrdPyMpF");
        Ok(())
    }

    #[test]
    fn resolve_wrong_network_or_kind() {
        let err = resolve_address(TESTNET_ADDR, Network::Mainnet, AddressKind::PubKeyHash).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Bad address: {}: version 135 is not a PubKeyHash address on mainnet", TESTNET_ADDR)
        );
        assert!(resolve_address(TESTNET_ADDR, Network::Testnet, AddressKind::ScriptHash).is_err());
    }

    #[test]
    fn resolve_malformed() {
        let bad_checksum = "wLKf2NqwtHk3BfzK5wMDfbKYN1SC3weyR5";
        assert!(matches!(decode_address(bad_checksum), Err(Error::BadAddress(_))));
        assert!(matches!(decode_address("wLKf2Nqw0"), Err(Error::FromBase58Error(_))));
        assert!(matches!(decode_address("wLKf2Nqw"), Err(Error::BadAddress(_))));
    }

    #[test]
    fn public_key_address() {
        let g = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
        assert_eq!(from_public_key(Network::Testnet, &g), "wWJhUp8WDRR3Yq1gXR5MHnAC6DDu3b6pTC");
        assert_eq!(from_public_key(Network::Mainnet, &g), "WZMJS5eeCEgiqxNK1QRbE1HR4wFQwmCjJV");
    }

    #[test]
    fn closure_resolver() -> Result<()> {
        let fixed = |_: &str, _: Network, _: AddressKind| -> Result<Vec<u8>> { Ok(vec![9; 20]) };
        assert_eq!(fixed.resolve("anything", Network::Mainnet, AddressKind::PubKeyHash)?, vec![9; 20]);
        Ok(())
    }
}
