//! Network selection and the address version bytes that go with it.

use crate::util::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network an address belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network, pubkey-hash addresses start with `W`
    #[default]
    Mainnet,
    /// Public test network, pubkey-hash addresses start with `w`
    Testnet,
}

impl Network {
    /// Base58check version byte of pubkey-hash addresses.
    #[must_use]
    #[inline]
    pub fn pubkey_hash_version(self) -> u8 {
        match self {
            Network::Mainnet => 73,
            Network::Testnet => 135,
        }
    }

    /// Base58check version byte of script-hash addresses.
    #[must_use]
    #[inline]
    pub fn script_hash_version(self) -> u8 {
        match self {
            Network::Mainnet => 51,
            Network::Testnet => 88,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Network> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "livenet" => Ok(Network::Mainnet),
            "test" | "testnet" => Ok(Network::Testnet),
            _ => Err(Error::BadArgument(format!("Unknown network: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("TestNet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("regtest".parse::<Network>().unwrap_err().to_string(), "Bad argument: Unknown network: regtest");
        assert_eq!(Network::Testnet.to_string().parse::<Network>().unwrap(), Network::Testnet);
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Network::Testnet).unwrap(), "\"testnet\"");
        assert_eq!(serde_json::from_str::<Network>("\"mainnet\"").unwrap(), Network::Mainnet);
    }
}
