//! Common transfer encoding and signing.
//!
//! Build a [`CommonTx`], then hash or sign it through a [`TxSigner`] (or the
//! [`build_signature_hash`] / [`sign_and_serialize`] shortcuts that use the default
//! collaborators and [`CodecParams`]).
//!
//! # Examples
//!
//! ```
//! use wicc_tx::network::Network;
//! use wicc_tx::transaction::{CommonTx, SignedCommonTx, CodecParams, sign_and_serialize};
//!
//! let tx = CommonTx {
//!     valid_height: 100,
//!     src_reg_id: "100-0".to_string(),
//!     dest_addr: "wLKf2NqwtHk3BfzK5wMDfbKYN1SC3weyR4".to_string(),
//!     fees: 100,
//!     value: 1_000_000,
//!     network: Network::Testnet,
//!     ..CommonTx::default()
//! };
//! let hex = sign_and_serialize(&tx, &[1; 32]).unwrap();
//! let signed = SignedCommonTx::from_hex(&hex, &CodecParams::default()).unwrap();
//! assert_eq!(signed.body.value, 1_000_000);
//! ```
mod common_tx;
mod params;
mod reg_id;
mod serdes;
mod signer;

pub use self::common_tx::{
    COMMON_TX, CommonTx, CommonTxBody, MAX_CONTRACT_SIZE, MAX_SIGNATURE_SIZE, SignedCommonTx, TX_VERSION,
};
pub use self::params::{CodecParams, HeaderOrder, Payload};
pub use self::reg_id::RegId;
pub use self::serdes::Serializable;
pub use self::signer::{
    Digest, EcdsaSigner, Sha256d, Signer, TxSigner, build_signature_hash, sign_and_serialize, verify_ecdsa,
};
