#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*! # wicc-tx

Canonical encoding and signing of common transfer transactions for chains that name senders by
register ID (`<height>-<index>`) instead of a public key.

A common transfer is hashed and serialized into two payloads that every wallet and node must
agree on byte for byte: the signature hash payload and the wire payload. This crate builds both,
runs the hash, sign, append pipeline, and parses wire payloads back.

## Usage
```
use wicc_tx::network::Network;
use wicc_tx::transaction::{CommonTx, build_signature_hash};

let tx = CommonTx {
    valid_height: 100,
    src_reg_id: "100-0".to_string(),
    dest_addr: "wLKf2NqwtHk3BfzK5wMDfbKYN1SC3weyR4".to_string(),
    fees: 100,
    value: 1_000_000,
    network: Network::Testnet,
    ..CommonTx::default()
};
let digest = build_signature_hash(&tx).unwrap();
assert_eq!(digest, build_signature_hash(&tx).unwrap());
```

## Collaborators
Address decoding, hashing and signing are injected through
[`address::AddressResolver`], [`transaction::Digest`] and [`transaction::Signer`]. The stock
implementations are base58check, double SHA-256 and secp256k1 ECDSA.

## Compatibility
Integer layout and header order are parameters ([`transaction::CodecParams`]). Both sides of an
exchange must use the same ones; see [`transaction::HeaderOrder`].
*/

pub mod address;
pub mod network;
pub mod transaction;
pub mod util;
