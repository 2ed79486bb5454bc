//! Codec parameters every party producing or checking a payload has to agree on.

use crate::util::IntFormat;
use serde::{Deserialize, Serialize};

/// Which payload is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Bytes hashed into the signature commitment.
    SignatureHash,
    /// Bytes sent over the wire, signature included.
    Wire,
}

/// Order of the two compact-size header fields, `version` and `tx_type`.
///
/// Compatibility risk: deployed wallet libraries hash `version, tx_type` but put
/// `tx_type, version` on the wire. A payload signed under one order does not verify under
/// another, so both sides must be configured alike.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderOrder {
    /// `tx_type` then `version` in both payloads.
    #[default]
    TypeFirst,
    /// `version` then `tx_type` in both payloads.
    VersionFirst,
    /// `version, tx_type` in the signature hash payload, `tx_type, version` on the wire.
    Legacy,
}

impl HeaderOrder {
    /// Whether `version` precedes `tx_type` in `payload`.
    #[must_use]
    pub fn version_first(self, payload: Payload) -> bool {
        match self {
            HeaderOrder::TypeFirst => false,
            HeaderOrder::VersionFirst => true,
            HeaderOrder::Legacy => payload == Payload::SignatureHash,
        }
    }
}

/// Layout parameters of the common transfer codec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecParams {
    /// Layout of width-bounded integers
    pub int_format: IntFormat,
    /// Order of the header fields
    pub header_order: HeaderOrder,
}

impl CodecParams {
    /// Layout the deployed wallet libraries produce: packed integers and the legacy header
    /// order.
    #[must_use]
    pub fn wallet_compat() -> Self {
        CodecParams {
            int_format: IntFormat::Packed,
            header_order: HeaderOrder::Legacy,
        }
    }
}
