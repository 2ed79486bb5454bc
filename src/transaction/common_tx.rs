//! Common transfer: one sender register ID paying coins to one address.
//!
//! A [`CommonTx`] is the plain field set. Resolving it gives a [`CommonTxBody`], the unsigned
//! transaction whose signature hash payload is fixed. Attaching a signature gives a
//! [`SignedCommonTx`], the only form that can be put on the wire.

use crate::address::{self, AddressKind, AddressResolver};
use crate::network::Network;
use crate::transaction::signer::{Digest, verify_ecdsa};
use crate::transaction::{CodecParams, Payload, RegId, Serializable};
use crate::util::{ByteReader, ByteWriter, Error, Hash160, Hash256, Result, Width, var_int};
use serde::{Deserialize, Serialize};

/// Type tag of the common transfer.
pub const COMMON_TX: u64 = 3;
/// Current transaction format version.
pub const TX_VERSION: u64 = 1;
/// Largest contract payload accepted when decoding. Encoding takes any length.
pub const MAX_CONTRACT_SIZE: usize = 4096;
/// Largest signature that can be put on the wire or read from it.
pub const MAX_SIGNATURE_SIZE: usize = 128;

fn default_tx_type() -> u64 {
    COMMON_TX
}

fn default_version() -> u64 {
    TX_VERSION
}

/// Field set of a common transfer as a wallet constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommonTx {
    /// Transaction type tag
    #[serde(default = "default_tx_type")]
    pub tx_type: u64,
    /// Format version
    #[serde(default = "default_version")]
    pub version: u64,
    /// Last block height the transaction may be mined at
    pub valid_height: u64,
    /// Sender register ID, `<height>-<index>`
    pub src_reg_id: String,
    /// Destination address text
    pub dest_addr: String,
    /// Fees paid to the miner
    pub fees: u64,
    /// Amount transferred
    pub value: u64,
    /// Opaque contract payload, usually empty
    #[serde(default, with = "hex::serde")]
    pub contract: Vec<u8>,
    /// Network the destination address belongs to
    #[serde(default)]
    pub network: Network,
}

impl Default for CommonTx {
    fn default() -> Self {
        CommonTx {
            tx_type: COMMON_TX,
            version: TX_VERSION,
            valid_height: 0,
            src_reg_id: String::new(),
            dest_addr: String::new(),
            fees: 0,
            value: 0,
            contract: Vec::new(),
            network: Network::default(),
        }
    }
}

impl CommonTx {
    /// Splits the register ID and resolves the destination address.
    ///
    /// The register ID is checked first, so a malformed one never reaches the resolver.
    ///
    /// # Errors
    /// `Error::BadRegId`, or whatever the resolver reports for the address.
    pub fn resolve<R: AddressResolver + ?Sized>(&self, resolver: &R) -> Result<CommonTxBody> {
        let src_reg_id = self.src_reg_id.parse::<RegId>()?;
        let dest_hash = resolver.resolve(&self.dest_addr, self.network, AddressKind::PubKeyHash)?;
        Ok(CommonTxBody {
            tx_type: self.tx_type,
            version: self.version,
            valid_height: self.valid_height,
            src_reg_id,
            dest_hash,
            fees: self.fees,
            value: self.value,
            contract: self.contract.clone(),
        })
    }
}

/// Unsigned common transfer with the register ID split and the address resolved.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct CommonTxBody {
    /// Transaction type tag
    pub tx_type: u64,
    /// Format version
    pub version: u64,
    /// Last block height the transaction may be mined at, at most `u32::MAX`
    pub valid_height: u64,
    /// Sender register ID
    pub src_reg_id: RegId,
    /// Raw destination hash, 1 to 255 bytes
    pub dest_hash: Vec<u8>,
    /// Fees paid to the miner
    pub fees: u64,
    /// Amount transferred
    pub value: u64,
    /// Opaque contract payload
    pub contract: Vec<u8>,
}

impl CommonTxBody {
    fn write_fields(&self, writer: &mut ByteWriter, params: &CodecParams, payload: Payload) -> Result<()> {
        if self.dest_hash.is_empty() || self.dest_hash.len() > usize::from(u8::MAX) {
            return Err(Error::BadAddress(format!("Destination hash of {} bytes", self.dest_hash.len())));
        }
        if params.header_order.version_first(payload) {
            writer.write_var_int(self.version)?;
            writer.write_var_int(self.tx_type)?;
        } else {
            writer.write_var_int(self.tx_type)?;
            writer.write_var_int(self.version)?;
        }
        writer.write_fixed(self.valid_height, Width::U32)?;
        self.src_reg_id.write(writer, params)?;
        writer.write_short_bytes(&self.dest_hash)?;
        writer.write_fixed(self.fees, Width::U64)?;
        writer.write_fixed(self.value, Width::U64)?;
        writer.write_var_bytes(&self.contract)
    }

    fn size_hint(&self) -> usize {
        40 + self.dest_hash.len() + self.contract.len()
    }

    /// Bytes hashed into the signature commitment. The signature is never part of them.
    ///
    /// # Errors
    /// `Error::Overflow` for a field wider than its width, `Error::BadAddress` for a
    /// destination hash that cannot be length-prefixed.
    pub fn signature_payload(&self, params: &CodecParams) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::with_capacity(params.int_format, self.size_hint());
        self.write_fields(&mut writer, params, Payload::SignatureHash)?;
        Ok(writer.into_bytes())
    }

    /// Digest of the signature hash payload.
    ///
    /// # Errors
    /// As [`CommonTxBody::signature_payload`].
    pub fn signature_hash<D: Digest + ?Sized>(&self, params: &CodecParams, digest: &D) -> Result<Hash256> {
        Ok(digest.digest(&self.signature_payload(params)?))
    }

    /// Attaches a signature.
    #[must_use]
    pub fn into_signed(self, signature: Vec<u8>) -> SignedCommonTx {
        SignedCommonTx { body: self, signature }
    }

    /// Field set with the destination rendered as a pubkey-hash address of `network`.
    ///
    /// # Errors
    /// `Error::BadAddress` if the destination is not a 20-byte hash.
    pub fn to_common_tx(&self, network: Network) -> Result<CommonTx> {
        let hash: [u8; 20] = self.dest_hash.as_slice().try_into().map_err(|_| {
            Error::BadAddress(format!("Destination hash of {} bytes", self.dest_hash.len()))
        })?;
        Ok(CommonTx {
            tx_type: self.tx_type,
            version: self.version,
            valid_height: self.valid_height,
            src_reg_id: self.src_reg_id.to_string(),
            dest_addr: address::from_hash(network, AddressKind::PubKeyHash, &Hash160(hash)),
            fees: self.fees,
            value: self.value,
            contract: self.contract.clone(),
            network,
        })
    }
}

/// Common transfer with its signature attached.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct SignedCommonTx {
    /// Signed fields
    pub body: CommonTxBody,
    /// Raw signature bytes
    pub signature: Vec<u8>,
}

/// Checks that a signature fits the wire.
///
/// # Errors
/// `Error::Signing` if it is longer than [`MAX_SIGNATURE_SIZE`].
pub(crate) fn check_signature(signature: &[u8]) -> Result<()> {
    if signature.len() > MAX_SIGNATURE_SIZE {
        return Err(Error::Signing(format!(
            "Signature of {} bytes exceeds {}",
            signature.len(),
            MAX_SIGNATURE_SIZE
        )));
    }
    Ok(())
}

impl SignedCommonTx {
    /// Wire payload: the signed fields, then the compact-size signature length and signature.
    ///
    /// # Errors
    /// As [`CommonTxBody::signature_payload`], and `Error::Signing` for a signature longer
    /// than [`MAX_SIGNATURE_SIZE`].
    pub fn serialize(&self, params: &CodecParams) -> Result<Vec<u8>> {
        let capacity = self.body.size_hint() + var_int::size(self.signature.len() as u64) + self.signature.len();
        let mut writer = ByteWriter::with_capacity(params.int_format, capacity);
        self.write(&mut writer, params)?;
        Ok(writer.into_bytes())
    }

    /// Wire payload as lowercase hex.
    ///
    /// # Errors
    /// As [`SignedCommonTx::serialize`].
    pub fn to_hex(&self, params: &CodecParams) -> Result<String> {
        Ok(hex::encode(self.serialize(params)?))
    }

    /// Parses a wire payload.
    ///
    /// # Errors
    /// `Error::IOError` or `Error::BadData` for truncated, oversize or trailing data, and any
    /// register ID block or integer decoding error.
    pub fn deserialize(bytes: &[u8], params: &CodecParams) -> Result<SignedCommonTx> {
        let mut reader = ByteReader::new(bytes, params.int_format);
        Self::read(&mut reader, params)
            .and_then(|tx| reader.finish().map(|()| tx))
            .inspect_err(|e| {
                tracing::debug!(error = %e, len = bytes.len(), "rejected common transfer payload");
            })
    }

    /// Parses a hex wire payload.
    ///
    /// # Errors
    /// `Error::FromHexError`, or as [`SignedCommonTx::deserialize`].
    pub fn from_hex(s: &str, params: &CodecParams) -> Result<SignedCommonTx> {
        Self::deserialize(&hex::decode(s)?, params)
    }

    /// Transaction id: the digest of the signature hash payload.
    ///
    /// # Errors
    /// As [`CommonTxBody::signature_payload`].
    pub fn txid<D: Digest + ?Sized>(&self, params: &CodecParams, digest: &D) -> Result<Hash256> {
        self.body.signature_hash(params, digest)
    }

    /// Checks the DER secp256k1 signature against the sender's serialized public key, over the
    /// payload hashed with `digest`.
    ///
    /// # Errors
    /// `Error::BadSignature` on mismatch, `Error::Secp256k1Error` for unparsable key or
    /// signature.
    pub fn verify<D: Digest + ?Sized>(&self, params: &CodecParams, digest: &D, public_key: &[u8]) -> Result<()> {
        verify_ecdsa(&self.txid(params, digest)?, &self.signature, public_key)
    }
}

impl Serializable<SignedCommonTx> for SignedCommonTx {
    fn read(reader: &mut ByteReader, params: &CodecParams) -> Result<SignedCommonTx> {
        let first = reader.read_var_int()?;
        let second = reader.read_var_int()?;
        let (tx_type, version) = if params.header_order.version_first(Payload::Wire) {
            (second, first)
        } else {
            (first, second)
        };
        let valid_height = reader.read_fixed(Width::U32)?;
        let src_reg_id = RegId::read(reader, params)?;
        let dest_hash = reader.read_short_bytes()?;
        if dest_hash.is_empty() {
            return Err(Error::BadData("Empty destination".to_string()));
        }
        let fees = reader.read_fixed(Width::U64)?;
        let value = reader.read_fixed(Width::U64)?;
        let contract = reader.read_var_bytes(MAX_CONTRACT_SIZE)?;
        let signature = reader.read_var_bytes(MAX_SIGNATURE_SIZE)?;
        let body = CommonTxBody {
            tx_type,
            version,
            valid_height,
            src_reg_id,
            dest_hash,
            fees,
            value,
            contract,
        };
        Ok(body.into_signed(signature))
    }

    fn write(&self, writer: &mut ByteWriter, params: &CodecParams) -> Result<()> {
        check_signature(&self.signature)?;
        self.body.write_fields(writer, params, Payload::Wire)?;
        writer.write_var_bytes(&self.signature)
    }
}
