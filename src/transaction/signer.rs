//! Signing pipeline: hash payload, digest, external signature, wire payload.
//!
//! The digest and signature primitives are injected through the [`Digest`] and [`Signer`] traits,
//! both also implemented for plain closures. [`Sha256d`] and [`EcdsaSigner`] are the stock
//! implementations the chain uses.
use crate::address::{AddressResolver, Base58Resolver};
use crate::transaction::common_tx::check_signature;
use crate::transaction::{CodecParams, CommonTx, SignedCommonTx};
use crate::util::{Error, Hash256, Result, sha256d};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, SignOnly, ecdsa};
use std::fmt;

/// Hashes a payload into the 32-byte commitment that gets signed.
pub trait Digest {
    /// Digest of `payload`. Must be deterministic.
    fn digest(&self, payload: &[u8]) -> Hash256;
}

impl<F> Digest for F
where
    F: Fn(&[u8]) -> Hash256,
{
    fn digest(&self, payload: &[u8]) -> Hash256 {
        self(payload)
    }
}

/// Double SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256d;

impl Digest for Sha256d {
    fn digest(&self, payload: &[u8]) -> Hash256 {
        sha256d(payload)
    }
}

/// Signs a digest with a private key.
pub trait Signer {
    /// Signature bytes for `digest`.
    ///
    /// # Errors
    /// Any error if the key or digest is rejected; the pipeline reports it as
    /// `Error::Signing`.
    fn sign(&self, digest: &Hash256, private_key: &[u8]) -> Result<Vec<u8>>;
}

impl<F> Signer for F
where
    F: Fn(&Hash256, &[u8]) -> Result<Vec<u8>>,
{
    fn sign(&self, digest: &Hash256, private_key: &[u8]) -> Result<Vec<u8>> {
        self(digest, private_key)
    }
}

/// secp256k1 ECDSA with RFC 6979 nonces, low-S, DER encoded.
pub struct EcdsaSigner {
    secp: Secp256k1<SignOnly>,
}

impl EcdsaSigner {
    /// Creates a signer with its own signing context.
    #[must_use]
    pub fn new() -> Self {
        EcdsaSigner {
            secp: Secp256k1::signing_only(),
        }
    }

    /// Compressed public key of a 32-byte private key.
    ///
    /// # Errors
    /// `Error::Signing` for an invalid private key.
    pub fn public_key(&self, private_key: &[u8]) -> Result<[u8; 33]> {
        let secret_key = secret_key(private_key)?;
        Ok(PublicKey::from_secret_key(&self.secp, &secret_key).serialize())
    }
}

impl Default for EcdsaSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("EcdsaSigner")
    }
}

fn secret_key(private_key: &[u8]) -> Result<SecretKey> {
    if private_key.len() != 32 {
        return Err(Error::Signing(format!("Private key must be 32 bytes, got {}", private_key.len())));
    }
    SecretKey::from_slice(private_key).map_err(|e| Error::Signing(format!("Invalid private key: {}", e)))
}

impl Signer for EcdsaSigner {
    fn sign(&self, digest: &Hash256, private_key: &[u8]) -> Result<Vec<u8>> {
        let secret_key = secret_key(private_key)?;
        let message = Message::from_digest(digest.0);
        let mut signature = self.secp.sign_ecdsa(&message, &secret_key);
        signature.normalize_s();
        Ok(signature.serialize_der().to_vec())
    }
}

/// Checks a DER signature over `digest` against a serialized public key.
///
/// # Errors
/// `Error::Secp256k1Error` if the signature or key cannot be parsed, `Error::BadSignature` if
/// they do not match.
pub fn verify_ecdsa(digest: &Hash256, signature: &[u8], public_key: &[u8]) -> Result<()> {
    let secp = Secp256k1::verification_only();
    let signature = ecdsa::Signature::from_der(signature)?;
    let public_key = PublicKey::from_slice(public_key)?;
    let message = Message::from_digest(digest.0);
    secp.verify_ecdsa(&message, &signature, &public_key)
        .map_err(|_| Error::BadSignature)
}

/// Signs common transfers with an injected address resolver, digest and signer.
pub struct TxSigner<R = Base58Resolver, D = Sha256d, S = EcdsaSigner> {
    resolver: R,
    digest: D,
    signer: S,
    params: CodecParams,
}

impl TxSigner {
    /// Signer with base58check addresses, double SHA-256 and secp256k1 ECDSA.
    #[must_use]
    pub fn new(params: CodecParams) -> Self {
        TxSigner::with_collaborators(Base58Resolver, Sha256d, EcdsaSigner::new(), params)
    }
}

impl Default for TxSigner {
    fn default() -> Self {
        TxSigner::new(CodecParams::default())
    }
}

impl<R, D, S> TxSigner<R, D, S> {
    /// Signer built from explicit collaborators.
    #[must_use]
    pub fn with_collaborators(resolver: R, digest: D, signer: S, params: CodecParams) -> Self {
        TxSigner {
            resolver,
            digest,
            signer,
            params,
        }
    }

    /// Codec parameters payloads are built with.
    #[must_use]
    pub fn params(&self) -> CodecParams {
        self.params
    }
}

impl<R: AddressResolver, D: Digest, S: Signer> TxSigner<R, D, S> {
    /// Digest of the signature hash payload. Pure: repeated calls give the same value.
    ///
    /// # Errors
    /// Decode failures from the register ID, the address or an integer width.
    pub fn signature_hash(&self, tx: &CommonTx) -> Result<Hash256> {
        tx.resolve(&self.resolver)?.signature_hash(&self.params, &self.digest)
    }

    /// Resolves, hashes and signs the transaction.
    ///
    /// # Errors
    /// Decode failures as [`TxSigner::signature_hash`], `Error::Signing` if the signer fails or
    /// returns a signature too long for the wire.
    pub fn sign(&self, tx: &CommonTx, private_key: &[u8]) -> Result<SignedCommonTx> {
        let body = tx.resolve(&self.resolver)?;
        let payload = body.signature_payload(&self.params)?;
        let digest = self.digest.digest(&payload);
        tracing::debug!(payload = %hex::encode(&payload), digest = %digest.to_hex(), "signature hash");
        let signature = self.signer.sign(&digest, private_key).map_err(|e| {
            tracing::debug!(error = %e, "signer rejected digest");
            match e {
                Error::Signing(s) => Error::Signing(s),
                other => Error::Signing(other.to_string()),
            }
        })?;
        check_signature(&signature)?;
        tracing::trace!(len = signature.len(), "signature attached");
        Ok(body.into_signed(signature))
    }

    /// Signs the transaction and returns its wire payload as lowercase hex.
    ///
    /// # Errors
    /// As [`TxSigner::sign`].
    pub fn sign_and_serialize(&self, tx: &CommonTx, private_key: &[u8]) -> Result<String> {
        self.sign(tx, private_key)?.to_hex(&self.params)
    }

    /// Checks `signed` against the sender's public key with this signer's digest and parameters.
    ///
    /// # Errors
    /// As [`SignedCommonTx::verify`].
    pub fn verify(&self, signed: &SignedCommonTx, public_key: &[u8]) -> Result<()> {
        signed.verify(&self.params, &self.digest, public_key)
    }
}

/// Signature hash of `tx` with the default collaborators and parameters.
///
/// # Errors
/// As [`TxSigner::signature_hash`].
pub fn build_signature_hash(tx: &CommonTx) -> Result<Hash256> {
    TxSigner::default().signature_hash(tx)
}

/// Signs `tx` with the default collaborators and parameters and returns the wire payload hex.
///
/// # Errors
/// As [`TxSigner::sign`].
pub fn sign_and_serialize(tx: &CommonTx, private_key: &[u8]) -> Result<String> {
    TxSigner::default().sign_and_serialize(tx, private_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressKind;
    use crate::network::Network;
    use crate::transaction::MAX_SIGNATURE_SIZE;
    use crate::util::ErrorKind;
    use bitcoin_hashes::Hash;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const KEY: [u8; 32] = [1; 32];

    fn transfer() -> CommonTx {
        CommonTx {
            tx_type: 1,
            version: 1,
            valid_height: 100,
            src_reg_id: "100-0".to_string(),
            dest_addr: "wLKf2NqwtHk3BfzK5wMDfbKYN1SC3weyR4".to_string(),
            fees: 100,
            value: 1_000_000,
            contract: vec![],
            network: Network::Testnet,
        }
    }

    #[test]
    fn ecdsa_known_vector() -> Result<()> {
        // RFC 6979 vector: key 1, sha256("Satoshi Nakamoto")
        let mut key = [0u8; 32];
        key[31] = 1;
        let digest = Hash256(hex!("a0dc65ffca799873cbea0ac274015b9526505daaaed385155425f7337704883e"));
        let signer = EcdsaSigner::new();
        let signature = signer.sign(&digest, &key)?;
        assert_eq!(
            hex::encode(&signature),
            "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8\
             02202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
        );
        verify_ecdsa(&digest, &signature, &signer.public_key(&key)?)
    }

    #[test]
    fn ecdsa_bad_key() {
        let signer = EcdsaSigner::new();
        let digest = Hash256([7; 32]);
        let err = signer.sign(&digest, &[0; 32]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
        let err = signer.sign(&digest, &[1; 31]).unwrap_err();
        assert_eq!(err.to_string(), "Signing failed: Private key must be 32 bytes, got 31");
    }

    #[test]
    fn verify_mismatch() -> Result<()> {
        let signer = EcdsaSigner::new();
        let digest = Hash256([7; 32]);
        let signature = signer.sign(&digest, &KEY)?;
        let public_key = signer.public_key(&KEY)?;
        assert!(matches!(verify_ecdsa(&Hash256([8; 32]), &signature, &public_key), Err(Error::BadSignature)));
        assert!(matches!(verify_ecdsa(&digest, &[0x30, 0x00], &public_key), Err(Error::Secp256k1Error(_))));
        Ok(())
    }

    #[test]
    fn sign_and_serialize_end_to_end() -> Result<()> {
        let hex = sign_and_serialize(&transfer(), &KEY)?;
        assert_eq!(
            hex,
            "0101640000000664000000000014079b9296a00a2b655787fa90e66ec3cde4bf1c8c\
             640000000000000040420f000000000000\
             4630440220273c2542a06069368c3191c1068aad2471d564ebbd593231a06d58fd2e34d0f5\
             02207ca6bafebfd461582aab5ff432f6733b187290577e5d092adc03f174c7beb5c4"
        );
        // version, tx_type, then the 4-byte valid height
        assert!(hex.starts_with("010164000000"));
        assert_eq!(sign_and_serialize(&transfer(), &KEY)?, hex);
        Ok(())
    }

    #[test]
    fn signature_hash_is_pure() -> Result<()> {
        let tx = transfer();
        let h1 = build_signature_hash(&tx)?;
        let h2 = build_signature_hash(&tx)?;
        assert_eq!(h1, h2);
        assert_eq!(h1.to_hex(), "a14033c65703bf6bd97b62068e986668203b4175ddd624263a9313ae5ea9fd06");
        assert_eq!(tx, transfer());
        Ok(())
    }

    #[test]
    fn wallet_compat_end_to_end() -> Result<()> {
        let signer = TxSigner::new(CodecParams::wallet_compat());
        assert_eq!(
            signer.signature_hash(&transfer())?.to_hex(),
            "b524306236754ecc24ab030bab8c1a44e317c445d74e25230211a711aee904e6"
        );
        assert_eq!(
            signer.sign_and_serialize(&transfer(), &KEY)?,
            "01016402640014079b9296a00a2b655787fa90e66ec3cde4bf1c8c64bc834000\
             46304402201c4697fbd7dd8c35d8fd03887134f8db2fd56d70293fbe5a18585563ab85e52f\
             02204d7a2db7828865babc20b9a7896b483e9d79254d21b0eab2466e9c5d7355d7e4"
        );
        Ok(())
    }

    #[test]
    fn injected_collaborators_agree() -> Result<()> {
        let resolver = |text: &str, network: Network, kind: AddressKind| -> Result<Vec<u8>> {
            crate::address::resolve_address(text, network, kind)
        };
        let digest = |payload: &[u8]| -> Hash256 { sha256d(payload) };
        let ecdsa = EcdsaSigner::new();
        let sign = move |digest: &Hash256, key: &[u8]| -> Result<Vec<u8>> { ecdsa.sign(digest, key) };
        let injected = TxSigner::with_collaborators(resolver, digest, sign, CodecParams::default());
        assert_eq!(
            injected.sign_and_serialize(&transfer(), &KEY)?,
            TxSigner::default().sign_and_serialize(&transfer(), &KEY)?
        );
        Ok(())
    }

    #[test]
    fn signer_failure_is_signing_kind() {
        let refuse = |_: &Hash256, _: &[u8]| -> Result<Vec<u8>> { Err(Error::BadArgument("hsm offline".to_string())) };
        let signer = TxSigner::with_collaborators(Base58Resolver, Sha256d, refuse, CodecParams::default());
        let err = signer.sign(&transfer(), &KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);
        assert_eq!(err.to_string(), "Signing failed: Bad argument: hsm offline");
    }

    #[test]
    fn decode_failure_before_signing() {
        let mut tx = transfer();
        tx.src_reg_id = "1234".to_string();
        let err = sign_and_serialize(&tx, &KEY).unwrap_err();
        assert!(matches!(err, Error::BadRegId(_)));
        assert_eq!(err.kind(), ErrorKind::Decode);

        let mut tx = transfer();
        tx.valid_height = 1 << 32;
        assert!(matches!(build_signature_hash(&tx), Err(Error::Overflow { .. })));

        let mut tx = transfer();
        tx.network = Network::Mainnet;
        assert!(matches!(sign_and_serialize(&tx, &KEY), Err(Error::BadAddress(_))));
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TxSigner>();
        assert_send_sync::<SignedCommonTx>();

        let signer = TxSigner::default();
        let expected = signer.sign_and_serialize(&transfer(), &KEY).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| signer.sign_and_serialize(&transfer(), &KEY).unwrap())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn signed_verifies() -> Result<()> {
        let signer = TxSigner::default();
        let signed = signer.sign(&transfer(), &KEY)?;
        let public_key = EcdsaSigner::new().public_key(&KEY)?;
        assert_eq!(public_key, hex!("031b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f"));
        signed.verify(&signer.params(), &Sha256d, &public_key)?;
        signer.verify(&signed, &public_key)?;
        assert_eq!(signed.txid(&signer.params(), &Sha256d)?, signer.signature_hash(&transfer())?);
        Ok(())
    }

    #[test]
    fn verify_uses_injected_digest() -> Result<()> {
        let single = |payload: &[u8]| -> Hash256 { Hash256(bitcoin_hashes::sha256::Hash::hash(payload).to_byte_array()) };
        let signer = TxSigner::with_collaborators(Base58Resolver, single, EcdsaSigner::new(), CodecParams::default());
        let signed = signer.sign(&transfer(), &KEY)?;
        let public_key = EcdsaSigner::new().public_key(&KEY)?;
        signer.verify(&signed, &public_key)?;
        signed.verify(&signer.params(), &single, &public_key)?;
        assert_eq!(signed.txid(&signer.params(), &single)?, signer.signature_hash(&transfer())?);
        assert!(matches!(signed.verify(&signer.params(), &Sha256d, &public_key), Err(Error::BadSignature)));
        Ok(())
    }

    #[test]
    fn oversize_signature_is_signing_failure() {
        let long = |_: &Hash256, _: &[u8]| -> Result<Vec<u8>> { Ok(vec![0x30; MAX_SIGNATURE_SIZE + 1]) };
        let signer = TxSigner::with_collaborators(Base58Resolver, Sha256d, long, CodecParams::default());
        let err = signer.sign(&transfer(), &KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Signing);

        let fits = |_: &Hash256, _: &[u8]| -> Result<Vec<u8>> { Ok(vec![0x30; MAX_SIGNATURE_SIZE]) };
        let signer = TxSigner::with_collaborators(Base58Resolver, Sha256d, fits, CodecParams::default());
        let hex = signer.sign_and_serialize(&transfer(), &KEY).unwrap();
        let decoded = SignedCommonTx::from_hex(&hex, &signer.params()).unwrap();
        assert_eq!(decoded.signature.len(), MAX_SIGNATURE_SIZE);
    }
}
