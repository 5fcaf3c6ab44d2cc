//! Dilithium (round 2) lattice signatures
//!
//! Four parameter sets are provided as type aliases, [`Dilithium1`] through
//! [`Dilithium4`], all backed by the generic [`Dilithium`] type. Security
//! rests on Module-LWE and Module-SIS over `Z_q[X]/(X^256 + 1)` with
//! `q = 8380417`.
//!
//! Internal layout:
//! - `sampling.rs`: XOF-driven rejection samplers, scalar and four-way
//! - `polyvec.rs`: vectors, the public matrix and ExpandA
//! - `arithmetic.rs`: Power2Round, Decompose, MakeHint and UseHint
//! - `challenge.rs`: the sparse challenge polynomial
//! - `encoding.rs`: byte layouts of keys and signatures
//! - `sign.rs`: key generation, the signing loop and verification

use core::fmt;
use core::marker::PhantomData;

use latsig_api::error::ResultExt;
use latsig_api::{
    Error as ApiError, Result as ApiResult, Signature as SignatureTrait, SignatureDerive,
    SignatureSerialize, SignedMessage,
};
use latsig_params::pqc::dilithium::{
    Dilithium1Params, Dilithium2Params, Dilithium3Params, Dilithium4Params, DilithiumParams,
};
use rand::{CryptoRng, RngCore};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

mod arithmetic;
mod challenge;
mod encoding;
mod polyvec;
mod sampling;
mod sign;

pub use sign::KEYGEN_SEED_BYTES;

/// Dilithium public key: packed `rho ‖ t1`
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilithiumPublicKey(pub(crate) Vec<u8>);

/// Dilithium secret key: packed `rho ‖ key ‖ tr ‖ s1 ‖ s2 ‖ t0`
///
/// The bytes are wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilithiumSecretKey(pub(crate) Vec<u8>);

/// Dilithium signature: packed `z ‖ h ‖ c`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DilithiumSignatureData(pub(crate) Vec<u8>);

impl fmt::Debug for DilithiumSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DilithiumSecretKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for DilithiumPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for DilithiumSignatureData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl DilithiumSignatureData {
    /// Signature length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty byte string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Generic Dilithium signature scheme.
///
/// `K` and `L` are the matrix dimensions of the parameter set `P`; use the
/// [`Dilithium1`] .. [`Dilithium4`] aliases rather than spelling them out.
pub struct Dilithium<P, const K: usize, const L: usize> {
    _params: PhantomData<P>,
}

fn check_len(context: &'static str, bytes: &[u8], expected: usize) -> ApiResult<()> {
    if bytes.len() != expected {
        return Err(ApiError::InvalidLength {
            context,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl<P, const K: usize, const L: usize> SignatureTrait for Dilithium<P, K, L>
where
    P: DilithiumParams<K, L>,
{
    type PublicKey = DilithiumPublicKey;
    type SecretKey = DilithiumSecretKey;
    type SignatureData = DilithiumSignatureData;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (pk, sk) = sign::keypair_internal::<P, R, K, L>(rng).map_err(ApiError::from)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk)))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    /// Deterministic: the same key and message always give the same signature.
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        let sig = sign::sign_internal::<P, K, L>(message, &secret_key.0).map_err(ApiError::from)?;
        Ok(DilithiumSignatureData(sig))
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        sign::verify_internal::<P, K, L>(message, &signature.0, &public_key.0)
            .map_err(ApiError::from)
    }
}

impl<P, const K: usize, const L: usize> SignatureSerialize for Dilithium<P, K, L>
where
    P: DilithiumParams<K, L>,
{
    const PUBLIC_KEY_SIZE: usize = P::PUBLIC_KEY_BYTES;
    const SECRET_KEY_SIZE: usize = P::SECRET_KEY_BYTES;
    const SIGNATURE_SIZE: usize = P::SIGNATURE_BYTES;

    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
        key.0.clone()
    }

    fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
        check_len("Dilithium public key", bytes, P::PUBLIC_KEY_BYTES)?;
        Ok(DilithiumPublicKey(bytes.to_vec()))
    }

    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(key.0.clone())
    }

    fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
        check_len("Dilithium secret key", bytes, P::SECRET_KEY_BYTES)?;
        Ok(DilithiumSecretKey(bytes.to_vec()))
    }

    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
        sig.0.clone()
    }

    fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
        check_len("Dilithium signature", bytes, P::SIGNATURE_BYTES)?;
        Ok(DilithiumSignatureData(bytes.to_vec()))
    }
}

impl<P, const K: usize, const L: usize> SignatureDerive for Dilithium<P, K, L>
where
    P: DilithiumParams<K, L>,
{
    const MIN_SEED_SIZE: usize = KEYGEN_SEED_BYTES;

    /// Uses the first [`KEYGEN_SEED_BYTES`] bytes of `seed` as `rho ‖ rhoprime ‖ key`.
    fn derive_keypair(seed: &[u8]) -> ApiResult<Self::KeyPair> {
        if seed.len() < Self::MIN_SEED_SIZE {
            return Err(ApiError::InvalidParameter {
                context: "Dilithium::derive_keypair",
                message: format!(
                    "Seed too short: minimum {} bytes required",
                    Self::MIN_SEED_SIZE
                ),
            });
        }
        let mut seed_array = Zeroizing::new([0u8; KEYGEN_SEED_BYTES]);
        seed_array.copy_from_slice(&seed[..KEYGEN_SEED_BYTES]);
        Self::keypair_from_seed(&seed_array)
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        let pk = sign::derive_public_key_internal::<P, K, L>(&secret_key.0)
            .with_context("Dilithium::derive_public_key")?;
        Ok(DilithiumPublicKey(pk))
    }
}

impl<P, const K: usize, const L: usize> SignedMessage for Dilithium<P, K, L>
where
    P: DilithiumParams<K, L>,
{
    fn sign_message(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Vec<u8>> {
        let sig = Self::sign(message, secret_key)?;
        let mut signed = Vec::with_capacity(sig.len() + message.len());
        signed.extend_from_slice(&sig.0);
        signed.extend_from_slice(message);
        Ok(signed)
    }

    fn open(signed_message: &[u8], public_key: &Self::PublicKey) -> ApiResult<Vec<u8>> {
        let (sig, message) = Self::split_signed(signed_message)?;
        sign::verify_internal::<P, K, L>(message, sig, &public_key.0).map_err(ApiError::from)?;
        Ok(message.to_vec())
    }
}

impl<P, const K: usize, const L: usize> Dilithium<P, K, L>
where
    P: DilithiumParams<K, L>,
{
    /// Key generation from an explicit `rho ‖ rhoprime ‖ key` seed.
    pub fn keypair_from_seed(
        seed: &[u8; KEYGEN_SEED_BYTES],
    ) -> ApiResult<(DilithiumPublicKey, DilithiumSecretKey)> {
        let (pk, sk) = sign::keypair_from_seed::<P, K, L>(seed).map_err(ApiError::from)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk)))
    }

    /// Boolean form of [`SignatureTrait::verify`].
    pub fn verify_bool(
        message: &[u8],
        signature: &DilithiumSignatureData,
        public_key: &DilithiumPublicKey,
    ) -> bool {
        <Self as SignatureTrait>::verify(message, signature, public_key).is_ok()
    }

    /// Opens `signature ‖ message` into `out`, returning the message length.
    ///
    /// On any failure, including `out` being too small, `out` is
    /// zero-filled and nothing of the message is written.
    pub fn open_into(
        signed_message: &[u8],
        public_key: &DilithiumPublicKey,
        out: &mut [u8],
    ) -> ApiResult<usize> {
        let result = Self::split_signed(signed_message).and_then(|(sig, message)| {
            if out.len() < message.len() {
                return Err(ApiError::InvalidLength {
                    context: "Dilithium::open_into output",
                    expected: message.len(),
                    actual: out.len(),
                });
            }
            sign::verify_internal::<P, K, L>(message, sig, &public_key.0)
                .map_err(ApiError::from)?;
            Ok(message)
        });

        match result {
            Ok(message) => {
                out[..message.len()].copy_from_slice(message);
                out[message.len()..].fill(0);
                Ok(message.len())
            }
            Err(e) => {
                out.fill(0);
                Err(e)
            }
        }
    }

    fn split_signed(signed_message: &[u8]) -> ApiResult<(&[u8], &[u8])> {
        if signed_message.len() < P::SIGNATURE_BYTES {
            return Err(ApiError::InvalidLength {
                context: "Dilithium signed message",
                expected: P::SIGNATURE_BYTES,
                actual: signed_message.len(),
            });
        }
        Ok(signed_message.split_at(P::SIGNATURE_BYTES))
    }
}

/// Dilithium mode 1 (K = 3, L = 2)
pub type Dilithium1 = Dilithium<Dilithium1Params, 3, 2>;
/// Dilithium mode 2 (K = 4, L = 3)
pub type Dilithium2 = Dilithium<Dilithium2Params, 4, 3>;
/// Dilithium mode 3 (K = 5, L = 4), the recommended parameter set
pub type Dilithium3 = Dilithium<Dilithium3Params, 5, 4>;
/// Dilithium mode 4 (K = 6, L = 5)
pub type Dilithium4 = Dilithium<Dilithium4Params, 6, 5>;
