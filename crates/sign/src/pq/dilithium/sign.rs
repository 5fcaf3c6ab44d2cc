//! Key generation, signing and verification for Dilithium.
//!
//! Signing is Fiat-Shamir with aborts: every attempt samples a fresh
//! masking vector `y` and is thrown away if any of the four rejection
//! checks fires. Only an accepted attempt leaves this module.
//!
//! Coefficient bounds through the pipeline:
//! - NTT inputs `< 2q`, NTT outputs `< 18q`
//! - pointwise products `< 2q`, sums of `L` products `< 2Lq`
//! - `reduce` before every inverse NTT, `csubq`/`freeze` before rounding
//!
//! Signing is deterministic: the seed for `y` is `CRH(key ‖ mu)` and the
//! nonce advances by `L` per attempt.

use latsig_algorithms::poly::polynomial::Poly;
use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use latsig_params::pqc::dilithium::{
    DilithiumParams, CRH_BYTES, DILITHIUM_GAMMA1 as GAMMA1, DILITHIUM_GAMMA2 as GAMMA2, SEED_BYTES,
};
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use tracing::{debug, instrument};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::arithmetic::{polyvec_decompose, polyvec_make_hint, polyvec_power2round, polyvec_use_hint};
use super::challenge::challenge;
use super::encoding::{
    pack_public_key, pack_secret_key, pack_signature, unpack_public_key, unpack_secret_key,
    unpack_signature, SecretKeyParts,
};
use super::polyvec::{expand_matrix, Matrix, NttPolyVec, PolyVec};
use super::sampling::{sample_polyvec_eta, sample_polyvec_gamma1};
use crate::error::{Error as SignError, Result};

/// Length of the key-generation seed `rho ‖ rhoprime ‖ key`
pub const KEYGEN_SEED_BYTES: usize = 3 * SEED_BYTES;

/// Why a signing attempt was discarded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Rejection {
    /// `w0 - c·s2` too large
    LowBits,
    /// `z` too large
    ZNorm,
    /// `c·t0` too large
    Ct0Norm,
    /// More than OMEGA hint bits
    TooManyHints,
}

/// Outcome of one signing attempt
#[derive(Debug)]
pub(crate) enum Attempt<T> {
    Accept(T),
    Retry(Rejection),
}

/// `CRH(parts[0] ‖ parts[1] ‖ ...)`: SHAKE-256 with a 48-byte output
fn crh(parts: &[&[u8]]) -> Result<[u8; CRH_BYTES]> {
    let mut xof = ShakeXof256::new();
    for part in parts {
        xof.update(part).map_err(SignError::from_algo)?;
    }
    let mut out = [0u8; CRH_BYTES];
    xof.squeeze(&mut out).map_err(SignError::from_algo)?;
    Ok(out)
}

/// Computes `t = A·s1 + s2` and splits it into `(t0, t1)`.
fn public_vector<const K: usize, const L: usize>(
    mat: &Matrix<K, L>,
    s1: &PolyVec<L>,
    s2: &PolyVec<K>,
) -> (PolyVec<K>, PolyVec<K>) {
    let s1_hat = Zeroizing::new(s1.ntt());
    let mut t_hat = mat.mul_vec(&s1_hat);
    t_hat.reduce();
    let mut t = t_hat.invntt_montgomery().add(s2);
    t.freeze();
    let split = polyvec_power2round(&t);
    t.zeroize();
    split
}

/// Key generation from a 96-byte seed `rho ‖ rhoprime ‖ key`.
///
/// Returns `(pk, sk)` as packed byte strings.
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME))]
pub(crate) fn keypair_from_seed<P, const K: usize, const L: usize>(
    seed: &[u8; KEYGEN_SEED_BYTES],
) -> Result<(Vec<u8>, Vec<u8>)>
where
    P: DilithiumParams<K, L>,
{
    // Step 1: Split the seed
    let mut rho = [0u8; SEED_BYTES];
    let mut rhoprime = Zeroizing::new([0u8; SEED_BYTES]);
    let mut key = [0u8; SEED_BYTES];
    rho.copy_from_slice(&seed[..SEED_BYTES]);
    rhoprime.copy_from_slice(&seed[SEED_BYTES..2 * SEED_BYTES]);
    key.copy_from_slice(&seed[2 * SEED_BYTES..]);

    // Step 2: Expand A and sample the short secrets
    let mat = expand_matrix::<K, L>(&rho)?;
    let mut sk = SecretKeyParts::<K, L> {
        rho,
        key,
        tr: [0u8; CRH_BYTES],
        s1: sample_polyvec_eta::<L>(&rhoprime, 0, P::ETA)?,
        s2: sample_polyvec_eta::<K>(&rhoprime, L as u16, P::ETA)?,
        t0: PolyVec::zero(),
    };
    key.zeroize();

    // Step 3: t = A·s1 + s2, rounded
    let (t0, t1) = public_vector(&mat, &sk.s1, &sk.s2);
    sk.t0 = t0;

    // Step 4: Pack the public key and bind it into the secret key
    let pk = pack_public_key::<P, K, L>(&rho, &t1)?;
    sk.tr = crh(&[&pk])?;
    let sk_bytes = pack_secret_key::<P, K, L>(&sk)?;

    debug!(
        pk_len = pk.len(),
        sk_len = sk_bytes.len(),
        "key pair generated"
    );
    Ok((pk, sk_bytes))
}

/// Key generation with a seed drawn from `rng`.
pub(crate) fn keypair_internal<P, R, const K: usize, const L: usize>(
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<u8>)>
where
    P: DilithiumParams<K, L>,
    R: RngCore + CryptoRng,
{
    let mut seed = Zeroizing::new([0u8; KEYGEN_SEED_BYTES]);
    rng.try_fill_bytes(&mut seed[..])?;
    keypair_from_seed::<P, K, L>(&seed)
}

/// Recomputes the public key belonging to a packed secret key.
///
/// Fails if the embedded `tr` does not match the recomputed key.
pub(crate) fn derive_public_key_internal<P, const K: usize, const L: usize>(
    sk_bytes: &[u8],
) -> Result<Vec<u8>>
where
    P: DilithiumParams<K, L>,
{
    let sk = unpack_secret_key::<P, K, L>(sk_bytes)?;
    let mat = expand_matrix::<K, L>(&sk.rho)?;
    let (mut t0, t1) = public_vector(&mat, &sk.s1, &sk.s2);
    t0.zeroize();

    let pk = pack_public_key::<P, K, L>(&sk.rho, &t1)?;
    let tr = crh(&[&pk])?;
    if !bool::from(tr[..].ct_eq(&sk.tr[..])) {
        return Err(SignError::InvalidParameter(
            "secret key is inconsistent with its public key hash".into(),
        ));
    }
    Ok(pk)
}

/// Per-message state shared by all signing attempts
#[derive(Zeroize, ZeroizeOnDrop)]
struct SigningContext<const K: usize, const L: usize> {
    #[zeroize(skip)]
    mat: Matrix<K, L>,
    mu: [u8; CRH_BYTES],
    rhoprime: [u8; CRH_BYTES],
    s1_hat: NttPolyVec<L>,
    s2_hat: NttPolyVec<K>,
    t0_hat: NttPolyVec<K>,
}

impl<const K: usize, const L: usize> SigningContext<K, L> {
    /// One pass of the rejection loop with masking nonces `nonce..nonce + L`.
    fn attempt<P: DilithiumParams<K, L>>(&self, nonce: u16) -> Result<Attempt<Vec<u8>>> {
        // Step 1: Masking vector
        let y = Zeroizing::new(sample_polyvec_gamma1::<L>(&self.rhoprime, nonce)?);

        // Step 2: w = A·y and its high bits
        let mut w_hat = self.mat.mul_vec(&y.ntt());
        w_hat.reduce();
        let mut w = w_hat.invntt_montgomery();
        w.csubq();
        let (w0, w1) = polyvec_decompose(&w);

        // Step 3: Challenge
        let c = challenge(&self.mu, &w1)?;
        let c_hat = c.ntt();

        // Step 4: Low bits of w - c·s2
        let cs2 = self.s2_hat.pointwise_poly_montgomery(&c_hat).invntt_montgomery();
        let mut w0 = w0.sub(&cs2);
        w0.freeze();
        if w0.chknorm(GAMMA2 - P::BETA) {
            return Ok(Attempt::Retry(Rejection::LowBits));
        }

        // Step 5: z = y + c·s1
        let cs1 = self.s1_hat.pointwise_poly_montgomery(&c_hat).invntt_montgomery();
        let mut z = cs1.add(&y);
        z.freeze();
        if z.chknorm(GAMMA1 - P::BETA) {
            return Ok(Attempt::Retry(Rejection::ZNorm));
        }

        // Step 6: c·t0
        let mut ct0 = self.t0_hat.pointwise_poly_montgomery(&c_hat).invntt_montgomery();
        ct0.csubq();
        if ct0.chknorm(GAMMA2) {
            return Ok(Attempt::Retry(Rejection::Ct0Norm));
        }

        // Step 7: Hints
        let mut w0 = w0.add(&ct0);
        w0.csubq();
        let (h, hints) = polyvec_make_hint(&w0, &w1);
        if hints > P::OMEGA {
            return Ok(Attempt::Retry(Rejection::TooManyHints));
        }

        // Step 8: Pack (z, h, c)
        pack_signature::<P, K, L>(&z, &h, &c).map(Attempt::Accept)
    }
}

/// Signs `message` with a packed secret key.
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME))]
pub(crate) fn sign_internal<P, const K: usize, const L: usize>(
    message: &[u8],
    sk_bytes: &[u8],
) -> Result<Vec<u8>>
where
    P: DilithiumParams<K, L>,
{
    // Step 1: Unpack secret key
    let sk = unpack_secret_key::<P, K, L>(sk_bytes)?;

    // Step 2: mu = CRH(tr ‖ M), rhoprime = CRH(key ‖ mu)
    let mu = crh(&[&sk.tr, message])?;
    let rhoprime = crh(&[&sk.key, &mu])?;

    // Step 3: Everything that does not depend on y
    let ctx = SigningContext::<K, L> {
        mat: expand_matrix::<K, L>(&sk.rho)?,
        mu,
        rhoprime,
        s1_hat: sk.s1.ntt(),
        s2_hat: sk.s2.ntt(),
        t0_hat: sk.t0.ntt(),
    };
    drop(sk);

    // Step 4: Rejection loop
    let mut nonce: u16 = 0;
    for attempt in 1..=P::MAX_SIGN_ATTEMPTS {
        match ctx.attempt::<P>(nonce)? {
            Attempt::Accept(sig) => {
                debug!(attempts = attempt, "signature generated");
                return Ok(sig);
            }
            Attempt::Retry(reason) => {
                #[cfg(feature = "trace")]
                tracing::trace!(attempt, ?reason, "signing attempt rejected");
                #[cfg(not(feature = "trace"))]
                let _ = reason;

                nonce = nonce.checked_add(L as u16).ok_or_else(|| {
                    SignError::Nonce(format!("masking nonce overflow after {} attempts", attempt))
                })?;
            }
        }
    }

    debug!(
        max_attempts = P::MAX_SIGN_ATTEMPTS,
        "signing gave up"
    );
    Err(SignError::SignatureGeneration {
        algorithm: P::NAME,
        details: format!("no signature after {} attempts", P::MAX_SIGN_ATTEMPTS),
    })
}

fn challenges_equal(a: &Poly, b: &Poly) -> bool {
    let eq = a
        .coeffs
        .iter()
        .zip(b.coeffs.iter())
        .fold(Choice::from(1), |acc, (x, y)| acc & x.ct_eq(y));
    bool::from(eq)
}

/// Verifies a packed signature on `message` under a packed public key.
#[instrument(level = "debug", skip_all, fields(algorithm = P::NAME))]
pub(crate) fn verify_internal<P, const K: usize, const L: usize>(
    message: &[u8],
    sig_bytes: &[u8],
    pk_bytes: &[u8],
) -> Result<()>
where
    P: DilithiumParams<K, L>,
{
    // Step 1: Decode
    let (rho, t1) = unpack_public_key::<P, K, L>(pk_bytes)?;
    let (z, h, c) = unpack_signature::<P, K, L>(sig_bytes).map_err(|e| {
        debug!(error = %e, "malformed signature");
        e
    })?;

    // Step 2: Bound on z
    if z.chknorm(GAMMA1 - P::BETA) {
        debug!("z out of range");
        return Err(SignError::verification(P::NAME, "signature rejected"));
    }

    // Step 3: mu = CRH(CRH(pk) ‖ M)
    let tr = crh(&[pk_bytes])?;
    let mu = crh(&[&tr, message])?;

    // Step 4: w' = A·z - c·t1·2^D
    let mat = expand_matrix::<K, L>(&rho)?;
    let az = mat.mul_vec(&z.ntt());
    let c_hat = c.ntt();
    let ct1 = t1.shift_left().ntt().pointwise_poly_montgomery(&c_hat);
    let mut w_hat = az.sub(&ct1);
    w_hat.reduce();
    let mut w = w_hat.invntt_montgomery();
    w.csubq();

    // Step 5: Recover w1 and recompute the challenge
    let w1 = polyvec_use_hint(&w, &h);
    let c2 = challenge(&mu, &w1)?;

    if challenges_equal(&c, &c2) {
        Ok(())
    } else {
        debug!("challenge mismatch");
        Err(SignError::verification(P::NAME, "signature rejected"))
    }
}
