//! Challenge polynomial derivation
//!
//! `c` has exactly 60 coefficients in `{-1, 1}` (stored as `q - 1` and `1`)
//! and zeros elsewhere, placed by an inside-out Fisher-Yates shuffle driven
//! by SHAKE-256.

use latsig_algorithms::poly::polynomial::Poly;
use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use latsig_params::pqc::dilithium::{CHALLENGE_WEIGHT, CRH_BYTES, DILITHIUM_N as N, DILITHIUM_Q as Q};
use latsig_params::utils::hash::SHAKE256_RATE;

use super::encoding::pack_w1;
use super::polyvec::PolyVec;
use crate::error::Result;

/// Derives the challenge from `mu` and the packed high bits `w1`.
pub fn challenge<const K: usize>(mu: &[u8; CRH_BYTES], w1: &PolyVec<K>) -> Result<Poly> {
    let mut xof = ShakeXof256::new();
    xof.update(mu)?;
    xof.update(&pack_w1(w1)?)?;

    let mut buf = [0u8; SHAKE256_RATE];
    xof.squeeze_blocks(&mut buf)?;

    let mut sign_bytes = [0u8; 8];
    sign_bytes.copy_from_slice(&buf[..8]);
    let mut signs = u64::from_le_bytes(sign_bytes);
    let mut pos = 8;

    let mut c = Poly::zero();
    for i in N - CHALLENGE_WEIGHT..N {
        let b = loop {
            if pos >= SHAKE256_RATE {
                xof.squeeze_blocks(&mut buf)?;
                pos = 0;
            }
            let b = buf[pos] as usize;
            pos += 1;
            if b <= i {
                break b;
            }
        };

        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = if signs & 1 == 1 { Q - 1 } else { 1 };
        signs >>= 1;
    }
    Ok(c)
}
