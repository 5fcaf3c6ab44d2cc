//! Number Theoretic Transform over Z_q[X]/(X^256 + 1)
//!
//! Negacyclic NTT with the 512th root of unity 1753. The forward transform
//! is a Cooley-Tukey butterfly network producing bit-reversed output; the
//! inverse is the matching Gentleman-Sande network. Twiddle factors are
//! stored in Montgomery form and computed at compile time.

use latsig_params::pqc::dilithium::{DILITHIUM_N as N, DILITHIUM_Q as Q, MONT, ROOT_OF_UNITY};

use super::reduce::montgomery_reduce;

/// Final scaling of the inverse transform: `MONT^2 / 256 mod q`.
///
/// Multiplying by it through a Montgomery reduction divides by 256 and
/// leaves one factor of `MONT` in the result.
pub const INVNTT_SCALE: u32 = 41978;

const fn bit_reverse8(mut x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 8 {
        r = (r << 1) | (x & 1);
        x >>= 1;
        i += 1;
    }
    r
}

const fn pow_mod(base: u64, mut exp: u64) -> u64 {
    let q = Q as u64;
    let mut acc = 1u64;
    let mut b = base % q;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * b % q;
        }
        b = b * b % q;
        exp >>= 1;
    }
    acc
}

const fn compute_zetas() -> [u32; N] {
    let mut zetas = [0u32; N];
    let mut k = 0;
    while k < N {
        let w = pow_mod(ROOT_OF_UNITY as u64, bit_reverse8(k) as u64);
        zetas[k] = (MONT as u64 * w % Q as u64) as u32;
        k += 1;
    }
    zetas
}

const fn compute_zetas_inv(zetas: &[u32; N]) -> [u32; N] {
    let mut inv = [0u32; N];
    let mut k = 0;
    while k < N {
        inv[k] = Q - zetas[N - 1 - k];
        k += 1;
    }
    inv
}

/// Twiddle factors `MONT * 1753^brv8(k) mod q`
pub const ZETAS: [u32; N] = compute_zetas();

/// Inverse twiddle factors `q - ZETAS[255 - k]`
pub const ZETAS_INV: [u32; N] = compute_zetas_inv(&ZETAS);

/// Forward NTT in place.
///
/// Input coefficients must be below `2q`-ish (anything under `16q` is safe);
/// each of the eight layers adds at most `2q`, and the output is left
/// unreduced in bit-reversed order.
pub fn ntt(p: &mut [u32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        let mut start = 0;
        while start < N {
            k += 1;
            let zeta = ZETAS[k] as u64;
            for j in start..start + len {
                let t = montgomery_reduce(zeta * p[j + len] as u64);
                p[j + len] = p[j] + 2 * Q - t;
                p[j] += t;
            }
            start += 2 * len;
        }
        len >>= 1;
    }
}

/// Inverse NTT in place, multiplying by `MONT = 2^32 mod q`.
///
/// Input coefficients must be `< 2q`; output coefficients are `< 2q`.
pub fn invntt_montgomery(p: &mut [u32; N]) {
    let mut k = 0;
    let mut len = 1;
    while len < N {
        let mut start = 0;
        while start < N {
            let zeta = ZETAS_INV[k] as u64;
            k += 1;
            for j in start..start + len {
                let t = p[j];
                p[j] = t + p[j + len];
                p[j + len] = t + 256 * Q - p[j + len];
                p[j + len] = montgomery_reduce(zeta * p[j + len] as u64);
            }
            start += 2 * len;
        }
        len <<= 1;
    }

    for c in p.iter_mut() {
        *c = montgomery_reduce(INVNTT_SCALE as u64 * *c as u64);
    }
}
