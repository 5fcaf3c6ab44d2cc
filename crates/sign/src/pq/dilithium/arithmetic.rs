//! Rounding and hint arithmetic for Dilithium.
//!
//! Coefficient-level functions take canonical inputs in `[0, q)` and return
//! low parts offset by `q`, i.e. a centred value `r0` is returned as `q + r0`.
//! All arithmetic wraps on `u32` the same way at every call site; there are
//! no data-dependent branches in `power2round` and `decompose`.

use latsig_algorithms::poly::polynomial::Poly;
use latsig_params::pqc::dilithium::{
    DILITHIUM_ALPHA as ALPHA, DILITHIUM_D as D, DILITHIUM_GAMMA2 as GAMMA2, DILITHIUM_N as N,
    DILITHIUM_Q as Q,
};

use super::polyvec::PolyVec;

/// Splits `a` into `a1 * 2^D + a0` with `a0` centred in `(-2^(D-1), 2^(D-1)]`.
///
/// Returns `(q + a0, a1)`.
#[inline]
pub fn power2round(a: u32) -> (u32, u32) {
    let mut t = (a & ((1 << D) - 1)) as i32;
    t -= (1 << (D - 1)) + 1;
    t += (t >> 31) & (1 << D);
    t -= (1 << (D - 1)) - 1;
    let a0 = Q.wrapping_add(t as u32);
    let a1 = a.wrapping_sub(t as u32) >> D;
    (a0, a1)
}

/// Splits `a` into `a1 * alpha + a0` with `a0` centred in `(-alpha/2, alpha/2]`.
///
/// When `a - a0 = q - 1` the high part is forced to 0 and `a0` drops by one,
/// so `a1` is always in `[0, 15]`. Returns `(q + a0, a1)`.
#[inline]
pub fn decompose(a: u32) -> (u32, u32) {
    // t = a mod alpha, centred
    let mut t = (a & 0x7FFFF) as i32;
    t += ((a >> 19) << 9) as i32;
    t -= (ALPHA / 2 + 1) as i32;
    t += (t >> 31) & ALPHA as i32;
    t -= (ALPHA / 2 - 1) as i32;
    let a = a.wrapping_sub(t as u32);

    // a = (a - t) / alpha, with q - 1 mapped to 0
    let u = ((a.wrapping_sub(1) as i32) >> 31) as u32;
    let a = ((a >> 19) + 1).wrapping_sub(u & 1);

    let a0 = Q.wrapping_add(t as u32).wrapping_sub(a >> 4);
    (a0, a & 0xF)
}

/// Hint bit telling the verifier that adding the low part `a0` to the high
/// part `a1` carries into the next bucket.
#[inline]
pub fn make_hint(a0: u32, a1: u32) -> u32 {
    if a0 <= GAMMA2 || a0 > Q - GAMMA2 || (a0 == Q - GAMMA2 && a1 == 0) {
        0
    } else {
        1
    }
}

/// Corrects the high bits of `a` according to hint `hint`.
#[inline]
pub fn use_hint(a: u32, hint: u32) -> u32 {
    let (a0, a1) = decompose(a);
    if hint == 0 {
        a1
    } else if a0 > Q {
        (a1 + 1) & 0xF
    } else {
        a1.wrapping_sub(1) & 0xF
    }
}

/// `power2round` on every coefficient; returns `(a0, a1)`.
pub fn poly_power2round(a: &Poly) -> (Poly, Poly) {
    let mut a0 = Poly::zero();
    let mut a1 = Poly::zero();
    for i in 0..N {
        (a0.coeffs[i], a1.coeffs[i]) = power2round(a.coeffs[i]);
    }
    (a0, a1)
}

/// `decompose` on every coefficient; returns `(a0, a1)`.
pub fn poly_decompose(a: &Poly) -> (Poly, Poly) {
    let mut a0 = Poly::zero();
    let mut a1 = Poly::zero();
    for i in 0..N {
        (a0.coeffs[i], a1.coeffs[i]) = decompose(a.coeffs[i]);
    }
    (a0, a1)
}

/// Hint polynomial and its number of set coefficients.
pub fn poly_make_hint(a0: &Poly, a1: &Poly) -> (Poly, usize) {
    let mut h = Poly::zero();
    let mut count = 0;
    for i in 0..N {
        h.coeffs[i] = make_hint(a0.coeffs[i], a1.coeffs[i]);
        count += h.coeffs[i] as usize;
    }
    (h, count)
}

/// High bits of `a` corrected by the hint polynomial `h`.
pub fn poly_use_hint(a: &Poly, h: &Poly) -> Poly {
    let mut r = Poly::zero();
    for ((r, &a), &h) in r.coeffs.iter_mut().zip(&a.coeffs).zip(&h.coeffs) {
        *r = use_hint(a, h);
    }
    r
}

/// `power2round` on every polynomial of a vector.
pub fn polyvec_power2round<const LEN: usize>(v: &PolyVec<LEN>) -> (PolyVec<LEN>, PolyVec<LEN>) {
    let mut v0 = PolyVec::zero();
    let mut v1 = PolyVec::zero();
    for (i, p) in v.polys.iter().enumerate() {
        (v0.polys[i], v1.polys[i]) = poly_power2round(p);
    }
    (v0, v1)
}

/// `decompose` on every polynomial of a vector.
pub fn polyvec_decompose<const LEN: usize>(v: &PolyVec<LEN>) -> (PolyVec<LEN>, PolyVec<LEN>) {
    let mut v0 = PolyVec::zero();
    let mut v1 = PolyVec::zero();
    for (i, p) in v.polys.iter().enumerate() {
        (v0.polys[i], v1.polys[i]) = poly_decompose(p);
    }
    (v0, v1)
}

/// Hint vector and the total number of set hint bits.
pub fn polyvec_make_hint<const LEN: usize>(
    v0: &PolyVec<LEN>,
    v1: &PolyVec<LEN>,
) -> (PolyVec<LEN>, usize) {
    let mut h = PolyVec::zero();
    let mut total = 0;
    for i in 0..LEN {
        let (hp, count) = poly_make_hint(&v0.polys[i], &v1.polys[i]);
        h.polys[i] = hp;
        total += count;
    }
    (h, total)
}

/// `use_hint` on every polynomial of a vector.
pub fn polyvec_use_hint<const LEN: usize>(v: &PolyVec<LEN>, h: &PolyVec<LEN>) -> PolyVec<LEN> {
    let mut r = PolyVec::zero();
    for i in 0..LEN {
        r.polys[i] = poly_use_hint(&v.polys[i], &h.polys[i]);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn centred(x: u32) -> i64 {
        x as i64 - Q as i64
    }

    #[test]
    fn test_decompose_bucket_border() {
        // q - gamma2 - 1 is the last value of bucket 15
        assert_eq!(decompose(Q - GAMMA2 - 1), (Q + GAMMA2, 15));
        // from q - gamma2 on, the high part wraps to 0 and a0 drops by one
        assert_eq!(decompose(Q - GAMMA2), (Q - GAMMA2, 0));
        assert_eq!(decompose(Q - 1), (Q - 1, 0));
        assert_eq!(decompose(0), (Q, 0));
        assert_eq!(decompose(GAMMA2), (Q + GAMMA2, 0));
        assert_eq!(decompose(GAMMA2 + 1), (Q - GAMMA2 + 1, 1));
    }

    #[test]
    fn test_power2round_examples() {
        assert_eq!(power2round(0), (Q, 0));
        assert_eq!(power2round(1 << 13), (Q + (1 << 13), 0));
        assert_eq!(power2round((1 << 13) + 1), (Q - (1 << 13) + 1, 1));
        assert_eq!(power2round(Q - 1), (Q + (1 << 13), 511));
    }

    #[test]
    fn test_make_hint_thresholds() {
        assert_eq!(make_hint(GAMMA2, 3), 0);
        assert_eq!(make_hint(GAMMA2 + 1, 3), 1);
        assert_eq!(make_hint(Q - GAMMA2, 0), 0);
        assert_eq!(make_hint(Q - GAMMA2, 1), 1);
        assert_eq!(make_hint(Q - GAMMA2 + 1, 1), 0);
    }

    #[test]
    fn test_use_hint_wraps_buckets() {
        // a0 > q (positive low part): move up, 15 wraps to 0
        assert_eq!(use_hint(Q - GAMMA2 - 1, 1), 0);
        // a0 <= q (non-positive low part): move down, 0 wraps to 15
        assert_eq!(use_hint(0, 1), 15);
        assert_eq!(use_hint(0, 0), 0);
    }

    #[test]
    fn test_poly_make_hint_counts() {
        let mut a0 = Poly::zero();
        let mut a1 = Poly::zero();
        a0.coeffs.iter_mut().for_each(|c| *c = Q);
        a0.coeffs[3] = GAMMA2 + 5;
        a0.coeffs[200] = Q - GAMMA2;
        a1.coeffs[200] = 2;
        // a0 = q - gamma2 only sets a hint away from bucket 0
        a0.coeffs[201] = Q - GAMMA2;
        let (h, count) = poly_make_hint(&a0, &a1);
        assert_eq!(count, 2);
        assert_eq!(h.coeffs[3], 1);
        assert_eq!(h.coeffs[200], 1);
    }

    proptest! {
        #[test]
        fn prop_decompose_reconstructs(a in 0u32..Q) {
            let (a0, a1) = decompose(a);
            prop_assert!(a1 <= 15);
            let r0 = centred(a0);
            prop_assert!(r0.abs() <= GAMMA2 as i64);
            prop_assert_eq!((a1 as i64 * ALPHA as i64 + r0 - a as i64).rem_euclid(Q as i64), 0);
        }

        #[test]
        fn prop_power2round_reconstructs(a in 0u32..Q) {
            let (a0, a1) = power2round(a);
            let r0 = centred(a0);
            prop_assert!(r0 > -(1 << (D - 1)) && r0 <= 1 << (D - 1));
            prop_assert_eq!(((a1 as i64) << D) + r0, a as i64);
        }

        #[test]
        fn prop_hint_recovers_high_bits(
            w in 0u32..Q,
            d in -375i64..=375,
            e in -(GAMMA2 as i64 - 1)..(GAMMA2 as i64),
        ) {
            // w stands for A*y, d for -c*s2 and e for c*t0
            let q = Q as i64;
            let (w0, w1) = decompose(w);
            let r0 = centred(w0) + d;
            prop_assume!(r0.abs() < (GAMMA2 - 375) as i64);

            let h = make_hint((r0 + e).rem_euclid(q) as u32, w1);
            let full = (w as i64 + d + e).rem_euclid(q) as u32;
            prop_assert_eq!(use_hint(full, h), w1);
        }
    }
}
