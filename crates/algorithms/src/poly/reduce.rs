//! Modular reduction for coefficients modulo q = 8380417
//!
//! Coefficients are kept as unsigned 32-bit integers. None of these routines
//! produce a canonical result except [`freeze`]; callers track the
//! representative range documented on each function.

use latsig_params::pqc::dilithium::{DILITHIUM_Q as Q, MONT, QINV};

/// Montgomery reduction.
///
/// For `a < 2^32 * q` returns `t` with `t ≡ a * 2^-32 (mod q)` and `t < 2q`.
#[inline(always)]
pub fn montgomery_reduce(a: u64) -> u32 {
    let mut t = a.wrapping_mul(QINV as u64) & 0xFFFF_FFFF;
    t *= Q as u64;
    t += a;
    (t >> 32) as u32
}

/// Reduces any 32-bit value to a representative `< 2q`.
///
/// Uses `2^23 ≡ 2^13 - 1 (mod q)`.
#[inline(always)]
pub fn reduce32(a: u32) -> u32 {
    let hi = a >> 23;
    (a & 0x7F_FFFF) + (hi << 13) - hi
}

/// Maps `a < 2q` to `a mod q` without branching.
#[inline(always)]
pub fn csubq(a: u32) -> u32 {
    let a = a.wrapping_sub(Q);
    a.wrapping_add((((a as i32) >> 31) as u32) & Q)
}

/// Canonical representative in `[0, q)` of any 32-bit value.
#[inline(always)]
pub fn freeze(a: u32) -> u32 {
    csubq(reduce32(a))
}

/// Converts a canonical value into the Montgomery domain (`a * 2^32 mod q`).
#[inline(always)]
pub fn to_montgomery(a: u32) -> u32 {
    // MONT^2 is reduced by one Montgomery step to give MONT
    freeze(montgomery_reduce(a as u64 * ((MONT as u64 * MONT as u64) % Q as u64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_csubq_boundaries() {
        assert_eq!(csubq(0), 0);
        assert_eq!(csubq(Q - 1), Q - 1);
        assert_eq!(csubq(Q), 0);
        assert_eq!(csubq(2 * Q - 1), Q - 1);
    }

    #[test]
    fn test_montgomery_of_mont_is_one() {
        assert_eq!(freeze(montgomery_reduce(MONT as u64)), 1);
        assert_eq!(to_montgomery(1), MONT);
    }

    #[test]
    fn test_freeze_extremes() {
        assert_eq!(freeze(u32::MAX), (u32::MAX as u64 % Q as u64) as u32);
        assert_eq!(freeze(Q), 0);
    }

    proptest! {
        #[test]
        fn prop_reduce32_is_congruent_and_small(a in any::<u32>()) {
            let r = reduce32(a);
            prop_assert!(r < 2 * Q);
            prop_assert_eq!(r as u64 % Q as u64, a as u64 % Q as u64);
        }

        #[test]
        fn prop_freeze_is_canonical(a in any::<u32>()) {
            prop_assert_eq!(freeze(a) as u64, a as u64 % Q as u64);
        }

        #[test]
        fn prop_montgomery_reduce(a in 0u64..(Q as u64) << 32) {
            let r = montgomery_reduce(a);
            prop_assert!(r < 2 * Q);
            // r * 2^32 ≡ a (mod q)
            prop_assert_eq!(((r as u128) << 32) % Q as u128, a as u128 % Q as u128);
        }
    }
}
