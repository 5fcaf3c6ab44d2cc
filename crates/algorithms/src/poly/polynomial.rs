//! Ring elements of R_q = Z_q[X]/(X^256 + 1)
//!
//! [`Poly`] holds coefficients in the normal (coefficient) domain and
//! [`NttPoly`] holds the transform-domain representation. Pointwise
//! multiplication only exists on `NttPoly`, so mixing the two domains is a
//! type error instead of a silent wrong result.
//!
//! Arithmetic is lazy: `add` and `sub` never reduce, and each function
//! documents the coefficient range it expects and produces. Use
//! [`Poly::reduce`], [`Poly::csubq`] or [`Poly::freeze`] to bring
//! coefficients back into range.

use core::fmt;

use latsig_params::pqc::dilithium::{DILITHIUM_D, DILITHIUM_N as N, DILITHIUM_Q as Q};
use zeroize::Zeroize;

use super::ntt::{invntt_montgomery, ntt};
use super::reduce::{csubq, freeze, montgomery_reduce, reduce32};
use crate::error::{validate, Result};

/// Polynomial in the coefficient domain
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Poly {
    /// Coefficients, lowest degree first
    pub coeffs: [u32; N],
}

/// Polynomial in the NTT domain (bit-reversed evaluation order)
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct NttPoly {
    /// Transform-domain coefficients
    pub coeffs: [u32; N],
}

macro_rules! impl_common {
    ($ty:ident) => {
        impl $ty {
            /// The zero polynomial
            pub const fn zero() -> Self {
                Self { coeffs: [0; N] }
            }

            /// Builds a polynomial from exactly `N` coefficients
            pub fn from_coeffs(coeffs: &[u32]) -> Result<Self> {
                validate::length("polynomial coefficients", coeffs.len(), N)?;
                let mut p = Self::zero();
                p.coeffs.copy_from_slice(coeffs);
                Ok(p)
            }

            /// Coefficient-wise `self + other` without reduction
            pub fn add(&self, other: &Self) -> Self {
                let mut r = Self::zero();
                for ((c, a), b) in r.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
                    *c = a + b;
                }
                r
            }

            /// Coefficient-wise `self + 2q - other`.
            ///
            /// `other` must be `< 2q`; the result is nonnegative and unreduced.
            pub fn sub(&self, other: &Self) -> Self {
                let mut r = Self::zero();
                for ((c, a), b) in r.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
                    *c = a + 2 * Q - b;
                }
                r
            }

            /// Reduces every coefficient to a representative `< 2q`
            pub fn reduce(&mut self) {
                for c in self.coeffs.iter_mut() {
                    *c = reduce32(*c);
                }
            }

            /// Maps coefficients `< 2q` to `[0, q)`
            pub fn csubq(&mut self) {
                for c in self.coeffs.iter_mut() {
                    *c = csubq(*c);
                }
            }

            /// Maps arbitrary coefficients to `[0, q)`
            pub fn freeze(&mut self) {
                for c in self.coeffs.iter_mut() {
                    *c = freeze(*c);
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("coeffs", &&self.coeffs[..8])
                    .field("len", &N)
                    .finish_non_exhaustive()
            }
        }
    };
}

impl_common!(Poly);
impl_common!(NttPoly);

impl Poly {
    /// Forward NTT. See [`ntt`] for the accepted input range.
    pub fn ntt(&self) -> NttPoly {
        let mut coeffs = self.coeffs;
        ntt(&mut coeffs);
        NttPoly { coeffs }
    }

    /// Multiplies every coefficient by `2^D` without reduction.
    ///
    /// Coefficients must be `< 2^(32 - D)`.
    pub fn shift_left(&self) -> Self {
        let mut r = Self::zero();
        for (c, a) in r.coeffs.iter_mut().zip(&self.coeffs) {
            *c = a << DILITHIUM_D;
        }
        r
    }

    /// Returns true if some coefficient has centred absolute value `>= bound`.
    ///
    /// Coefficients must be canonical (`[0, q)`), and `bound <= (q - 1) / 8`
    /// for the check to be meaningful.
    pub fn chknorm(&self, bound: u32) -> bool {
        const HALF: i32 = ((Q - 1) / 2) as i32;
        self.coeffs.iter().any(|&a| {
            // t becomes the absolute value of the centred representative
            let mut t = HALF - a as i32;
            t ^= t >> 31;
            t = HALF - t;
            t as u32 >= bound
        })
    }

    /// Centred representative of coefficient `i` in `(-q/2, q/2]`
    pub fn centered(&self, i: usize) -> i32 {
        let a = freeze(self.coeffs[i]) as i32;
        if a > (Q / 2) as i32 {
            a - Q as i32
        } else {
            a
        }
    }
}

impl NttPoly {
    /// Inverse NTT, multiplying the result by `2^32 mod q`.
    ///
    /// Input coefficients must be `< 2q`; output coefficients are `< 2q`.
    pub fn invntt_montgomery(&self) -> Poly {
        let mut coeffs = self.coeffs;
        invntt_montgomery(&mut coeffs);
        Poly { coeffs }
    }

    /// Pointwise product with a Montgomery reduction: `a_i * b_i * 2^-32`.
    ///
    /// Inputs need `a_i * b_i < 2^32 q`; output coefficients are `< 2q`.
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for ((c, a), b) in r.coeffs.iter_mut().zip(&self.coeffs).zip(&other.coeffs) {
            *c = montgomery_reduce(*a as u64 * *b as u64);
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coeffs_checks_length() {
        assert!(Poly::from_coeffs(&[1u32; N - 1]).is_err());
        let p = Poly::from_coeffs(&[3u32; N]).unwrap();
        assert!(p.coeffs.iter().all(|&c| c == 3));
    }

    #[test]
    fn test_centered_and_chknorm() {
        let mut p = Poly::zero();
        p.coeffs[0] = Q - 5;
        p.coeffs[1] = 7;
        p.coeffs[2] = Q + 9;
        assert_eq!(p.centered(0), -5);
        assert_eq!(p.centered(1), 7);
        assert_eq!(p.centered(2), 9);

        let mut canon = p.clone();
        canon.freeze();
        assert!(!canon.chknorm(10));
        assert!(canon.chknorm(9));
        assert!(canon.chknorm(5));
    }

    #[test]
    fn test_sub_is_congruent() {
        let a = Poly::from_coeffs(&[10u32; N]).unwrap();
        let b = Poly::from_coeffs(&[25u32; N]).unwrap();
        let mut d = a.sub(&b);
        d.freeze();
        assert!(d.coeffs.iter().all(|&c| c == Q - 15));
        assert_eq!(d.centered(0), -15);
    }

    #[test]
    fn test_shift_left() {
        let p = Poly::from_coeffs(&[1u32; N]).unwrap();
        assert!(p.shift_left().coeffs.iter().all(|&c| c == 1 << DILITHIUM_D));
    }
}
