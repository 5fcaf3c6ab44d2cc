//! Polynomial vector types and operations specific to Dilithium.
//!
//! Vector lengths are const generics: `PolyVec<L>` holds s1, y and z,
//! `PolyVec<K>` holds s2, t, w and h. The public matrix is a `K x L` array
//! of NTT-domain polynomials.

use core::array;

use latsig_algorithms::poly::polynomial::{NttPoly, Poly};
use latsig_params::pqc::dilithium::SEED_BYTES;
use zeroize::Zeroize;

use super::sampling::{poly_uniform, poly_uniform_4x};
use crate::error::Result;

/// A vector of coefficient-domain polynomials
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct PolyVec<const LEN: usize> {
    pub(crate) polys: [Poly; LEN],
}

/// A vector of NTT-domain polynomials
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct NttPolyVec<const LEN: usize> {
    pub(crate) polys: [NttPoly; LEN],
}

impl<const LEN: usize> PolyVec<LEN> {
    /// Creates a vector with all polynomial coefficients set to zero.
    pub fn zero() -> Self {
        Self {
            polys: array::from_fn(|_| Poly::zero()),
        }
    }

    /// Wraps an array of polynomials.
    #[cfg(test)]
    pub(crate) fn from_polys(polys: [Poly; LEN]) -> Self {
        Self { polys }
    }

    /// Borrow the polynomials.
    #[cfg(test)]
    pub(crate) fn polys(&self) -> &[Poly; LEN] {
        &self.polys
    }

    /// Forward NTT of every element.
    pub fn ntt(&self) -> NttPolyVec<LEN> {
        NttPolyVec {
            polys: array::from_fn(|i| self.polys[i].ntt()),
        }
    }

    /// Element-wise `self + other` (unreduced).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            polys: array::from_fn(|i| self.polys[i].add(&other.polys[i])),
        }
    }

    /// Element-wise `self + 2q - other` (unreduced, `other < 2q`).
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            polys: array::from_fn(|i| self.polys[i].sub(&other.polys[i])),
        }
    }

    /// Element-wise multiplication by `2^D`.
    pub fn shift_left(&self) -> Self {
        Self {
            polys: array::from_fn(|i| self.polys[i].shift_left()),
        }
    }

    /// Conditionally subtracts q from every coefficient (inputs `< 2q`).
    pub fn csubq(&mut self) {
        self.polys.iter_mut().for_each(Poly::csubq);
    }

    /// Canonical `[0, q)` representatives for every coefficient.
    pub fn freeze(&mut self) {
        self.polys.iter_mut().for_each(Poly::freeze);
    }

    /// True if any coefficient of any element has centred norm `>= bound`.
    /// Stops at the first offending polynomial.
    pub fn chknorm(&self, bound: u32) -> bool {
        self.polys.iter().any(|p| p.chknorm(bound))
    }
}

impl<const LEN: usize> NttPolyVec<LEN> {
    /// Creates a vector with all polynomial coefficients set to zero.
    pub fn zero() -> Self {
        Self {
            polys: array::from_fn(|_| NttPoly::zero()),
        }
    }

    /// Inverse NTT (times `2^32 mod q`) of every element.
    pub fn invntt_montgomery(&self) -> PolyVec<LEN> {
        PolyVec {
            polys: array::from_fn(|i| self.polys[i].invntt_montgomery()),
        }
    }

    /// Element-wise `self + 2q - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            polys: array::from_fn(|i| self.polys[i].sub(&other.polys[i])),
        }
    }

    /// Brings every coefficient below `2q`.
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(NttPoly::reduce);
    }

    /// Multiplies every element pointwise by the same polynomial.
    pub fn pointwise_poly_montgomery(&self, c: &NttPoly) -> Self {
        Self {
            polys: array::from_fn(|i| c.pointwise_montgomery(&self.polys[i])),
        }
    }

    /// Inner product `sum_i self[i] ∘ other[i]` with Montgomery reduction.
    ///
    /// Each product is `< 2q`, so the sum is `< 2 * LEN * q`.
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> NttPoly {
        let mut acc = NttPoly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc = acc.add(&a.pointwise_montgomery(b));
        }
        acc
    }
}

/// The public `K x L` matrix A, stored in the NTT domain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<const K: usize, const L: usize> {
    pub(crate) rows: [NttPolyVec<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    /// Computes `A · v` row by row.
    ///
    /// The result is in the NTT domain, unreduced (`< 2Lq`) and carries a
    /// factor `2^-32` from the Montgomery products.
    pub fn mul_vec(&self, v: &NttPolyVec<L>) -> NttPolyVec<K> {
        NttPolyVec {
            polys: array::from_fn(|i| self.rows[i].pointwise_acc_montgomery(v)),
        }
    }
}

/// ExpandA: derives the matrix from `rho`.
///
/// Entry `(i, j)` is `poly_uniform(rho, (i << 8) | j)`. Entries are drawn
/// four at a time, in row-major order, through the batched sampler.
pub fn expand_matrix<const K: usize, const L: usize>(
    rho: &[u8; SEED_BYTES],
) -> Result<Matrix<K, L>> {
    let coords: Vec<(usize, usize)> = (0..K)
        .flat_map(|i| (0..L).map(move |j| (i, j)))
        .collect();
    let nonce = |(i, j): (usize, usize)| ((i << 8) | j) as u16;

    let mut rows: [NttPolyVec<L>; K] = array::from_fn(|_| NttPolyVec::zero());

    let mut quads = coords.chunks_exact(4);
    for quad in quads.by_ref() {
        let nonces = [nonce(quad[0]), nonce(quad[1]), nonce(quad[2]), nonce(quad[3])];
        let polys = poly_uniform_4x(rho, nonces)?;
        for (&(i, j), p) in quad.iter().zip(polys) {
            rows[i].polys[j] = p;
        }
    }
    for &(i, j) in quads.remainder() {
        rows[i].polys[j] = poly_uniform(rho, nonce((i, j)))?;
    }

    Ok(Matrix { rows })
}

/// Reference ExpandA drawing every entry with the scalar sampler
#[cfg(test)]
pub(crate) fn expand_matrix_scalar<const K: usize, const L: usize>(
    rho: &[u8; SEED_BYTES],
) -> Result<Matrix<K, L>> {
    let mut rows: [NttPolyVec<L>; K] = array::from_fn(|_| NttPolyVec::zero());
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, entry) in row.polys.iter_mut().enumerate() {
            *entry = poly_uniform(rho, ((i << 8) | j) as u16)?;
        }
    }
    Ok(Matrix { rows })
}
