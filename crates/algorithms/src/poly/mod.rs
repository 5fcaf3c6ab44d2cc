//! Polynomial arithmetic over R_q = Z_q[X]/(X^256 + 1), q = 8380417
//!
//! This module provides the ring layer used by the lattice signature
//! scheme: modular reduction, the NTT, typed coefficient/NTT-domain
//! polynomials and the bit packer used by every serialized format.

pub mod ntt;
pub mod polynomial;
pub mod reduce;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and functions.
pub mod prelude {
    pub use super::ntt::{invntt_montgomery, ntt, INVNTT_SCALE, ZETAS, ZETAS_INV};
    pub use super::polynomial::{NttPoly, Poly};
    pub use super::reduce::{csubq, freeze, montgomery_reduce, reduce32};
    pub use super::serialize::{bytes_required, pack_bits, unpack_bits};
}
