//! Arithmetic and symmetric primitives for lattice signatures
//!
//! This crate provides the building blocks the signature scheme in
//! `latsig-sign` is assembled from:
//!
//! - [`poly`]: reduction modulo q = 8380417, the negacyclic NTT, typed
//!   coefficient/NTT-domain polynomials and LSB-first bit packing
//! - [`xof`]: SHAKE-128 and SHAKE-256 behind an incremental
//!   absorb/squeeze interface
//! - [`error`]: the primitive error type and validation helpers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Polynomial engine
pub mod poly;

// Extendable output functions
pub mod xof;
pub use xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
