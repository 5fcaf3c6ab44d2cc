//! Constants for the symmetric primitives used by the lattice schemes

pub mod hash;
