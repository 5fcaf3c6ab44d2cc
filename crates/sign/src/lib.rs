//! Digital signature schemes for latsig
//!
//! The schemes live under [`pq`]; the four Dilithium parameter sets are
//! re-exported at the crate root.

#![forbid(unsafe_code)]

pub mod error;
pub mod pq;

pub use error::{Error, Result};
pub use pq::dilithium::{Dilithium, Dilithium1, Dilithium2, Dilithium3, Dilithium4};
