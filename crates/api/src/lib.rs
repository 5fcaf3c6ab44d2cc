//! Public API traits and types for the latsig crates
//!
//! This crate defines the error type returned at every public boundary and
//! the signature traits implemented by the concrete parameter sets in
//! `latsig-sign`.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::{Signature, SignatureDerive, SignatureSerialize, SignedMessage};

// Re-export trait modules for direct access
pub use traits::signature;
