//! Traits implemented by latsig algorithms

pub mod signature;

pub use signature::{Signature, SignatureDerive, SignatureSerialize, SignedMessage};
