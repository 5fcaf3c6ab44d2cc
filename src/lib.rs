//! # latsig
//!
//! Lattice-based Fiat-Shamir-with-aborts signatures: the four round-2
//! Dilithium parameter sets over `Z_q[X]/(X^256 + 1)`, `q = 8380417`.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! latsig = "0.3"
//! ```
//!
//! ```
//! use latsig::prelude::*;
//! use rand::SeedableRng;
//!
//! # fn main() -> latsig::api::Result<()> {
//! let mut rng = rand_chacha::ChaCha20Rng::from_seed([1u8; 32]);
//! let (pk, sk) = Dilithium3::keypair(&mut rng)?;
//! let sig = Dilithium3::sign(b"hello", &sk)?;
//! Dilithium3::verify(b"hello", &sig, &pk)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support in every member crate
//! - `sign` (default): the signature schemes
//! - `algorithms`: direct access to the XOF and ring arithmetic
//! - `serde`: `Serialize`/`Deserialize` on keys and signatures
//! - `trace`: per-attempt rejection events in the signing loop
//! - `full`: everything above
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`latsig-api`]: error type and signature traits
//! - [`latsig-params`]: constants and parameter sets
//! - [`latsig-algorithms`]: SHAKE XOF, NTT and polynomial arithmetic
//! - [`latsig-sign`]: the Dilithium schemes

// Core re-exports (always available)
pub use latsig_api as api;
pub use latsig_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use latsig_algorithms as algorithms;

#[cfg(feature = "sign")]
pub use latsig_sign as sign;

/// Common imports for latsig users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Signature, SignatureDerive, SignatureSerialize, SignedMessage};

    // Exported secret keys come back wrapped in this
    pub use zeroize::Zeroizing;

    #[cfg(feature = "sign")]
    pub use crate::sign::pq::dilithium::{
        Dilithium1, Dilithium2, Dilithium3, Dilithium4, DilithiumPublicKey, DilithiumSecretKey,
        DilithiumSignatureData,
    };
}
