//! Post-quantum signature schemes

pub mod dilithium;

pub use dilithium::{Dilithium1, Dilithium2, Dilithium3, Dilithium4};
