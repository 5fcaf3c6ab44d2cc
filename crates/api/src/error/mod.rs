//! Error handling for the latsig crates

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self::RandomGenerationError {
            context: "rng",
            message: e.to_string(),
        }
    }
}

impl std::error::Error for Error {}
