//! Error types for the signature crate

use latsig_algorithms::error::Error as AlgoError;
use thiserror::Error;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid key size
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Invalid signature size
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Signature generation failed
    #[error("{algorithm} signature generation failed: {details}")]
    SignatureGeneration {
        algorithm: &'static str,
        details: String,
    },

    /// Verification failed
    #[error("{algorithm} verification failed: {details}")]
    Verification {
        algorithm: &'static str,
        details: String,
    },

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Deserialization error (malformed key or signature bytes)
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Nonce space exhausted
    #[error("Nonce error: {0}")]
    Nonce(String),

    /// Hashing/XOF error
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// RNG error
    #[error("RNG error: {0}")]
    Rng(String),
}

impl Error {
    /// Wraps a primitive error raised while hashing or sampling
    pub fn from_algo(err: AlgoError) -> Self {
        Self::Hashing(err.to_string())
    }

    /// Plain verification failure for `algorithm`
    pub(crate) fn verification(algorithm: &'static str, details: &str) -> Self {
        Self::Verification {
            algorithm,
            details: details.into(),
        }
    }
}

// Convert from algorithms::error::Error
impl From<AlgoError> for Error {
    fn from(err: AlgoError) -> Self {
        match err {
            AlgoError::Parameter { name, reason } => {
                Error::InvalidParameter(format!("{}: {}", name, reason))
            }
            AlgoError::Length {
                context,
                expected,
                actual,
            } => Error::Encoding(format!(
                "{}: expected {} bytes, got {}",
                context, expected, actual
            )),
            other => Error::from_algo(other),
        }
    }
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Error::Rng(err.to_string())
    }
}

// Convert to api::Error
impl From<Error> for latsig_api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidKeySize { expected, actual } => latsig_api::Error::InvalidLength {
                context: "key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => latsig_api::Error::InvalidLength {
                context: "signature",
                expected,
                actual,
            },
            Error::InvalidParameter(msg) => latsig_api::Error::InvalidParameter {
                context: "sign",
                message: msg,
            },
            Error::SignatureGeneration { algorithm, details } => {
                latsig_api::Error::InvalidSignature {
                    context: algorithm,
                    message: format!("Signature generation failed: {}", details),
                }
            }
            Error::Verification { algorithm, details } => latsig_api::Error::InvalidSignature {
                context: algorithm,
                message: details,
            },
            Error::Encoding(s) => latsig_api::Error::SerializationError {
                context: "encoding",
                message: s,
            },
            Error::Deserialization(s) => latsig_api::Error::SerializationError {
                context: "deserialization",
                message: s,
            },
            Error::Nonce(s) => latsig_api::Error::InvalidParameter {
                context: "nonce",
                message: s,
            },
            Error::Hashing(s) => latsig_api::Error::Other {
                context: "hashing",
                message: s,
            },
            Error::Rng(s) => latsig_api::Error::RandomGenerationError {
                context: "rng",
                message: s,
            },
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
