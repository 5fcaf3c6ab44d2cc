//! Constants for SHAKE extendable output functions

/// Rate (block size) of SHAKE-128 in bytes
pub const SHAKE128_RATE: usize = 168;

/// Rate (block size) of SHAKE-256 in bytes
pub const SHAKE256_RATE: usize = 136;

/// Security level of SHAKE-128 in bits
pub const SHAKE128_SECURITY_LEVEL: usize = 128;

/// Security level of SHAKE-256 in bits
pub const SHAKE256_SECURITY_LEVEL: usize = 256;
