//! Extendable Output Functions (XOF)
//!
//! This module exposes the SHAKE family behind a small incremental
//! interface: absorb with [`ExtendableOutputFunction::update`], then squeeze
//! arbitrary amounts of output. Samplers that consume whole Keccak blocks
//! use [`ExtendableOutputFunction::squeeze_blocks`] together with `RATE`.

use crate::error::{validate, Error, Result};

pub mod shake;

// Re-exports
pub use shake::{ShakeXof128, ShakeXof256};

/// Trait for extendable output functions
pub trait ExtendableOutputFunction {
    /// Block size of the sponge in bytes
    const RATE: usize;

    /// Creates a new instance of the XOF
    fn new() -> Self;

    /// Absorbs more input. Fails once output has been squeezed.
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Finalizes the absorb phase. Calling it twice is a no-op.
    fn finalize(&mut self) -> Result<()>;

    /// Squeezes output bytes into the provided buffer, finalizing first if needed
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeezes whole blocks of `RATE` bytes
    fn squeeze_blocks(&mut self, output: &mut [u8]) -> Result<()> {
        validate::block_multiple("XOF block output", output.len(), Self::RATE)?;
        self.squeeze(output)
    }

    /// Squeezes the specified number of output bytes into a new vector
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.squeeze(&mut out)?;
        Ok(out)
    }

    /// Resets the XOF to its initial absorbing state
    fn reset(&mut self) -> Result<()>;

    /// Returns the security level in bits
    fn security_level() -> usize;

    /// Convenience method to generate output in a single call
    fn generate(data: &[u8], len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        validate::parameter(
            len > 0,
            "output_length",
            "XOF output length must be greater than 0",
        )?;

        let mut xof = Self::new();
        xof.update(data)?;
        xof.squeeze_into_vec(len)
    }
}

// Error conversion helpers for XOF-specific errors
impl Error {
    /// Create an XOF state error
    pub(crate) fn xof_state(operation: &'static str, state: &'static str) -> Self {
        Error::Processing {
            operation,
            details: state,
        }
    }
}
