//! SHAKE extendable output functions (FIPS 202)
//!
//! The Keccak permutation comes from the RustCrypto `sha3` crate; this
//! module only adds the absorb/squeeze state machine used by the samplers.

use core::mem;

use latsig_params::utils::hash::{
    SHAKE128_RATE, SHAKE128_SECURITY_LEVEL, SHAKE256_RATE, SHAKE256_SECURITY_LEVEL,
};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

use super::ExtendableOutputFunction;
use crate::error::{Error, Result};

/// Compile-time description of a SHAKE variant
pub trait ShakeVariant: Default + Update + ExtendableOutput + Clone {
    /// Sponge rate in bytes
    const RATE: usize;
    /// Security level in bits
    const SECURITY_LEVEL: usize;
    /// Algorithm identifier used in error contexts
    const ALGORITHM_ID: &'static str;
}

impl ShakeVariant for Shake128 {
    const RATE: usize = SHAKE128_RATE;
    const SECURITY_LEVEL: usize = SHAKE128_SECURITY_LEVEL;
    const ALGORITHM_ID: &'static str = "SHAKE-128";
}

impl ShakeVariant for Shake256 {
    const RATE: usize = SHAKE256_RATE;
    const SECURITY_LEVEL: usize = SHAKE256_SECURITY_LEVEL;
    const ALGORITHM_ID: &'static str = "SHAKE-256";
}

enum State<H: ExtendableOutput> {
    Absorbing(H),
    Squeezing(H::Reader),
}

/// Incremental SHAKE instance
pub struct ShakeXof<H: ShakeVariant> {
    state: State<H>,
}

/// SHAKE-128 with a 168-byte rate
pub type ShakeXof128 = ShakeXof<Shake128>;

/// SHAKE-256 with a 136-byte rate
pub type ShakeXof256 = ShakeXof<Shake256>;

impl<H: ShakeVariant> Clone for ShakeXof<H>
where
    H::Reader: Clone,
{
    fn clone(&self) -> Self {
        let state = match &self.state {
            State::Absorbing(h) => State::Absorbing(h.clone()),
            State::Squeezing(r) => State::Squeezing(r.clone()),
        };
        Self { state }
    }
}

impl<H: ShakeVariant> ShakeXof<H> {
    /// Returns true once output has been requested
    pub fn is_squeezing(&self) -> bool {
        matches!(self.state, State::Squeezing(_))
    }
}

impl<H: ShakeVariant> ExtendableOutputFunction for ShakeXof<H> {
    const RATE: usize = H::RATE;

    fn new() -> Self {
        Self {
            state: State::Absorbing(H::default()),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            State::Absorbing(h) => {
                h.update(data);
                Ok(())
            }
            State::Squeezing(_) => Err(Error::xof_state(
                H::ALGORITHM_ID,
                "cannot absorb after output has been squeezed",
            )),
        }
    }

    fn finalize(&mut self) -> Result<()> {
        if let State::Absorbing(h) = &mut self.state {
            let hasher = mem::take(h);
            self.state = State::Squeezing(hasher.finalize_xof());
        }
        Ok(())
    }

    fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
        self.finalize()?;
        match &mut self.state {
            State::Squeezing(reader) => {
                reader.read(output);
                Ok(())
            }
            State::Absorbing(_) => Err(Error::xof_state(H::ALGORITHM_ID, "finalize failed")),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.state = State::Absorbing(H::default());
        Ok(())
    }

    fn security_level() -> usize {
        H::SECURITY_LEVEL
    }
}

#[cfg(test)]
mod tests;
