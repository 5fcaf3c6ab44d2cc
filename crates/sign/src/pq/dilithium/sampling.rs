//! Rejection samplers for Dilithium polynomials.
//!
//! Every sampler keys an XOF with `seed ‖ nonce` (nonce as two little-endian
//! bytes), squeezes whole blocks and rejects out-of-range candidates:
//!
//! - uniform mod q (SHAKE-128, matrix entries, NTT domain)
//! - eta-bounded (SHAKE-256, secret vectors s1 and s2)
//! - gamma1-bounded (SHAKE-256, masking vector y)
//!
//! The `_4x` variants run four independent streams in lockstep and return
//! exactly what the scalar sampler returns for each nonce.

use latsig_algorithms::poly::polynomial::{NttPoly, Poly};
use latsig_algorithms::xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
use latsig_params::pqc::dilithium::{
    CRH_BYTES, DILITHIUM_GAMMA1 as GAMMA1, DILITHIUM_N as N, DILITHIUM_Q as Q, SEED_BYTES,
};
use latsig_params::utils::hash::SHAKE128_RATE;
use zeroize::Zeroize;

use super::polyvec::PolyVec;
use crate::error::{Error as SignError, Result};

/// Candidate distributions handled by the shared rejection loop
#[derive(Clone, Copy, Debug)]
enum Distribution {
    /// 23-bit candidates from 3 bytes, accepted if `< q`
    Uniform,
    /// Nibble (or 3-bit) candidates, accepted if `<= 2 * eta`
    Eta { eta: u32 },
    /// 20-bit candidates from 2.5 bytes, accepted if `<= 2 * gamma1 - 2`
    Gamma1,
}

impl Distribution {
    /// Blocks squeezed before the first rejection pass
    fn initial_blocks(self, rate: usize) -> usize {
        match self {
            Distribution::Uniform => (769 + rate) / rate,
            Distribution::Eta { eta } if eta <= 3 => (192 + rate) / rate,
            Distribution::Eta { .. } => (271 + rate) / rate,
            Distribution::Gamma1 => (641 + rate) / rate,
        }
    }

    /// Bytes consumed per candidate group; a partial group is carried over
    fn group_bytes(self) -> usize {
        match self {
            Distribution::Uniform => 3,
            Distribution::Eta { .. } => 1,
            Distribution::Gamma1 => 5,
        }
    }

    /// Fills `out` from `buf`, returning the number of accepted values.
    fn reject(self, out: &mut [u32], buf: &[u8]) -> usize {
        match self {
            Distribution::Uniform => rej_uniform(out, buf),
            Distribution::Eta { eta } => rej_eta(out, buf, eta),
            Distribution::Gamma1 => rej_gamma1m1(out, buf),
        }
    }
}

fn rej_uniform(out: &mut [u32], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(3) {
        if ctr == out.len() {
            break;
        }
        let t = (chunk[0] as u32 | (chunk[1] as u32) << 8 | (chunk[2] as u32) << 16) & 0x7F_FFFF;
        if t < Q {
            out[ctr] = t;
            ctr += 1;
        }
    }
    ctr
}

fn rej_eta(out: &mut [u32], buf: &[u8], eta: u32) -> usize {
    let mut ctr = 0;
    for &b in buf {
        if ctr == out.len() {
            break;
        }
        let (t0, t1) = if eta <= 3 {
            (b as u32 & 0x07, b as u32 >> 5)
        } else {
            (b as u32 & 0x0F, b as u32 >> 4)
        };
        if t0 <= 2 * eta {
            out[ctr] = Q + eta - t0;
            ctr += 1;
        }
        if t1 <= 2 * eta && ctr < out.len() {
            out[ctr] = Q + eta - t1;
            ctr += 1;
        }
    }
    ctr
}

fn rej_gamma1m1(out: &mut [u32], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(5) {
        if ctr == out.len() {
            break;
        }
        let t0 = (chunk[0] as u32 | (chunk[1] as u32) << 8 | (chunk[2] as u32) << 16) & 0xF_FFFF;
        let t1 = (chunk[2] as u32) >> 4 | (chunk[3] as u32) << 4 | (chunk[4] as u32) << 12;

        if t0 <= 2 * GAMMA1 - 2 {
            out[ctr] = Q + GAMMA1 - 1 - t0;
            ctr += 1;
        }
        if t1 <= 2 * GAMMA1 - 2 && ctr < out.len() {
            out[ctr] = Q + GAMMA1 - 1 - t1;
            ctr += 1;
        }
    }
    ctr
}

/// Largest lane buffer: five SHAKE-128 blocks for the uniform sampler plus
/// a partial 3-byte group carried over from the previous squeeze
const LANE_BUF_BYTES: usize = 5 * SHAKE128_RATE + 2;

/// One XOF stream feeding one polynomial
struct Lane<X: ExtendableOutputFunction> {
    xof: X,
    buf: [u8; LANE_BUF_BYTES],
    buflen: usize,
    coeffs: [u32; N],
    ctr: usize,
}

impl<X: ExtendableOutputFunction> Lane<X> {
    fn start(seed: &[u8], nonce: u16, dist: Distribution) -> Result<Self> {
        let mut xof = X::new();
        xof.update(seed)?;
        xof.update(&nonce.to_le_bytes())?;

        let buflen = dist.initial_blocks(X::RATE) * X::RATE;
        let mut buf = [0u8; LANE_BUF_BYTES];
        xof.squeeze_blocks(&mut buf[..buflen])?;

        let mut coeffs = [0u32; N];
        let ctr = dist.reject(&mut coeffs, &buf[..buflen]);
        Ok(Self {
            xof,
            buf,
            buflen,
            coeffs,
            ctr,
        })
    }

    fn is_full(&self) -> bool {
        self.ctr == N
    }

    /// Squeezes one more block, keeping the unconsumed tail of the last one.
    fn refill(&mut self, dist: Distribution) -> Result<()> {
        let off = self.buflen % dist.group_bytes();
        self.buf.copy_within(self.buflen - off..self.buflen, 0);
        self.xof.squeeze_blocks(&mut self.buf[off..off + X::RATE])?;
        self.buflen = X::RATE + off;
        self.ctr += dist.reject(&mut self.coeffs[self.ctr..], &self.buf[..self.buflen]);
        Ok(())
    }

    fn finish(mut self) -> [u32; N] {
        self.buf.zeroize();
        self.coeffs
    }
}

fn sample<X: ExtendableOutputFunction>(
    seed: &[u8],
    nonce: u16,
    dist: Distribution,
) -> Result<[u32; N]> {
    let mut lane = Lane::<X>::start(seed, nonce, dist)?;
    while !lane.is_full() {
        lane.refill(dist)?;
    }
    Ok(lane.finish())
}

fn sample_4x<X: ExtendableOutputFunction>(
    seed: &[u8],
    nonces: [u16; 4],
    dist: Distribution,
) -> Result<[[u32; N]; 4]> {
    let [l0, l1, l2, l3] = nonces.map(|n| Lane::<X>::start(seed, n, dist));
    let mut lanes = [l0?, l1?, l2?, l3?];

    while lanes.iter().any(|l| !l.is_full()) {
        for lane in lanes.iter_mut().filter(|l| !l.is_full()) {
            lane.refill(dist)?;
        }
    }
    Ok(lanes.map(Lane::finish))
}

/// Uniform polynomial mod q from SHAKE-128(seed ‖ nonce), in the NTT domain.
pub fn poly_uniform(seed: &[u8; SEED_BYTES], nonce: u16) -> Result<NttPoly> {
    let coeffs = sample::<ShakeXof128>(seed, nonce, Distribution::Uniform)?;
    Ok(NttPoly { coeffs })
}

/// Four uniform polynomials for the given nonces.
pub fn poly_uniform_4x(seed: &[u8; SEED_BYTES], nonces: [u16; 4]) -> Result<[NttPoly; 4]> {
    let lanes = sample_4x::<ShakeXof128>(seed, nonces, Distribution::Uniform)?;
    Ok(lanes.map(|coeffs| NttPoly { coeffs }))
}

/// Polynomial with centred coefficients in `[-eta, eta]`, stored as `q + eta - t`.
pub fn poly_uniform_eta(seed: &[u8; SEED_BYTES], nonce: u16, eta: u32) -> Result<Poly> {
    let coeffs = sample::<ShakeXof256>(seed, nonce, Distribution::Eta { eta })?;
    Ok(Poly { coeffs })
}

/// Four eta-bounded polynomials for the given nonces.
pub fn poly_uniform_eta_4x(
    seed: &[u8; SEED_BYTES],
    nonces: [u16; 4],
    eta: u32,
) -> Result<[Poly; 4]> {
    let lanes = sample_4x::<ShakeXof256>(seed, nonces, Distribution::Eta { eta })?;
    Ok(lanes.map(|coeffs| Poly { coeffs }))
}

/// Polynomial with centred coefficients in `[-(gamma1 - 1), gamma1 - 1]`,
/// stored as `q + gamma1 - 1 - t`.
pub fn poly_uniform_gamma1m1(seed: &[u8; CRH_BYTES], nonce: u16) -> Result<Poly> {
    let coeffs = sample::<ShakeXof256>(seed, nonce, Distribution::Gamma1)?;
    Ok(Poly { coeffs })
}

/// Four gamma1-bounded polynomials for the given nonces.
pub fn poly_uniform_gamma1m1_4x(seed: &[u8; CRH_BYTES], nonces: [u16; 4]) -> Result<[Poly; 4]> {
    let lanes = sample_4x::<ShakeXof256>(seed, nonces, Distribution::Gamma1)?;
    Ok(lanes.map(|coeffs| Poly { coeffs }))
}

fn nonce_at(first: u16, offset: usize) -> Result<u16> {
    u16::try_from(offset)
        .ok()
        .and_then(|o| first.checked_add(o))
        .ok_or_else(|| SignError::Nonce(format!("nonce overflow at {} + {}", first, offset)))
}

/// Fills a vector in groups of four, finishing any remainder one by one.
fn fill_vec<const LEN: usize>(
    first_nonce: u16,
    mut quad: impl FnMut([u16; 4]) -> Result<[Poly; 4]>,
    mut single: impl FnMut(u16) -> Result<Poly>,
) -> Result<PolyVec<LEN>> {
    let mut v = PolyVec::<LEN>::zero();
    let mut i = 0;
    while i + 4 <= LEN {
        let nonces = [
            nonce_at(first_nonce, i)?,
            nonce_at(first_nonce, i + 1)?,
            nonce_at(first_nonce, i + 2)?,
            nonce_at(first_nonce, i + 3)?,
        ];
        for (slot, p) in v.polys[i..i + 4].iter_mut().zip(quad(nonces)?) {
            *slot = p;
        }
        i += 4;
    }
    while i < LEN {
        v.polys[i] = single(nonce_at(first_nonce, i)?)?;
        i += 1;
    }
    Ok(v)
}

/// Samples `LEN` eta-bounded polynomials with nonces `first_nonce..first_nonce + LEN`.
pub fn sample_polyvec_eta<const LEN: usize>(
    seed: &[u8; SEED_BYTES],
    first_nonce: u16,
    eta: u32,
) -> Result<PolyVec<LEN>> {
    fill_vec(
        first_nonce,
        |nonces| poly_uniform_eta_4x(seed, nonces, eta),
        |nonce| poly_uniform_eta(seed, nonce, eta),
    )
}

/// Samples the masking vector y with nonces `first_nonce..first_nonce + LEN`.
pub fn sample_polyvec_gamma1<const LEN: usize>(
    seed: &[u8; CRH_BYTES],
    first_nonce: u16,
) -> Result<PolyVec<LEN>> {
    fill_vec(
        first_nonce,
        |nonces| poly_uniform_gamma1m1_4x(seed, nonces),
        |nonce| poly_uniform_gamma1m1(seed, nonce),
    )
}
