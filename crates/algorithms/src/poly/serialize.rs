//! Coefficient packing and unpacking
//!
//! All packed formats in this workspace are contiguous little-endian bit
//! strings: coefficient `i` occupies bits `[i * w, (i + 1) * w)` of the
//! output, and each byte is filled from its least significant bit.

use crate::error::{validate, Error, Result};

/// Number of bytes needed to pack `n` coefficients of `bits_per_coeff` bits
pub const fn bytes_required(bits_per_coeff: usize, n: usize) -> usize {
    (n * bits_per_coeff + 7) / 8
}

fn check_width(bits_per_coeff: usize) -> Result<u32> {
    if bits_per_coeff == 0 || bits_per_coeff > 32 {
        return Err(Error::param(
            "bits_per_coeff",
            format!("must be in range [1, 32], got {}", bits_per_coeff),
        ));
    }
    Ok(if bits_per_coeff == 32 {
        u32::MAX
    } else {
        (1u32 << bits_per_coeff) - 1
    })
}

/// Packs the low `bits_per_coeff` bits of every value into `out`.
///
/// `out` must be exactly `bytes_required(bits_per_coeff, values.len())`
/// bytes long. Higher bits of each value are ignored.
pub fn pack_bits(values: &[u32], bits_per_coeff: usize, out: &mut [u8]) -> Result<()> {
    let mask = check_width(bits_per_coeff)?;
    validate::length(
        "packed coefficients",
        out.len(),
        bytes_required(bits_per_coeff, values.len()),
    )?;

    let mut acc = 0u64;
    let mut acc_bits = 0;
    let mut pos = 0;
    for &v in values {
        acc |= ((v & mask) as u64) << acc_bits;
        acc_bits += bits_per_coeff;
        while acc_bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out[pos] = acc as u8;
    }
    Ok(())
}

/// Inverse of [`pack_bits`]: fills `values` with `bits_per_coeff`-bit fields.
///
/// `bytes` must be exactly `bytes_required(bits_per_coeff, values.len())`
/// bytes long.
pub fn unpack_bits(bytes: &[u8], bits_per_coeff: usize, values: &mut [u32]) -> Result<()> {
    let mask = check_width(bits_per_coeff)?;
    validate::length(
        "packed coefficients",
        bytes.len(),
        bytes_required(bits_per_coeff, values.len()),
    )?;

    let mut acc = 0u64;
    let mut acc_bits = 0;
    let mut input = bytes.iter();
    for v in values.iter_mut() {
        while acc_bits < bits_per_coeff {
            // Length was validated above, so the iterator cannot run dry here
            let byte = input.next().copied().unwrap_or(0);
            acc |= (byte as u64) << acc_bits;
            acc_bits += 8;
        }
        *v = (acc as u32) & mask;
        acc >>= bits_per_coeff;
        acc_bits -= bits_per_coeff;
    }
    Ok(())
}
