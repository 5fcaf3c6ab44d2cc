//! Byte encodings for Dilithium keys and signatures.
//!
//! ```text
//! pk  = rho (32) ‖ t1 (K × 288)
//! sk  = rho (32) ‖ key (32) ‖ tr (48) ‖ s1 (L × eta) ‖ s2 (K × eta) ‖ t0 (K × 448)
//! sig = z (L × 640) ‖ h (OMEGA + K) ‖ c (32 + 8)
//! ```
//!
//! Every polynomial is packed LSB-first with `pack_bits`. Decoding of the
//! hint and challenge sections is strict: any byte string that is not the
//! unique encoding of a valid `(h, c)` is rejected.

use latsig_algorithms::poly::polynomial::Poly;
use latsig_algorithms::poly::serialize::{pack_bits, unpack_bits};
use latsig_params::pqc::dilithium::{
    DilithiumParams, CHALLENGE_PACKED_BYTES, CHALLENGE_WEIGHT, CRH_BYTES, DILITHIUM_D as D,
    DILITHIUM_GAMMA1 as GAMMA1, DILITHIUM_N as N, DILITHIUM_Q as Q, POLY_T0_PACKED_BYTES,
    POLY_T1_PACKED_BYTES, POLY_W1_PACKED_BYTES, POLY_Z_PACKED_BYTES, SEED_BYTES,
};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::polyvec::PolyVec;
use crate::error::{Error as SignError, Result};

/// Decoded secret key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts<const K: usize, const L: usize> {
    pub rho: [u8; SEED_BYTES],
    pub key: [u8; SEED_BYTES],
    pub tr: [u8; CRH_BYTES],
    pub s1: PolyVec<L>,
    pub s2: PolyVec<K>,
    pub t0: PolyVec<K>,
}

// Polynomial packers

fn pack_eta(p: &Poly, eta: u32, bits: usize, out: &mut [u8]) -> Result<()> {
    let mut vals = Zeroizing::new([0u32; N]);
    for (v, &a) in vals.iter_mut().zip(&p.coeffs) {
        *v = Q.wrapping_add(eta).wrapping_sub(a);
    }
    pack_bits(&vals[..], bits, out)?;
    Ok(())
}

fn unpack_eta(bytes: &[u8], eta: u32, bits: usize) -> Result<Poly> {
    let mut vals = Zeroizing::new([0u32; N]);
    unpack_bits(bytes, bits, &mut vals[..])?;
    let mut p = Poly::zero();
    for (c, &v) in p.coeffs.iter_mut().zip(vals.iter()) {
        if v > 2 * eta {
            return Err(SignError::Deserialization(
                "secret coefficient out of range".into(),
            ));
        }
        *c = Q + eta - v;
    }
    Ok(p)
}

fn pack_t0(p: &Poly, out: &mut [u8]) -> Result<()> {
    let mut vals = Zeroizing::new([0u32; N]);
    for (v, &a) in vals.iter_mut().zip(&p.coeffs) {
        *v = (Q + (1 << (D - 1))).wrapping_sub(a);
    }
    pack_bits(&vals[..], D as usize, out)?;
    Ok(())
}

fn unpack_t0(bytes: &[u8]) -> Result<Poly> {
    let mut p = Poly::zero();
    unpack_bits(bytes, D as usize, &mut p.coeffs)?;
    for c in p.coeffs.iter_mut() {
        *c = Q + (1 << (D - 1)) - *c;
    }
    Ok(p)
}

fn pack_z(p: &Poly, out: &mut [u8]) -> Result<()> {
    let mut vals = [0u32; N];
    for (v, &a) in vals.iter_mut().zip(&p.coeffs) {
        // Map z in [-(gamma1 - 1), gamma1 - 1] to [0, 2 * gamma1 - 2]
        let t = (GAMMA1 - 1).wrapping_sub(a);
        *v = t.wrapping_add(((t as i32 >> 31) as u32) & Q);
    }
    pack_bits(&vals, 20, out)?;
    Ok(())
}

fn unpack_z(bytes: &[u8]) -> Result<Poly> {
    let mut p = Poly::zero();
    unpack_bits(bytes, 20, &mut p.coeffs)?;
    for c in p.coeffs.iter_mut() {
        let t = (GAMMA1 - 1).wrapping_sub(*c);
        *c = t.wrapping_add(((t as i32 >> 31) as u32) & Q);
    }
    Ok(p)
}

/// Packs the high bits `w1` (coefficients in `[0, 15]`) at 4 bits each.
pub fn pack_w1<const K: usize>(w1: &PolyVec<K>) -> Result<Vec<u8>> {
    let mut out = vec![0u8; K * POLY_W1_PACKED_BYTES];
    for (p, chunk) in w1.polys.iter().zip(out.chunks_exact_mut(POLY_W1_PACKED_BYTES)) {
        pack_bits(&p.coeffs, 4, chunk)?;
    }
    Ok(out)
}

// Keys

/// Encodes `rho ‖ t1`.
pub fn pack_public_key<P, const K: usize, const L: usize>(
    rho: &[u8; SEED_BYTES],
    t1: &PolyVec<K>,
) -> Result<Vec<u8>>
where
    P: DilithiumParams<K, L>,
{
    let mut pk = vec![0u8; P::PUBLIC_KEY_BYTES];
    let (head, body) = pk.split_at_mut(SEED_BYTES);
    head.copy_from_slice(rho);
    for (p, chunk) in t1.polys.iter().zip(body.chunks_exact_mut(POLY_T1_PACKED_BYTES)) {
        pack_bits(&p.coeffs, 9, chunk)?;
    }
    Ok(pk)
}

/// Decodes a public key into `(rho, t1)`.
pub fn unpack_public_key<P, const K: usize, const L: usize>(
    pk: &[u8],
) -> Result<([u8; SEED_BYTES], PolyVec<K>)>
where
    P: DilithiumParams<K, L>,
{
    if pk.len() != P::PUBLIC_KEY_BYTES {
        return Err(SignError::InvalidKeySize {
            expected: P::PUBLIC_KEY_BYTES,
            actual: pk.len(),
        });
    }

    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..SEED_BYTES]);

    let mut t1 = PolyVec::<K>::zero();
    for (p, chunk) in t1
        .polys
        .iter_mut()
        .zip(pk[SEED_BYTES..].chunks_exact(POLY_T1_PACKED_BYTES))
    {
        unpack_bits(chunk, 9, &mut p.coeffs)?;
    }
    Ok((rho, t1))
}

/// Encodes `rho ‖ key ‖ tr ‖ s1 ‖ s2 ‖ t0`.
pub fn pack_secret_key<P, const K: usize, const L: usize>(
    sk: &SecretKeyParts<K, L>,
) -> Result<Vec<u8>>
where
    P: DilithiumParams<K, L>,
{
    let eta_bytes = P::POLY_ETA_PACKED_BYTES;
    let mut out = vec![0u8; P::SECRET_KEY_BYTES];

    let (seeds, rest) = out.split_at_mut(2 * SEED_BYTES + CRH_BYTES);
    seeds[..SEED_BYTES].copy_from_slice(&sk.rho);
    seeds[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&sk.key);
    seeds[2 * SEED_BYTES..].copy_from_slice(&sk.tr);

    let (s1_bytes, rest) = rest.split_at_mut(L * eta_bytes);
    for (p, chunk) in sk.s1.polys.iter().zip(s1_bytes.chunks_exact_mut(eta_bytes)) {
        pack_eta(p, P::ETA, P::ETA_BITS, chunk)?;
    }
    let (s2_bytes, t0_bytes) = rest.split_at_mut(K * eta_bytes);
    for (p, chunk) in sk.s2.polys.iter().zip(s2_bytes.chunks_exact_mut(eta_bytes)) {
        pack_eta(p, P::ETA, P::ETA_BITS, chunk)?;
    }
    for (p, chunk) in sk.t0.polys.iter().zip(t0_bytes.chunks_exact_mut(POLY_T0_PACKED_BYTES)) {
        pack_t0(p, chunk)?;
    }
    Ok(out)
}

/// Decodes a secret key. Eta coefficients outside `[0, 2 * eta]` are rejected.
pub fn unpack_secret_key<P, const K: usize, const L: usize>(
    sk: &[u8],
) -> Result<SecretKeyParts<K, L>>
where
    P: DilithiumParams<K, L>,
{
    if sk.len() != P::SECRET_KEY_BYTES {
        return Err(SignError::InvalidKeySize {
            expected: P::SECRET_KEY_BYTES,
            actual: sk.len(),
        });
    }
    let eta_bytes = P::POLY_ETA_PACKED_BYTES;

    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: [0u8; CRH_BYTES],
        s1: PolyVec::<L>::zero(),
        s2: PolyVec::<K>::zero(),
        t0: PolyVec::<K>::zero(),
    };

    let (seeds, rest) = sk.split_at(2 * SEED_BYTES + CRH_BYTES);
    parts.rho.copy_from_slice(&seeds[..SEED_BYTES]);
    parts.key.copy_from_slice(&seeds[SEED_BYTES..2 * SEED_BYTES]);
    parts.tr.copy_from_slice(&seeds[2 * SEED_BYTES..]);

    let (s1_bytes, rest) = rest.split_at(L * eta_bytes);
    for (p, chunk) in parts.s1.polys.iter_mut().zip(s1_bytes.chunks_exact(eta_bytes)) {
        *p = unpack_eta(chunk, P::ETA, P::ETA_BITS)?;
    }
    let (s2_bytes, t0_bytes) = rest.split_at(K * eta_bytes);
    for (p, chunk) in parts.s2.polys.iter_mut().zip(s2_bytes.chunks_exact(eta_bytes)) {
        *p = unpack_eta(chunk, P::ETA, P::ETA_BITS)?;
    }
    for (p, chunk) in parts.t0.polys.iter_mut().zip(t0_bytes.chunks_exact(POLY_T0_PACKED_BYTES)) {
        *p = unpack_t0(chunk)?;
    }
    Ok(parts)
}

// Signatures

fn pack_hints<const K: usize>(h: &PolyVec<K>, omega: usize, out: &mut [u8]) -> Result<()> {
    let mut k = 0;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, &c) in p.coeffs.iter().enumerate() {
            if c != 0 {
                if k == omega {
                    return Err(SignError::Encoding(format!(
                        "more than {} hint bits",
                        omega
                    )));
                }
                out[k] = j as u8;
                k += 1;
            }
        }
        out[omega + i] = k as u8;
    }
    out[k..omega].fill(0);
    Ok(())
}

fn unpack_hints<const K: usize>(bytes: &[u8], omega: usize) -> Result<PolyVec<K>> {
    let malformed = |what: &str| SignError::Deserialization(format!("malformed hint: {}", what));

    let mut h = PolyVec::<K>::zero();
    let mut k = 0;
    for (i, p) in h.polys.iter_mut().enumerate() {
        let end = bytes[omega + i] as usize;
        if end < k || end > omega {
            return Err(malformed("count out of range"));
        }
        for j in k..end {
            // Indices must be strictly increasing within a polynomial
            if j > k && bytes[j] <= bytes[j - 1] {
                return Err(malformed("indices not increasing"));
            }
            p.coeffs[bytes[j] as usize] = 1;
        }
        k = end;
    }
    if bytes[k..omega].iter().any(|&b| b != 0) {
        return Err(malformed("nonzero padding"));
    }
    Ok(h)
}

fn pack_challenge(c: &Poly, out: &mut [u8]) {
    let (bitmap, sign_bytes) = out.split_at_mut(N / 8);
    let mut signs = 0u64;
    let mut mask = 1u64;
    for (byte, coeffs) in bitmap.iter_mut().zip(c.coeffs.chunks_exact(8)) {
        *byte = 0;
        for (j, &a) in coeffs.iter().enumerate() {
            if a != 0 {
                *byte |= 1 << j;
                if a == Q - 1 {
                    signs |= mask;
                }
                mask <<= 1;
            }
        }
    }
    sign_bytes.copy_from_slice(&signs.to_le_bytes());
}

fn unpack_challenge(bytes: &[u8]) -> Result<Poly> {
    let (bitmap, sign_bytes) = bytes.split_at(N / 8);
    let mut raw = [0u8; 8];
    raw.copy_from_slice(sign_bytes);
    let mut signs = u64::from_le_bytes(raw);
    if signs >> CHALLENGE_WEIGHT != 0 {
        return Err(SignError::Deserialization(
            "challenge sign bits beyond weight".into(),
        ));
    }
    let weight: u32 = bitmap.iter().map(|b| b.count_ones()).sum();
    if weight as usize != CHALLENGE_WEIGHT {
        return Err(SignError::Deserialization(format!(
            "challenge weight {} instead of {}",
            weight, CHALLENGE_WEIGHT
        )));
    }

    let mut c = Poly::zero();
    for (byte_idx, &byte) in bitmap.iter().enumerate() {
        for j in 0..8 {
            if (byte >> j) & 1 == 1 {
                c.coeffs[8 * byte_idx + j] = if signs & 1 == 1 { Q - 1 } else { 1 };
                signs >>= 1;
            }
        }
    }
    Ok(c)
}

/// Encodes `z ‖ h ‖ c`. `z` must be canonical and `h` carry at most OMEGA bits.
pub fn pack_signature<P, const K: usize, const L: usize>(
    z: &PolyVec<L>,
    h: &PolyVec<K>,
    c: &Poly,
) -> Result<Vec<u8>>
where
    P: DilithiumParams<K, L>,
{
    let mut sig = vec![0u8; P::SIGNATURE_BYTES];
    let (z_bytes, rest) = sig.split_at_mut(L * POLY_Z_PACKED_BYTES);
    for (p, chunk) in z.polys.iter().zip(z_bytes.chunks_exact_mut(POLY_Z_PACKED_BYTES)) {
        pack_z(p, chunk)?;
    }
    let (h_bytes, c_bytes) = rest.split_at_mut(P::OMEGA + K);
    pack_hints(h, P::OMEGA, h_bytes)?;
    pack_challenge(c, c_bytes);
    Ok(sig)
}

/// Decodes a signature into `(z, h, c)`.
///
/// The input must be exactly `SIGNATURE_BYTES` long.
pub fn unpack_signature<P, const K: usize, const L: usize>(
    sig: &[u8],
) -> Result<(PolyVec<L>, PolyVec<K>, Poly)>
where
    P: DilithiumParams<K, L>,
{
    if sig.len() != P::SIGNATURE_BYTES {
        return Err(SignError::InvalidSignatureSize {
            expected: P::SIGNATURE_BYTES,
            actual: sig.len(),
        });
    }
    debug_assert_eq!(
        P::SIGNATURE_BYTES,
        L * POLY_Z_PACKED_BYTES + P::OMEGA + K + CHALLENGE_PACKED_BYTES
    );

    let (z_bytes, rest) = sig.split_at(L * POLY_Z_PACKED_BYTES);
    let mut z = PolyVec::<L>::zero();
    for (p, chunk) in z.polys.iter_mut().zip(z_bytes.chunks_exact(POLY_Z_PACKED_BYTES)) {
        *p = unpack_z(chunk)?;
    }
    let (h_bytes, c_bytes) = rest.split_at(P::OMEGA + K);
    let h = unpack_hints::<K>(h_bytes, P::OMEGA)?;
    let c = unpack_challenge(c_bytes)?;
    Ok((z, h, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use latsig_params::pqc::dilithium::{Dilithium2Params, Dilithium4Params};
    use proptest::prelude::*;

    type P2 = Dilithium2Params;

    fn centred_poly(vals: &[i32]) -> Poly {
        let mut p = Poly::zero();
        for (c, &v) in p.coeffs.iter_mut().zip(vals.iter().cycle()) {
            *c = (Q as i64 + v as i64) as u32;
        }
        p
    }

    fn sample_challenge() -> Poly {
        let mut c = Poly::zero();
        for i in 0..CHALLENGE_WEIGHT {
            c.coeffs[4 * i + 1] = if i % 3 == 0 { Q - 1 } else { 1 };
        }
        c
    }

    #[test]
    fn test_eta_packing_both_widths() {
        let s = centred_poly(&[-6, -1, 0, 1, 6]);
        let mut buf = vec![0u8; 128];
        pack_eta(&s, 6, 4, &mut buf).unwrap();
        assert_eq!(unpack_eta(&buf, 6, 4).unwrap(), s);

        let s = centred_poly(&[-3, 0, 2, 3]);
        let mut buf = vec![0u8; 96];
        pack_eta(&s, 3, 3, &mut buf).unwrap();
        assert_eq!(unpack_eta(&buf, 3, 3).unwrap(), s);
    }

    #[test]
    fn test_unpack_eta_rejects_out_of_range() {
        // nibble 0xF = 15 > 2 * 6
        let buf = [0xFFu8; 128];
        assert!(matches!(unpack_eta(&buf, 6, 4), Err(SignError::Deserialization(_))));
    }

    #[test]
    fn test_t0_and_z_packing() {
        let t0 = centred_poly(&[-(1 << 13) + 1, -1, 0, 1, 1 << 13]);
        let mut buf = vec![0u8; POLY_T0_PACKED_BYTES];
        pack_t0(&t0, &mut buf).unwrap();
        assert_eq!(unpack_t0(&buf).unwrap(), t0);

        // z is canonical: negative values are q + v
        let mut z = centred_poly(&[-(GAMMA1 as i32 - 1), -5, 0, 7, GAMMA1 as i32 - 1]);
        z.freeze();
        let mut buf = vec![0u8; POLY_Z_PACKED_BYTES];
        pack_z(&z, &mut buf).unwrap();
        assert_eq!(unpack_z(&buf).unwrap(), z);
    }

    #[test]
    fn test_public_key_layout() {
        let rho = [7u8; SEED_BYTES];
        let mut t1 = PolyVec::<4>::zero();
        t1.polys[0].coeffs[0] = 0x1FF;
        t1.polys[3].coeffs[255] = 1;

        let pk = pack_public_key::<P2, 4, 3>(&rho, &t1).unwrap();
        assert_eq!(pk.len(), 1184);
        assert_eq!(&pk[..SEED_BYTES], &rho);
        assert_eq!(pk[SEED_BYTES], 0xFF);
        assert_eq!(pk[SEED_BYTES + 1], 0x01);

        let (rho2, t1b) = unpack_public_key::<P2, 4, 3>(&pk).unwrap();
        assert_eq!(rho2, rho);
        assert_eq!(t1b, t1);

        assert!(matches!(
            unpack_public_key::<P2, 4, 3>(&pk[1..]),
            Err(SignError::InvalidKeySize { expected: 1184, actual: 1183 })
        ));
    }

    #[test]
    fn test_secret_key_roundtrip_mode4() {
        let parts = SecretKeyParts::<6, 5> {
            rho: [1; SEED_BYTES],
            key: [2; SEED_BYTES],
            tr: [3; CRH_BYTES],
            s1: PolyVec::from_polys(core::array::from_fn(|i| centred_poly(&[i as i32 - 2, 3, -3]))),
            s2: PolyVec::from_polys(core::array::from_fn(|i| centred_poly(&[1 - i as i32 % 3]))),
            t0: PolyVec::from_polys(core::array::from_fn(|i| centred_poly(&[i as i32 * 100 - 4000]))),
        };
        let bytes = pack_secret_key::<Dilithium4Params, 6, 5>(&parts).unwrap();
        assert_eq!(bytes.len(), 3856);

        let back = unpack_secret_key::<Dilithium4Params, 6, 5>(&bytes).unwrap();
        assert_eq!(back.rho, parts.rho);
        assert_eq!(back.key, parts.key);
        assert_eq!(back.tr, parts.tr);
        assert_eq!(back.s1, parts.s1);
        assert_eq!(back.s2, parts.s2);
        assert_eq!(back.t0, parts.t0);
    }

    fn sample_signature() -> (PolyVec<3>, PolyVec<4>, Poly, Vec<u8>) {
        let mut z = PolyVec::<3>::zero();
        z.polys[1].coeffs[10] = Q - 12345;
        z.polys[2].coeffs[0] = 400_000;
        let mut h = PolyVec::<4>::zero();
        h.polys[0].coeffs[3] = 1;
        h.polys[0].coeffs[200] = 1;
        h.polys[2].coeffs[0] = 1;
        let c = sample_challenge();
        let sig = pack_signature::<P2, 4, 3>(&z, &h, &c).unwrap();
        (z, h, c, sig)
    }

    #[test]
    fn test_signature_roundtrip_and_hint_layout() {
        let (z, h, c, sig) = sample_signature();
        assert_eq!(sig.len(), 2044);

        let hint = &sig[3 * POLY_Z_PACKED_BYTES..3 * POLY_Z_PACKED_BYTES + 84];
        assert_eq!(&hint[..4], &[3, 200, 0, 0]);
        assert_eq!(&hint[80..], &[2, 2, 3, 3]);

        let (z2, h2, c2) = unpack_signature::<P2, 4, 3>(&sig).unwrap();
        assert_eq!((z2, h2, c2), (z, h, c));
    }

    #[test]
    fn test_malformed_hints_rejected() {
        let (_, _, _, sig) = sample_signature();
        let base = 3 * POLY_Z_PACKED_BYTES;

        // Count for polynomial 1 below the previous count
        let mut bad = sig.clone();
        bad[base + 81] = 1;
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());

        // Count above OMEGA
        let mut bad = sig.clone();
        bad[base + 83] = 81;
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());

        // Indices out of order
        let mut bad = sig.clone();
        bad.swap(base, base + 1);
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());

        // Nonzero unused index byte
        let mut bad = sig.clone();
        bad[base + 79] = 9;
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());
    }

    #[test]
    fn test_malformed_challenge_rejected() {
        let (_, _, _, sig) = sample_signature();
        let c_off = sig.len() - CHALLENGE_PACKED_BYTES;

        // Sign bit beyond the 60 used ones
        let mut bad = sig.clone();
        *bad.last_mut().unwrap() |= 0x80;
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());

        // Extra nonzero position
        let mut bad = sig.clone();
        bad[c_off] |= 0x01;
        assert!(unpack_signature::<P2, 4, 3>(&bad).is_err());

        assert!(unpack_signature::<P2, 4, 3>(&sig[..sig.len() - 1]).is_err());
    }

    #[test]
    fn test_pack_w1_nibbles() {
        let mut w1 = PolyVec::<2>::zero();
        w1.polys[0].coeffs[0] = 0xA;
        w1.polys[0].coeffs[1] = 0x5;
        w1.polys[1].coeffs[255] = 0xF;
        let bytes = pack_w1(&w1).unwrap();
        assert_eq!(bytes.len(), 256);
        assert_eq!(bytes[0], 0x5A);
        assert_eq!(bytes[255], 0xF0);
    }

    proptest! {
        #[test]
        fn prop_z_roundtrip(vals in proptest::collection::vec(-(GAMMA1 as i32 - 1)..(GAMMA1 as i32), N)) {
            let mut z = centred_poly(&vals);
            z.freeze();
            let mut buf = vec![0u8; POLY_Z_PACKED_BYTES];
            pack_z(&z, &mut buf).unwrap();
            prop_assert_eq!(unpack_z(&buf).unwrap(), z);
        }
    }
}
