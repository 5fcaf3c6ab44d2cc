//! Constants for the Dilithium (round 2) digital signature algorithm

/// Dilithium polynomial degree
pub const DILITHIUM_N: usize = 256;

/// Dilithium modulus q = 2^23 - 2^13 + 1
pub const DILITHIUM_Q: u32 = 8380417;

/// Bit length of q
pub const DILITHIUM_QBITS: u32 = 23;

/// Number of low-order bits dropped from t
pub const DILITHIUM_D: u32 = 14;

/// Range parameter for the masking vector y: (q - 1) / 16
pub const DILITHIUM_GAMMA1: u32 = (DILITHIUM_Q - 1) / 16;

/// Low-order rounding range: gamma1 / 2
pub const DILITHIUM_GAMMA2: u32 = DILITHIUM_GAMMA1 / 2;

/// Decomposition modulus 2 * gamma2
pub const DILITHIUM_ALPHA: u32 = 2 * DILITHIUM_GAMMA2;

/// Length of rho, key and the key-generation seeds
pub const SEED_BYTES: usize = 32;

/// Output length of the collision-resistant hash (tr, mu, signing rhoprime)
pub const CRH_BYTES: usize = 48;

/// Number of nonzero (±1) coefficients in a challenge polynomial
pub const CHALLENGE_WEIGHT: usize = 60;

/// 2^32 mod q
pub const MONT: u32 = 4193792;

/// -q^(-1) mod 2^32
pub const QINV: u32 = 4236238847;

/// Primitive 512th root of unity modulo q
pub const ROOT_OF_UNITY: u32 = 1753;

/// Packed size of a t1 polynomial (9 bits per coefficient)
pub const POLY_T1_PACKED_BYTES: usize = 288;

/// Packed size of a t0 polynomial (14 bits per coefficient)
pub const POLY_T0_PACKED_BYTES: usize = 448;

/// Packed size of a z polynomial (20 bits per coefficient)
pub const POLY_Z_PACKED_BYTES: usize = 640;

/// Packed size of a w1 polynomial (4 bits per coefficient)
pub const POLY_W1_PACKED_BYTES: usize = 128;

/// Size of the packed challenge: nonzero bitmap plus 64 sign bits
pub const CHALLENGE_PACKED_BYTES: usize = DILITHIUM_N / 8 + 8;

/// Common trait for Dilithium parameter sets.
///
/// The matrix dimensions are carried as const generics so that vectors
/// of the wrong length are rejected at compile time. `K` is the number of
/// rows of A (length of s2, t, w, h) and `L` the number of columns
/// (length of s1, y, z).
pub trait DilithiumParams<const K: usize, const L: usize>: Send + Sync + 'static {
    /// Algorithm name
    const NAME: &'static str;

    /// Rows of the public matrix A
    const K_DIM: usize = K;
    /// Columns of the public matrix A
    const L_DIM: usize = L;

    /// Bound for the secret polynomials s1, s2
    const ETA: u32;
    /// Bits per packed eta coefficient
    const ETA_BITS: usize;
    /// Slack subtracted from gamma1 and gamma2 in the rejection checks
    const BETA: u32;
    /// Maximum number of hint bits in a signature
    const OMEGA: usize;

    /// Packed size of an eta-bounded polynomial
    const POLY_ETA_PACKED_BYTES: usize = DILITHIUM_N * Self::ETA_BITS / 8;

    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key size in bytes
    const SECRET_KEY_BYTES: usize;
    /// Signature size in bytes
    const SIGNATURE_BYTES: usize;

    /// Upper bound on rejection-loop iterations before signing gives up
    const MAX_SIGN_ATTEMPTS: u16 = 1000;
}

/// Dilithium mode 1 parameters (weak, K = 3, L = 2)
#[derive(Debug, Clone, Copy)]
pub struct Dilithium1Params;

impl DilithiumParams<3, 2> for Dilithium1Params {
    const NAME: &'static str = "Dilithium1";
    const ETA: u32 = 7;
    const ETA_BITS: usize = 4;
    const BETA: u32 = 375;
    const OMEGA: usize = 64;
    const PUBLIC_KEY_BYTES: usize = 896;
    const SECRET_KEY_BYTES: usize = 2096;
    const SIGNATURE_BYTES: usize = 1387;
}

/// Dilithium mode 2 parameters (medium, K = 4, L = 3)
#[derive(Debug, Clone, Copy)]
pub struct Dilithium2Params;

impl DilithiumParams<4, 3> for Dilithium2Params {
    const NAME: &'static str = "Dilithium2";
    const ETA: u32 = 6;
    const ETA_BITS: usize = 4;
    const BETA: u32 = 325;
    const OMEGA: usize = 80;
    const PUBLIC_KEY_BYTES: usize = 1184;
    const SECRET_KEY_BYTES: usize = 2800;
    const SIGNATURE_BYTES: usize = 2044;
}

/// Dilithium mode 3 parameters (recommended, K = 5, L = 4)
#[derive(Debug, Clone, Copy)]
pub struct Dilithium3Params;

impl DilithiumParams<5, 4> for Dilithium3Params {
    const NAME: &'static str = "Dilithium3";
    const ETA: u32 = 5;
    const ETA_BITS: usize = 4;
    const BETA: u32 = 275;
    const OMEGA: usize = 96;
    const PUBLIC_KEY_BYTES: usize = 1472;
    const SECRET_KEY_BYTES: usize = 3504;
    const SIGNATURE_BYTES: usize = 2701;
}

/// Dilithium mode 4 parameters (very high, K = 6, L = 5)
#[derive(Debug, Clone, Copy)]
pub struct Dilithium4Params;

impl DilithiumParams<6, 5> for Dilithium4Params {
    const NAME: &'static str = "Dilithium4";
    const ETA: u32 = 3;
    const ETA_BITS: usize = 3;
    const BETA: u32 = 175;
    const OMEGA: usize = 120;
    const PUBLIC_KEY_BYTES: usize = 1760;
    const SECRET_KEY_BYTES: usize = 3856;
    const SIGNATURE_BYTES: usize = 3366;
}
