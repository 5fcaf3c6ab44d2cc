//! Shared helpers for the latsig integration tests

use latsig_api::{Result, SignatureSerialize, SignedMessage};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic RNG for a test case
pub fn fixed_rng(seed: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([seed; 32])
}

/// Runs keypair, sign, verify and the attached-signature framing for one
/// scheme and returns the signature length.
///
/// Every step that should succeed is propagated with `?`; every step that
/// should fail is checked to fail.
pub fn exercise_scheme<S>(rng: &mut ChaCha20Rng, message: &[u8]) -> Result<usize>
where
    S: SignatureSerialize + SignedMessage,
{
    let keypair = S::keypair(rng)?;
    let (pk, sk) = (S::public_key(&keypair), S::secret_key(&keypair));
    assert_eq!(S::serialize_public_key(&pk).len(), S::PUBLIC_KEY_SIZE);
    assert_eq!(S::serialize_secret_key(&sk).len(), S::SECRET_KEY_SIZE);

    let sig = S::sign(message, &sk)?;
    S::verify(message, &sig, &pk)?;

    let sig_bytes = S::serialize_signature(&sig);
    let sig_again = S::deserialize_signature(&sig_bytes)?;
    S::verify(message, &sig_again, &pk)?;

    let mut wrong = message.to_vec();
    wrong.push(0);
    assert!(S::verify(&wrong, &sig, &pk).is_err());

    let signed = S::sign_message(message, &sk)?;
    assert_eq!(S::open(&signed, &pk)?, message);

    Ok(sig_bytes.len())
}
