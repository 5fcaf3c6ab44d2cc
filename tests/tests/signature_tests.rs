//! Integration tests for the Dilithium signature schemes

use latsig::prelude::*;
use latsig_params::pqc::dilithium::{
    Dilithium1Params, Dilithium2Params, Dilithium3Params, Dilithium4Params, DilithiumParams,
};
use latsig_tests::{exercise_scheme, fixed_rng};
use proptest::prelude::*;

#[test]
fn test_all_parameter_sets() {
    let mut rng = fixed_rng(1);
    let message = b"Test message for Dilithium signature";

    assert_eq!(
        exercise_scheme::<Dilithium1>(&mut rng, message).unwrap(),
        Dilithium1Params::SIGNATURE_BYTES
    );
    assert_eq!(
        exercise_scheme::<Dilithium2>(&mut rng, message).unwrap(),
        Dilithium2Params::SIGNATURE_BYTES
    );
    assert_eq!(
        exercise_scheme::<Dilithium3>(&mut rng, message).unwrap(),
        Dilithium3Params::SIGNATURE_BYTES
    );
    assert_eq!(
        exercise_scheme::<Dilithium4>(&mut rng, message).unwrap(),
        Dilithium4Params::SIGNATURE_BYTES
    );
}

#[test]
fn test_sizes_table() {
    let sizes = [
        (Dilithium1::PUBLIC_KEY_SIZE, Dilithium1::SECRET_KEY_SIZE, Dilithium1::SIGNATURE_SIZE),
        (Dilithium2::PUBLIC_KEY_SIZE, Dilithium2::SECRET_KEY_SIZE, Dilithium2::SIGNATURE_SIZE),
        (Dilithium3::PUBLIC_KEY_SIZE, Dilithium3::SECRET_KEY_SIZE, Dilithium3::SIGNATURE_SIZE),
        (Dilithium4::PUBLIC_KEY_SIZE, Dilithium4::SECRET_KEY_SIZE, Dilithium4::SIGNATURE_SIZE),
    ];
    assert_eq!(
        sizes,
        [
            (896, 2096, 1387),
            (1184, 2800, 2044),
            (1472, 3504, 2701),
            (1760, 3856, 3366),
        ]
    );
}

#[test]
fn test_fixed_seed_scenario() {
    let mut rng = fixed_rng(0);
    let (pk, sk) = Dilithium3::keypair(&mut rng).unwrap();
    let sig = Dilithium3::sign(b"", &sk).unwrap();
    assert!(Dilithium3::verify(b"", &sig, &pk).is_ok());

    // Same seed, same keys, same signature
    let mut rng = fixed_rng(0);
    let (pk2, sk2) = Dilithium3::keypair(&mut rng).unwrap();
    assert_eq!(pk2, pk);
    assert_eq!(Dilithium3::sign(b"", &sk2).unwrap(), sig);

    let mut pk_bytes = Dilithium3::serialize_public_key(&pk);
    pk_bytes[0] ^= 0x01;
    let bad_pk = Dilithium3::deserialize_public_key(&pk_bytes).unwrap();
    assert!(Dilithium3::verify(b"", &sig, &bad_pk).is_err());
}

#[test]
fn test_seed_derivation_is_stable() {
    let seed = hex::decode(
        "0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0\
         00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff\
         ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100",
    )
    .unwrap();
    assert_eq!(seed.len(), Dilithium2::MIN_SEED_SIZE);

    let (pk1, sk1) = Dilithium2::derive_keypair(&seed).unwrap();
    let (pk2, _) = Dilithium2::derive_keypair(&seed).unwrap();
    assert_eq!(pk1, pk2);
    assert_eq!(hex::encode(&pk1.as_ref()[..32]), hex::encode(&seed[..32]));
    assert_eq!(Dilithium2::derive_public_key(&sk1).unwrap(), pk1);
}

#[test]
fn test_cross_parameter_set_rejection() {
    let mut rng = fixed_rng(9);
    let (pk1, sk1) = Dilithium1::keypair(&mut rng).unwrap();
    let (pk4, _) = Dilithium4::keypair(&mut rng).unwrap();
    let sig1 = Dilithium1::sign(b"m", &sk1).unwrap();

    assert!(Dilithium1::verify(b"m", &sig1, &pk1).is_ok());
    assert!(Dilithium4::verify(b"m", &sig1, &pk4).is_err());
    assert!(Dilithium1::verify(b"m", &sig1, &pk4).is_err());
}

#[test]
fn test_error_reports_lengths() {
    let err = Dilithium2::deserialize_signature(&[0u8; 7]).unwrap_err();
    match err {
        Error::InvalidLength {
            expected, actual, ..
        } => {
            assert_eq!(expected, Dilithium2::SIGNATURE_SIZE);
            assert_eq!(actual, 7);
        }
        other => panic!("unexpected error: {}", other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_any_message_roundtrips(message in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut rng = fixed_rng(3);
        let (pk, sk) = Dilithium2::keypair(&mut rng).unwrap();
        let sig = Dilithium2::sign(&message, &sk).unwrap();
        prop_assert!(Dilithium2::verify(&message, &sig, &pk).is_ok());

        let mut signed = Dilithium2::sign_message(&message, &sk).unwrap();
        prop_assert_eq!(Dilithium2::open(&signed, &pk).unwrap(), message.clone());
        let last = signed.len() - 1;
        signed[last] ^= 0x80;
        prop_assert!(Dilithium2::open(&signed, &pk).is_err());
    }
}
