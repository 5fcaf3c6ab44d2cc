use super::*;

#[test]
fn test_shake128_empty_input() {
    let out = ShakeXof128::generate(&[], 32).unwrap();
    assert_eq!(
        hex::encode(out),
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );
}

#[test]
fn test_shake256_abc() {
    let out = ShakeXof256::generate(b"abc", 32).unwrap();
    assert_eq!(
        hex::encode(out),
        "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739"
    );
}

#[test]
fn test_incremental_absorb_matches_one_shot() {
    let mut xof = ShakeXof128::new();
    xof.update(b"a").unwrap();
    xof.update(b"").unwrap();
    xof.update(b"bc").unwrap();
    let out = xof.squeeze_into_vec(32).unwrap();
    assert_eq!(
        hex::encode(out),
        "5881092dd818bf5cf8a3ddb793fbcba74097d5c526a6d35f97b83351940f2cc8"
    );
}

#[test]
fn test_split_squeeze_is_a_continuous_stream() {
    let whole = ShakeXof256::generate(b"stream", 3 * ShakeXof256::RATE + 7).unwrap();

    let mut xof = ShakeXof256::new();
    xof.update(b"stream").unwrap();
    let mut blocks = vec![0u8; 2 * ShakeXof256::RATE];
    xof.squeeze_blocks(&mut blocks).unwrap();
    let mut tail = vec![0u8; ShakeXof256::RATE + 7];
    xof.squeeze(&mut tail).unwrap();

    blocks.extend_from_slice(&tail);
    assert_eq!(whole, blocks);
}

#[test]
fn test_update_after_squeeze_fails() {
    let mut xof = ShakeXof128::new();
    xof.update(b"seed").unwrap();
    let mut out = [0u8; 8];
    xof.squeeze(&mut out).unwrap();
    assert!(xof.is_squeezing());
    assert!(xof.update(b"more").is_err());

    xof.reset().unwrap();
    assert!(!xof.is_squeezing());
    xof.update(b"more").unwrap();
}

#[test]
fn test_squeeze_blocks_rejects_partial_block() {
    let mut xof = ShakeXof128::new();
    let mut out = vec![0u8; ShakeXof128::RATE + 1];
    assert!(xof.squeeze_blocks(&mut out).is_err());
}

#[test]
fn test_rates_and_security_levels() {
    assert_eq!(ShakeXof128::RATE, 168);
    assert_eq!(ShakeXof256::RATE, 136);
    assert_eq!(ShakeXof128::security_level(), 128);
    assert_eq!(ShakeXof256::security_level(), 256);
}
