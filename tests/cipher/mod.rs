use num_bigint::BigUint;
use pngrsa::{
  cipher::{
    ctr_apply, ctr_block, ecb_decrypt, ecb_encrypt, BlockWidths, Counter, Direction,
    OverflowPolicy,
  },
  rsa::{PrivateKey, PublicKey},
  Error,
};
use proptest::prelude::*;

const NONCE: u64 = 123_456;

fn widths() -> BlockWidths {
  BlockWidths::new(2, 4).unwrap()
}

fn flatten(blocks: Vec<[u8; 2]>) -> Vec<u8> {
  blocks.into_iter().flatten().collect()
}

#[test]
fn test_ctr_blocks_never_repeat() {
  let keys = super::test_keys();
  let payload = [1, 2, 3, 4, 5, 6];
  let (out, counter) = ctr_apply(
    &payload,
    &keys.public,
    Counter::new(NONCE),
    Direction::Encrypt,
    widths(),
    OverflowPolicy::Truncate,
  )
  .unwrap();
  assert_eq!(out.len(), 12);
  assert_eq!(counter, Counter { counter: 3, nonce: NONCE });
  let blocks: Vec<&[u8]> = out.chunks(4).collect();
  assert_ne!(blocks[0], blocks[1]);
  assert_ne!(blocks[1], blocks[2]);
  assert_ne!(blocks[0], blocks[2]);
  // block 1 is the keystream for counter 1 XOR 0x0304
  let k1 = Counter { counter: 1, nonce: NONCE }.keystream(&keys.public);
  let expected = k1 ^ BigUint::from(0x0304_u32);
  assert_eq!(BigUint::from_bytes_be(blocks[1]), expected);

  // even identical plaintext blocks give different ciphertext blocks
  let (same, _) = ctr_apply(
    &[9, 9, 9, 9, 9, 9],
    &keys.public,
    Counter::new(NONCE),
    Direction::Encrypt,
    widths(),
    OverflowPolicy::Truncate,
  )
  .unwrap();
  let blocks: Vec<&[u8]> = same.chunks(4).collect();
  assert_ne!(blocks[0], blocks[1]);
  assert_ne!(blocks[1], blocks[2]);
  assert_ne!(blocks[0], blocks[2]);
}

#[test]
fn test_ecb_repeats_equal_blocks() {
  let keys = super::test_keys();
  let out = ecb_encrypt(&[7, 7, 7, 7], &keys.public, widths()).unwrap();
  assert_eq!(out.len(), 8);
  assert_eq!(out[..4], out[4..]);
  let other = ecb_encrypt(&[7, 8], &keys.public, widths()).unwrap();
  assert_ne!(out[..4], other[..]);
}

#[test]
fn test_counter_steps_explicitly() {
  let keys = super::test_keys();
  let start = Counter::new(NONCE);
  let (_, after_one) =
    ctr_block(&[1, 2], &keys.public, start, Direction::Encrypt, widths(), OverflowPolicy::Reject)
      .unwrap();
  assert_eq!(after_one, start.next());
  assert_eq!(after_one.seed(), BigUint::from(NONCE + 1));
  // resuming from a returned counter is the same as one long run
  let (first, mid) = ctr_apply(
    &[1, 2, 3, 4],
    &keys.public,
    start,
    Direction::Encrypt,
    widths(),
    OverflowPolicy::Truncate,
  )
  .unwrap();
  let (second, _) =
    ctr_apply(&[5, 6], &keys.public, mid, Direction::Encrypt, widths(), OverflowPolicy::Truncate)
      .unwrap();
  let (whole, _) = ctr_apply(
    &[1, 2, 3, 4, 5, 6],
    &keys.public,
    start,
    Direction::Encrypt,
    widths(),
    OverflowPolicy::Truncate,
  )
  .unwrap();
  assert_eq!([first, second].concat(), whole);
}

#[test]
fn test_empty_payload_is_a_no_op() {
  let keys = super::test_keys();
  assert_eq!(ecb_encrypt(&[], &keys.public, widths()).unwrap(), Vec::<u8>::new());
  assert_eq!(
    ecb_decrypt(&[], &keys.private, widths(), OverflowPolicy::Reject).unwrap(),
    Vec::<u8>::new()
  );
  let (out, counter) = ctr_apply(
    &[],
    &keys.public,
    Counter::new(NONCE),
    Direction::Decrypt,
    widths(),
    OverflowPolicy::Reject,
  )
  .unwrap();
  assert!(out.is_empty());
  assert_eq!(counter.counter, 0);
}

#[test]
fn test_short_last_block() {
  let keys = super::test_keys();
  let enc = ecb_encrypt(&[1, 2, 3], &keys.public, widths()).unwrap();
  assert_eq!(enc.len(), 8);
  // the lone last byte comes back as a full, left padded block
  let dec = ecb_decrypt(&enc, &keys.private, widths(), OverflowPolicy::Reject).unwrap();
  assert_eq!(dec, [1, 2, 0, 3]);

  let (enc, _) = ctr_apply(
    &[1, 2, 3],
    &keys.public,
    Counter::new(NONCE),
    Direction::Encrypt,
    widths(),
    OverflowPolicy::Reject,
  )
  .unwrap();
  assert_eq!(enc.len(), 8);
  let (dec, _) = ctr_apply(
    &enc,
    &keys.public,
    Counter::new(NONCE),
    Direction::Decrypt,
    widths(),
    OverflowPolicy::Reject,
  )
  .unwrap();
  assert_eq!(dec, [1, 2, 0, 3]);
}

#[test]
fn test_decrypt_overflow_policy() {
  let keys = super::test_keys();
  let n = keys.modulus();
  // e and d are odd, so n - 1 (which is -1 mod n) decrypts to itself
  let n_minus_one = n - 1_u32;
  let block = n_minus_one.to_bytes_be();
  assert_eq!(block.len(), 4);
  assert!(matches!(
    ecb_decrypt(&block, &keys.private, widths(), OverflowPolicy::Reject),
    Err(Error::WidthOverflow { block: 0, width: 2 })
  ));
  let lossy = ecb_decrypt(&block, &keys.private, widths(), OverflowPolicy::Truncate).unwrap();
  assert_eq!(lossy, block[2..]);
  // the error names the block that overflowed
  let second = [ecb_encrypt(&[4, 5], &keys.public, widths()).unwrap(), block].concat();
  assert!(matches!(
    ecb_decrypt(&second, &keys.private, widths(), OverflowPolicy::Reject),
    Err(Error::WidthOverflow { block: 1, width: 2 })
  ));
}

#[test]
fn test_short_modulus_is_rejected() {
  let short = super::keys_with_bits(24);
  assert_eq!(short.modulus().bits(), 24);
  assert!(matches!(ecb_encrypt(&[1, 2], &short.public, widths()), Err(Error::InvalidKey(_))));
  assert!(matches!(
    ecb_decrypt(&[1, 2, 3, 4], &short.private, widths(), OverflowPolicy::Truncate),
    Err(Error::InvalidKey(_))
  ));
  assert!(matches!(
    ctr_apply(
      &[1, 2],
      &short.public,
      Counter::new(NONCE),
      Direction::Encrypt,
      widths(),
      OverflowPolicy::Truncate
    ),
    Err(Error::InvalidKey(_))
  ));
  // widths made for 24 bits are fine
  let narrow = BlockWidths::new(2, 3).unwrap();
  let enc = ecb_encrypt(&[1, 2], &short.public, narrow).unwrap();
  assert_eq!(enc.len(), 3);
  assert_eq!(ecb_decrypt(&enc, &short.private, narrow, OverflowPolicy::Reject).unwrap(), [1, 2]);
}

#[test]
fn test_zero_modulus_is_an_error() {
  let zero = BigUint::from(0_u32);
  let public = PublicKey { e: BigUint::from(3_u32), n: zero.clone() };
  let private = PrivateKey { d: BigUint::from(3_u32), n: zero };
  assert!(matches!(ecb_encrypt(&[1, 2], &public, widths()), Err(Error::InvalidKey(_))));
  assert!(matches!(
    ecb_decrypt(&[1, 2, 3, 4], &private, widths(), OverflowPolicy::Reject),
    Err(Error::InvalidKey(_))
  ));
  assert!(matches!(
    ctr_block(
      &[1, 2],
      &public,
      Counter::new(NONCE),
      Direction::Encrypt,
      widths(),
      OverflowPolicy::Reject
    ),
    Err(Error::InvalidKey(_))
  ));
}

#[test]
fn test_widths_must_fit_modulus() {
  let big = super::keys_with_bits(64);
  assert!(matches!(ecb_encrypt(&[1, 2], &big.public, widths()), Err(Error::InvalidKey(_))));
  let small = super::test_keys();
  let too_wide = BlockWidths::new(4, 5).unwrap();
  assert!(matches!(ecb_encrypt(&[1, 2], &small.public, too_wide), Err(Error::InvalidKey(_))));
  assert!(matches!(
    ctr_apply(
      &[1, 2],
      &small.public,
      Counter::new(NONCE),
      Direction::Encrypt,
      too_wide,
      OverflowPolicy::Truncate
    ),
    Err(Error::InvalidKey(_))
  ));
  // bigger keys work with matching widths
  let wide = BlockWidths::new(6, 8).unwrap();
  let enc = ecb_encrypt(&[1, 2, 3, 4, 5, 6], &big.public, wide).unwrap();
  assert_eq!(
    ecb_decrypt(&enc, &big.private, wide, OverflowPolicy::Reject).unwrap(),
    [1, 2, 3, 4, 5, 6]
  );
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn prop_ecb_round_trip(blocks in proptest::collection::vec(any::<[u8; 2]>(), 0..200)) {
    let keys = super::test_keys();
    let payload = flatten(blocks);
    let enc = ecb_encrypt(&payload, &keys.public, widths()).unwrap();
    prop_assert_eq!(enc.len(), payload.len() * 2);
    let dec = ecb_decrypt(&enc, &keys.private, widths(), OverflowPolicy::Reject).unwrap();
    prop_assert_eq!(dec, payload);
  }

  #[test]
  fn prop_ctr_round_trip(
    blocks in proptest::collection::vec(any::<[u8; 2]>(), 0..200),
    nonce in any::<u32>(),
  ) {
    let keys = super::test_keys();
    let payload = flatten(blocks);
    let counter = Counter::new(u64::from(nonce));
    let (enc, _) = ctr_apply(
      &payload, &keys.public, counter, Direction::Encrypt, widths(), OverflowPolicy::Reject,
    ).unwrap();
    let (dec, _) = ctr_apply(
      &enc, &keys.public, counter, Direction::Decrypt, widths(), OverflowPolicy::Reject,
    ).unwrap();
    prop_assert_eq!(dec, payload);
  }
}
