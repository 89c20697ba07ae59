use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use pngrsa::{
  rsa::{self, KeyPair, PrivateKey, PublicKey},
  Error,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_key_pairs_invert_at_32_bits() {
  let mut rng = StdRng::seed_from_u64(32);
  for _ in 0..100 {
    let keys = rsa::generate_key_pair(32, &mut rng).unwrap();
    let n = keys.modulus();
    assert_eq!(n.bits(), 32);
    assert_eq!(&keys.private.n, n);
    for _ in 0..1000 {
      let m = rng.gen_biguint_below(n);
      let c = m.modpow(&keys.public.e, n);
      assert_eq!(c.modpow(&keys.private.d, n), m, "keys: {keys:?}");
    }
  }
}

#[test]
fn test_key_pairs_at_larger_sizes() {
  for bits in [64, 128, 256] {
    let keys = super::keys_with_bits(bits);
    let n = keys.modulus();
    assert_eq!(n.bits(), u64::from(bits));
    // e * d == 1 (mod phi) means m^(ed) == m for every m, spot check a few
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      let m = rng.gen_biguint_below(n);
      assert_eq!(m.modpow(&keys.public.e, n).modpow(&keys.private.d, n), m);
    }
    assert!(keys.public.e >= BigUint::from(2_u32));
  }
}

#[test]
fn test_public_exponent_is_coprime() {
  let mut rng = StdRng::seed_from_u64(99);
  // phi of 61 * 53
  let phi = BigUint::from(60_u32 * 52);
  for _ in 0..200 {
    let e = rsa::choose_public_exponent(&phi, &mut rng);
    assert!(e >= BigUint::from(2_u32) && e <= phi);
    assert!(e.gcd(&phi).is_one());
    let d = rsa::modular_inverse(&e, &phi).unwrap();
    assert!(d < phi);
    assert!(((&e * &d) % &phi).is_one());
  }
}

#[test]
fn test_modular_inverse_not_invertible() {
  let m = BigUint::from(3120_u32);
  for a in [2_u32, 4, 10, 3120, 6240] {
    assert!(matches!(rsa::modular_inverse(&BigUint::from(a), &m), Err(Error::NotInvertible)));
  }
}

#[test]
fn test_key_file_round_trip() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("keys.txt");
  let keys = super::keys_with_bits(128);
  rsa::write_key_file(&path, &keys).unwrap();
  let text = std::fs::read_to_string(&path).unwrap();
  let mut lines = text.lines();
  assert_eq!(lines.next().unwrap(), format!("({}, {})", keys.private.d, keys.private.n));
  assert_eq!(lines.next().unwrap(), format!("({}, {})", keys.public.e, keys.public.n));
  assert_eq!(rsa::read_key_file(&path).unwrap(), keys);
}

#[test]
fn test_key_file_moduli_must_match() {
  let keys = KeyPair {
    private: PrivateKey { d: BigUint::from(3_u32), n: BigUint::from(55_u32) },
    public: PublicKey { e: BigUint::from(27_u32), n: BigUint::from(57_u32) },
  };
  assert!(matches!(keys.to_string().parse::<KeyPair>(), Err(Error::KeyText(_))));
}
