use super::*;

/// The public half of a key pair, `(e, n)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
  /// public exponent
  pub e: BigUint,
  /// modulus
  pub n: BigUint,
}

/// The private half of a key pair, `(d, n)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrivateKey {
  /// private exponent
  pub d: BigUint,
  /// modulus
  pub n: BigUint,
}

/// Both halves of a key, which always share a modulus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPair {
  pub private: PrivateKey,
  pub public: PublicKey,
}
impl KeyPair {
  #[inline]
  #[must_use]
  pub fn modulus(&self) -> &BigUint {
    &self.public.n
  }
}

/// Generates a key pair whose modulus has exactly `bits` bits.
///
/// `p` gets `bits/2 + 1` bits and `q` gets `bits/2 - 1` bits, so their
/// product has either `bits` or `bits - 1` bits. Pairs that come out short
/// are thrown away and both primes are drawn again. There's no cap on the
/// number of attempts, so pass an rng you trust.
///
/// ## Failure
/// * `bits` must be a multiple of 8 and at least 16.
pub fn generate_key_pair<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> Result<KeyPair> {
  if bits < 16 || bits % 8 != 0 {
    return Err(Error::Config(format!("key size must be a multiple of 8 and at least 16, got {bits}")));
  }
  let half = u64::from(bits / 2);
  let mut attempts = 0_u64;
  let (p, q, n) = loop {
    attempts += 1;
    let p = random_prime(half + 1, rng)?;
    let q = random_prime(half - 1, rng)?;
    let n = &p * &q;
    if n.bits() == u64::from(bits) {
      break (p, q, n);
    }
    tracing::trace!(attempts, got = n.bits(), "modulus is short, drawing new primes");
  };
  tracing::debug!(attempts, bits, "found modulus");
  let phi = (&p - 1_u32) * (&q - 1_u32);
  loop {
    let e = choose_public_exponent(&phi, rng);
    match modular_inverse(&e, &phi) {
      Ok(d) => {
        return Ok(KeyPair {
          private: PrivateKey { d, n: n.clone() },
          public: PublicKey { e, n },
        })
      }
      Err(Error::NotInvertible) => {
        tracing::trace!("exponent not invertible, drawing another");
      }
      Err(other) => return Err(other),
    }
  }
}

/// Picks a public exponent uniformly from `[2, phi]` that's coprime to `phi`.
///
/// This does *not* use the usual small exponent like 65537. The exponent
/// is frequently about as large as `phi` itself.
pub fn choose_public_exponent<R: Rng + ?Sized>(phi: &BigUint, rng: &mut R) -> BigUint {
  let low = BigUint::from(2_u32);
  let high = phi + 1_u32;
  loop {
    let e = rng.gen_biguint_range(&low, &high);
    if e.gcd(phi).is_one() {
      return e;
    }
  }
}

/// Computes `a^-1 mod m` with the extended Euclidean algorithm.
///
/// The output is always in `[0, m)`.
///
/// ## Failure
/// * [`Error::NotInvertible`] when `gcd(a, m) != 1`, or `m` is zero.
pub fn modular_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
  if m.is_zero() {
    return Err(Error::NotInvertible);
  }
  let (mut t1, mut t2) = (BigInt::zero(), BigInt::one());
  let (mut r1, mut r2) = (BigInt::from(m.clone()), BigInt::from(a.clone()));
  while !r2.is_zero() {
    // both remainders stay non-negative, so truncating division is floor
    let quotient = &r1 / &r2;
    let t_next = &t1 - &quotient * &t2;
    t1 = core::mem::replace(&mut t2, t_next);
    let r_next = &r1 - &quotient * &r2;
    r1 = core::mem::replace(&mut r2, r_next);
  }
  if r1 > BigInt::one() {
    return Err(Error::NotInvertible);
  }
  let m = BigInt::from(m.clone());
  t1.mod_floor(&m).to_biguint().ok_or(Error::NotInvertible)
}

#[test]
fn test_modular_inverse() {
  let inv = |a: u32, m: u32| modular_inverse(&BigUint::from(a), &BigUint::from(m));
  assert_eq!(inv(3, 11).unwrap(), BigUint::from(4_u32));
  assert_eq!(inv(17, 3120).unwrap(), BigUint::from(2753_u32));
  assert_eq!(inv(1, 7).unwrap(), BigUint::one());
  // a bigger than m works the same as a mod m
  assert_eq!(inv(14, 11).unwrap(), BigUint::from(4_u32));
  assert!(matches!(inv(6, 9), Err(Error::NotInvertible)));
  assert!(matches!(inv(0, 9), Err(Error::NotInvertible)));
  assert!(matches!(inv(5, 0), Err(Error::NotInvertible)));
}

#[test]
fn test_generate_key_pair_rejects_bad_sizes() {
  let mut rng = rand::thread_rng();
  for bits in [0, 8, 15, 20, 33] {
    assert!(matches!(generate_key_pair(bits, &mut rng), Err(Error::Config(_))), "bits: {bits}");
  }
}
