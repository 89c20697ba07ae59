use super::*;

/// Rounds of Miller-Rabin run on each prime candidate.
pub const MILLER_RABIN_ROUNDS: usize = 10;

/// Every prime below 100, for cheap trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 25] =
  [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97];

/// Probabilistic primality test.
///
/// Small values are settled by trial division. Anything that survives that
/// gets `rounds` Miller-Rabin witnesses drawn from `[2, n - 1)`. A composite
/// slips through with probability at most `4^-rounds`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
  let two = BigUint::from(2_u32);
  if n < &two {
    return false;
  }
  for p in SMALL_PRIMES {
    if *n == BigUint::from(p) {
      return true;
    }
    if (n % p).is_zero() {
      return false;
    }
  }
  // n - 1 = 2^r * s, with s odd
  let n_minus_one: BigUint = n - 1_u32;
  let r = n_minus_one.trailing_zeros().unwrap_or(0);
  let s = &n_minus_one >> r;
  'witness: for _ in 0..rounds {
    let a = rng.gen_biguint_range(&two, &n_minus_one);
    let mut x = a.modpow(&s, n);
    if x.is_one() || x == n_minus_one {
      continue;
    }
    for _ in 1..r {
      x = (&x * &x) % n;
      if x == n_minus_one {
        continue 'witness;
      }
    }
    return false;
  }
  true
}

/// Samples a probable prime with exactly `bits` bits.
///
/// Candidates are random odd numbers with the top bit forced on, so every
/// candidate already has the right bit length.
///
/// ## Failure
/// * [`Error::Config`] if `bits < 2`, since no prime is that small.
pub fn random_prime<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> Result<BigUint> {
  if bits < 2 {
    return Err(Error::Config(format!("a prime needs at least 2 bits, got {bits}")));
  }
  loop {
    let mut candidate = rng.gen_biguint(bits);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();
    if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
      return Ok(candidate);
    }
  }
}

#[test]
fn test_is_probable_prime_small_values() {
  let mut rng = rand::thread_rng();
  let primes: Vec<u32> = (0..2000_u32)
    .filter(|&n| n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0))
    .collect();
  for n in 0..2000_u32 {
    assert_eq!(
      is_probable_prime(&BigUint::from(n), MILLER_RABIN_ROUNDS, &mut rng),
      primes.contains(&n),
      "n: {n}"
    );
  }
  // Carmichael numbers fool Fermat, they shouldn't fool Miller-Rabin
  for n in [561_u32, 1105, 1729, 2465, 2821, 6601, 8911] {
    assert!(!is_probable_prime(&BigUint::from(n), MILLER_RABIN_ROUNDS, &mut rng));
  }
}

#[test]
fn test_random_prime_bit_length() {
  let mut rng = rand::thread_rng();
  for bits in [2_u64, 7, 15, 17, 64] {
    let p = random_prime(bits, &mut rng).unwrap();
    assert_eq!(p.bits(), bits);
  }
  assert_eq!(random_prime(2, &mut rng).unwrap(), BigUint::from(3_u32));
  for bits in [0, 1] {
    assert!(matches!(random_prime(bits, &mut rng), Err(Error::Config(_))));
  }
}
