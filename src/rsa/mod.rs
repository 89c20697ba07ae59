//! Textbook RSA keys.
//!
//! Keys are plain arbitrary precision integers. Primes come from
//! Miller-Rabin, and the public exponent is a random value coprime to
//! `phi(n)`, not a fixed small constant.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{Num, One, Zero};
use rand::Rng;

use crate::{Error, Result};

mod prime;
pub use prime::*;

mod keys;
pub use keys::*;

mod key_text;
pub use key_text::*;
