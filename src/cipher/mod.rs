//! The two ways RSA gets applied to a payload.
//!
//! Both modes walk the payload in consecutive blocks. There's no padding: if
//! the payload isn't a multiple of the block width the last block is just
//! shorter, and it's treated as a smaller big-endian integer.
//!
//! There are always *two* block widths in play, and mixing them up is the
//! most likely way to corrupt an image:
//! * **plaintext width**: how many bytes of image data make one block. This
//!   must be small enough that every block value is below `n`.
//! * **ciphertext width**: how many bytes one encrypted block takes. This is
//!   the byte capacity of the modulus, `bits / 8`.
//!
//! Encrypting turns plaintext width blocks into ciphertext width blocks, and
//! decrypting goes the other way, so an encrypted payload is larger.

use num_bigint::BigUint;
use num_traits::One;

use crate::{
  rsa::{PrivateKey, PublicKey},
  Error, Result,
};

mod ecb;
pub use ecb::*;

mod ctr;
pub use ctr::*;

/// Which block mode to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CipherMode {
  /// Each block is exponentiated directly. Equal blocks encrypt equally.
  Ecb,
  /// Each block is XORed with an exponentiated counter.
  Ctr,
}

/// Which way the data is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
  Encrypt,
  Decrypt,
}

/// What to do when a decrypted block doesn't fit in the plaintext width.
///
/// This only happens when the ciphertext wasn't made by the matching key and
/// widths, or was damaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverflowPolicy {
  /// Keep the low-order bytes, silently dropping the rest.
  #[default]
  Truncate,
  /// Fail with [`Error::WidthOverflow`].
  Reject,
}

/// The plaintext and ciphertext block widths, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockWidths {
  plaintext: usize,
  ciphertext: usize,
}
impl BlockWidths {
  /// ## Failure
  /// * The plaintext width must be non-zero and smaller than the ciphertext
  ///   width.
  pub fn new(plaintext: usize, ciphertext: usize) -> Result<Self> {
    if plaintext == 0 || plaintext >= ciphertext {
      return Err(Error::Config(format!(
        "plaintext width {plaintext} must be non-zero and below the ciphertext width {ciphertext}"
      )));
    }
    Ok(Self { plaintext, ciphertext })
  }

  #[inline]
  #[must_use]
  pub const fn plaintext(&self) -> usize {
    self.plaintext
  }

  #[inline]
  #[must_use]
  pub const fn ciphertext(&self) -> usize {
    self.ciphertext
  }

  /// Width of the blocks read in the given direction.
  #[inline]
  #[must_use]
  pub const fn input(&self, direction: Direction) -> usize {
    match direction {
      Direction::Encrypt => self.plaintext,
      Direction::Decrypt => self.ciphertext,
    }
  }

  /// Width of the blocks written in the given direction.
  #[inline]
  #[must_use]
  pub const fn output(&self, direction: Direction) -> usize {
    match direction {
      Direction::Encrypt => self.ciphertext,
      Direction::Decrypt => self.plaintext,
    }
  }

  /// Checks that these widths work with the modulus `n`.
  ///
  /// * The modulus must fill a ciphertext block exactly:
  ///   `n.bits() == 8 * ciphertext`. A key of some other size than the one
  ///   the widths were made for is rejected either way.
  /// * Every plaintext block must be below `n`: `2^(8 * plaintext) < n`.
  pub fn check_modulus(&self, n: &BigUint) -> Result<()> {
    let ciphertext_bits = (self.ciphertext as u64) * 8;
    if n.bits() != ciphertext_bits {
      return Err(Error::InvalidKey(format!(
        "a {}-bit modulus doesn't match {} byte ciphertext blocks ({ciphertext_bits} bits)",
        n.bits(),
        self.ciphertext
      )));
    }
    let plaintext_limit = BigUint::one() << ((self.plaintext as u64) * 8);
    if *n <= plaintext_limit {
      return Err(Error::InvalidKey(format!(
        "a {}-bit modulus is too small for {} byte plaintext blocks",
        n.bits(),
        self.plaintext
      )));
    }
    Ok(())
  }
}

/// Encodes `value` as exactly `width` big-endian bytes.
///
/// Short values are zero padded on the left. Long values lose their
/// high-order bytes, or are an error, depending on `policy`. The `block`
/// index is just for the error message.
pub(crate) fn encode_be(
  value: &BigUint, width: usize, policy: OverflowPolicy, block: usize,
) -> Result<Vec<u8>> {
  let bytes = value.to_bytes_be();
  if bytes.len() <= width {
    let mut out = vec![0; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
  } else {
    match policy {
      OverflowPolicy::Truncate => Ok(bytes[bytes.len() - width..].to_vec()),
      OverflowPolicy::Reject => Err(Error::WidthOverflow { block, width }),
    }
  }
}

#[test]
fn test_encode_be() {
  let v = BigUint::from(0x01_0203_u32);
  assert_eq!(encode_be(&v, 4, OverflowPolicy::Reject, 0).unwrap(), [0, 1, 2, 3]);
  assert_eq!(encode_be(&v, 2, OverflowPolicy::Truncate, 0).unwrap(), [2, 3]);
  assert!(matches!(
    encode_be(&v, 2, OverflowPolicy::Reject, 7),
    Err(Error::WidthOverflow { block: 7, width: 2 })
  ));
  assert_eq!(encode_be(&BigUint::from(0_u32), 3, OverflowPolicy::Reject, 0).unwrap(), [0, 0, 0]);
}

#[test]
fn test_check_modulus() {
  let widths = BlockWidths::new(2, 4).unwrap();
  assert!(widths.check_modulus(&BigUint::from(0xFFFF_FFFF_u32)).is_ok());
  assert!(widths.check_modulus(&BigUint::from(0x8000_0001_u32)).is_ok());
  // too few bits, even when plaintext blocks would still fit below n
  for short in [0x7FFF_FFFF_u64, 0x00FF_FFFF, 0x1_0001, 0x1_0000, 0] {
    assert!(
      matches!(widths.check_modulus(&BigUint::from(short)), Err(Error::InvalidKey(_))),
      "n: {short:#x}"
    );
  }
  assert!(matches!(
    widths.check_modulus(&BigUint::from(0x1_0000_0001_u64)),
    Err(Error::InvalidKey(_))
  ));
  assert!(BlockWidths::new(0, 4).is_err());
  assert!(BlockWidths::new(4, 4).is_err());
}
