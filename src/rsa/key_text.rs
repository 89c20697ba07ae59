//! The key file format.
//!
//! Two lines, private key first:
//!
//! ```text
//! (d, n)
//! (e, n)
//! ```
//!
//! Every number is plain decimal, any length. The text is only ever read by
//! the small parser here.

use super::*;

use core::{fmt, str::FromStr};
use std::path::Path;

impl fmt::Display for PrivateKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.d, self.n)
  }
}
impl fmt::Display for PublicKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.e, self.n)
  }
}
impl fmt::Display for KeyPair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.private)?;
    writeln!(f, "{}", self.public)
  }
}

/// Parses one decimal number, digits only.
fn parse_decimal(text: &str) -> Result<BigUint> {
  let text = text.trim();
  if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::KeyText(format!("expected a decimal number, got {text:?}")));
  }
  BigUint::from_str_radix(text, 10).map_err(|e| Error::KeyText(e.to_string()))
}

/// Parses `(a, b)`.
fn parse_pair(line: &str) -> Result<(BigUint, BigUint)> {
  let inner = line
    .trim()
    .strip_prefix('(')
    .and_then(|s| s.strip_suffix(')'))
    .ok_or_else(|| Error::KeyText(format!("expected `(x, n)`, got {line:?}")))?;
  let (a, b) = inner
    .split_once(',')
    .ok_or_else(|| Error::KeyText(format!("expected two numbers, got {line:?}")))?;
  Ok((parse_decimal(a)?, parse_decimal(b)?))
}

impl FromStr for PrivateKey {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    let (d, n) = parse_pair(s)?;
    Ok(Self { d, n })
  }
}
impl FromStr for PublicKey {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    let (e, n) = parse_pair(s)?;
    Ok(Self { e, n })
  }
}
impl FromStr for KeyPair {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    let mut lines = s.lines().filter(|line| !line.trim().is_empty());
    let private: PrivateKey =
      lines.next().ok_or_else(|| Error::KeyText("missing private key line".into()))?.parse()?;
    let public: PublicKey =
      lines.next().ok_or_else(|| Error::KeyText("missing public key line".into()))?.parse()?;
    if lines.next().is_some() {
      return Err(Error::KeyText("unexpected text after the public key".into()));
    }
    if private.n != public.n {
      return Err(Error::KeyText("private and public moduli differ".into()));
    }
    if public.n.is_zero() {
      return Err(Error::KeyText("modulus is zero".into()));
    }
    Ok(Self { private, public })
  }
}

/// Writes a key pair to a text file.
pub fn write_key_file(path: impl AsRef<Path>, keys: &KeyPair) -> Result<()> {
  std::fs::write(path.as_ref(), keys.to_string())?;
  tracing::debug!(path = %path.as_ref().display(), "wrote key file");
  Ok(())
}

/// Reads a key pair back from a text file.
pub fn read_key_file(path: impl AsRef<Path>) -> Result<KeyPair> {
  std::fs::read_to_string(path.as_ref())?.parse()
}

#[test]
fn test_key_text_round_trip_big_numbers() {
  let big = BigUint::from_str_radix(&"9".repeat(400), 10).unwrap();
  let keys = KeyPair {
    private: PrivateKey { d: BigUint::from(7_u32), n: big.clone() },
    public: PublicKey { e: &big - 2_u32, n: big },
  };
  let text = keys.to_string();
  assert!(text.starts_with("(7, 999"));
  assert_eq!(text.parse::<KeyPair>().unwrap(), keys);
}

#[test]
fn test_key_text_rejects_junk() {
  for text in [
    "",
    "(1, 2)",
    "(1, 2)\n(3, 4)\n",
    "(1, 2)\n(3 2)\n",
    "(-1, 2)\n(3, 2)\n",
    "(1_0, 2)\n(3, 2)\n",
    "(0x10, 2)\n(3, 2)\n",
    "(1, 2)\n(3, 2)\n(5, 2)\n",
    "__import__('os')\n(3, 2)\n",
    "(1, 0)\n(3, 0)\n",
  ] {
    assert!(matches!(text.parse::<KeyPair>(), Err(Error::KeyText(_))), "text: {text:?}");
  }
  // whitespace is fine
  assert!("  ( 1 ,2 )\n\n(3,  2)  \n".parse::<KeyPair>().is_ok());
}
