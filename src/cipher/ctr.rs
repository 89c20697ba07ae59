use super::*;

/// Counter mode state: a fixed nonce and a per-block counter.
///
/// This is a plain value. Each block step takes one by value and hands back
/// the next one, so two runs can never share a counter by accident. Every
/// run should start from [`Counter::new`], which puts the counter at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter {
  pub counter: u64,
  pub nonce: u64,
}
impl Counter {
  #[inline]
  #[must_use]
  pub const fn new(nonce: u64) -> Self {
    Self { counter: 0, nonce }
  }

  /// The counter for the following block.
  #[inline]
  #[must_use]
  pub const fn next(self) -> Self {
    Self { counter: self.counter + 1, nonce: self.nonce }
  }

  /// `counter + nonce`, without overflow.
  #[inline]
  #[must_use]
  pub fn seed(self) -> BigUint {
    BigUint::from(self.counter) + self.nonce
  }

  /// The keystream value for this block, `(counter + nonce)^e mod n`.
  ///
  /// Only the *public* key is ever used for this, in both directions.
  #[inline]
  #[must_use]
  pub fn keystream(self, key: &PublicKey) -> BigUint {
    self.seed().modpow(&key.e, &key.n)
  }
}

/// Transforms one block, returning the output and the advanced counter.
///
/// The block is XORed with the keystream as a big-endian integer. Encrypting
/// writes ciphertext width bytes, decrypting writes plaintext width bytes.
pub fn ctr_block(
  block: &[u8], key: &PublicKey, counter: Counter, direction: Direction, widths: BlockWidths,
  policy: OverflowPolicy,
) -> Result<(Vec<u8>, Counter)> {
  widths.check_modulus(&key.n)?;
  let x = BigUint::from_bytes_be(block);
  let y = counter.keystream(key) ^ x;
  let index = counter.counter as usize;
  let out = encode_be(&y, widths.output(direction), policy, index)?;
  Ok((out, counter.next()))
}

/// Runs counter mode over a whole payload.
///
/// Blocks are processed strictly in order, with the counter advancing once
/// per block. The counter after the last block is returned along with the
/// output.
pub fn ctr_apply(
  payload: &[u8], key: &PublicKey, mut counter: Counter, direction: Direction,
  widths: BlockWidths, policy: OverflowPolicy,
) -> Result<(Vec<u8>, Counter)> {
  widths.check_modulus(&key.n)?;
  let block_count = payload.len().div_ceil(widths.input(direction));
  let mut out = Vec::with_capacity(block_count * widths.output(direction));
  for block in payload.chunks(widths.input(direction)) {
    let (bytes, next) = ctr_block(block, key, counter, direction, widths, policy)?;
    out.extend(bytes);
    counter = next;
  }
  Ok((out, counter))
}
