use super::*;

/// Encrypts one block: `m^e mod n`, as ciphertext width bytes.
///
/// The widths must already have been checked against the modulus.
pub(crate) fn ecb_encrypt_block(
  block: &[u8], key: &PublicKey, widths: BlockWidths, index: usize,
) -> Result<Vec<u8>> {
  let m = BigUint::from_bytes_be(block);
  let c = m.modpow(&key.e, &key.n);
  encode_be(&c, widths.ciphertext(), OverflowPolicy::Reject, index)
}

/// Decrypts one block: `c^d mod n`, as plaintext width bytes.
///
/// If the result needs more than plaintext width bytes, `policy` decides
/// between dropping the high-order bytes and an error. The widths must
/// already have been checked against the modulus.
pub(crate) fn ecb_decrypt_block(
  block: &[u8], key: &PrivateKey, widths: BlockWidths, policy: OverflowPolicy, index: usize,
) -> Result<Vec<u8>> {
  let c = BigUint::from_bytes_be(block);
  let m = c.modpow(&key.d, &key.n);
  encode_be(&m, widths.plaintext(), policy, index)
}

/// Encrypts a whole payload, one plaintext width block at a time.
///
/// The output is `ceil(len / plaintext) * ciphertext` bytes.
pub fn ecb_encrypt(payload: &[u8], key: &PublicKey, widths: BlockWidths) -> Result<Vec<u8>> {
  widths.check_modulus(&key.n)?;
  let block_count = payload.len().div_ceil(widths.plaintext());
  let mut out = Vec::with_capacity(block_count * widths.ciphertext());
  for (index, block) in payload.chunks(widths.plaintext()).enumerate() {
    out.extend(ecb_encrypt_block(block, key, widths, index)?);
  }
  Ok(out)
}

/// Decrypts a whole payload, one ciphertext width block at a time.
///
/// The output is `ceil(len / ciphertext) * plaintext` bytes. A short final
/// block in the input decrypts to a full plaintext width block, so a payload
/// that wasn't a multiple of the plaintext width when encrypted comes back
/// with its last block zero padded on the left.
pub fn ecb_decrypt(
  payload: &[u8], key: &PrivateKey, widths: BlockWidths, policy: OverflowPolicy,
) -> Result<Vec<u8>> {
  widths.check_modulus(&key.n)?;
  let block_count = payload.len().div_ceil(widths.ciphertext());
  let mut out = Vec::with_capacity(block_count * widths.plaintext());
  for (index, block) in payload.chunks(widths.ciphertext()).enumerate() {
    out.extend(ecb_decrypt_block(block, key, widths, policy, index)?);
  }
  Ok(out)
}
