use super::*;

/// One of the eight ways to run the pipeline.
///
/// This is every combination of cipher mode, direction, and whether the
/// image data is inflated around the cipher. The named constants cover all
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variant {
  pub mode: CipherMode,
  pub direction: Direction,
  /// Inflate the image data before the cipher and deflate it after.
  pub inflate: bool,
}
impl Variant {
  pub const ENCRYPT_ECB: Self = Self::new(CipherMode::Ecb, Direction::Encrypt, false);
  pub const DECRYPT_ECB: Self = Self::new(CipherMode::Ecb, Direction::Decrypt, false);
  pub const ENCRYPT_ECB_INFLATED: Self = Self::new(CipherMode::Ecb, Direction::Encrypt, true);
  pub const DECRYPT_ECB_INFLATED: Self = Self::new(CipherMode::Ecb, Direction::Decrypt, true);
  pub const ENCRYPT_CTR: Self = Self::new(CipherMode::Ctr, Direction::Encrypt, false);
  pub const DECRYPT_CTR: Self = Self::new(CipherMode::Ctr, Direction::Decrypt, false);
  pub const ENCRYPT_CTR_INFLATED: Self = Self::new(CipherMode::Ctr, Direction::Encrypt, true);
  pub const DECRYPT_CTR_INFLATED: Self = Self::new(CipherMode::Ctr, Direction::Decrypt, true);

  /// The four encrypting variants, in the order the `demo` command runs them.
  pub const ENCRYPTING: [Self; 4] = [
    Self::ENCRYPT_ECB,
    Self::ENCRYPT_ECB_INFLATED,
    Self::ENCRYPT_CTR,
    Self::ENCRYPT_CTR_INFLATED,
  ];

  #[inline]
  #[must_use]
  pub const fn new(mode: CipherMode, direction: Direction, inflate: bool) -> Self {
    Self { mode, direction, inflate }
  }

  /// The variant that undoes this one.
  #[inline]
  #[must_use]
  pub const fn inverse(self) -> Self {
    let direction = match self.direction {
      Direction::Encrypt => Direction::Decrypt,
      Direction::Decrypt => Direction::Encrypt,
    };
    Self { direction, ..self }
  }

  /// Output file name suffix, such as `_enc_dc_ctr`.
  #[must_use]
  pub const fn file_suffix(self) -> &'static str {
    match (self.direction, self.inflate, self.mode) {
      (Direction::Encrypt, false, CipherMode::Ecb) => "_enc",
      (Direction::Decrypt, false, CipherMode::Ecb) => "_dec",
      (Direction::Encrypt, true, CipherMode::Ecb) => "_enc_dc",
      (Direction::Decrypt, true, CipherMode::Ecb) => "_dec_dc",
      (Direction::Encrypt, false, CipherMode::Ctr) => "_enc_ctr",
      (Direction::Decrypt, false, CipherMode::Ctr) => "_dec_ctr",
      (Direction::Encrypt, true, CipherMode::Ctr) => "_enc_dc_ctr",
      (Direction::Decrypt, true, CipherMode::Ctr) => "_dec_dc_ctr",
    }
  }

  /// Shorthand for [`run`] with this variant.
  #[inline]
  pub fn apply(self, chunks: &[PngChunk], keys: &KeyPair, config: &Config) -> Result<Vec<PngChunk>> {
    run(self, keys, config, chunks)
  }
}

/// Where the output of `variant` goes for a given input file.
///
/// `dir/cat.png` encrypted with [`Variant::ENCRYPT_CTR`] becomes
/// `dir/cat_enc_ctr.png`.
#[must_use]
pub fn output_path_for(input: &Path, variant: Variant) -> PathBuf {
  let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
  input.with_file_name(format!("{stem}{}.png", variant.file_suffix()))
}

#[test]
fn test_output_path_for() {
  let p = Path::new("pics/cat.png");
  assert_eq!(output_path_for(p, Variant::ENCRYPT_ECB), Path::new("pics/cat_enc.png"));
  assert_eq!(output_path_for(p, Variant::DECRYPT_CTR_INFLATED), Path::new("pics/cat_dec_dc_ctr.png"));
  assert_eq!(Variant::ENCRYPT_CTR.inverse(), Variant::DECRYPT_CTR);
  assert_eq!(Variant::DECRYPT_ECB_INFLATED.inverse(), Variant::ENCRYPT_ECB_INFLATED);
}
