//! pngrsa: encrypt the image data of PNG files with textbook RSA.
//!
//! Commands:
//!   keygen                 - generate a key pair and write the key file
//!   encrypt <png>          - encrypt the image data (ECB or CTR)
//!   decrypt <png>          - undo `encrypt` with the same key file and mode
//!   chunks <png>           - list every chunk with its class and CRC status
//!   anonymize <png>        - strip ancillary chunks
//!   demo <png>             - every variant and its inverse, side by side

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pngrsa::{
  cipher::{CipherMode, Direction},
  pipeline::{self, output_path_for, Variant},
  png::{parse_chunks, ImageHeader, PngChunkType},
  rsa::{self, KeyPair},
  Config,
};

#[derive(Parser, Debug)]
#[command(name = "pngrsa", version, about = "Textbook RSA over PNG image data")]
struct Cli {
  /// Path to a TOML config file (key size, block widths, nonce, ...)
  #[arg(long, short = 'c', env = "PNGRSA_CONFIG")]
  config: Option<PathBuf>,

  /// Log more (`RUST_LOG` overrides this)
  #[arg(long, short = 'v', action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Generate a key pair and write it to a key file
  Keygen {
    #[arg(long, short = 'o', default_value = "keys.txt")]
    out: PathBuf,
  },

  /// Encrypt a PNG's image data
  Encrypt(CipherArgs),

  /// Decrypt a PNG's image data
  Decrypt(CipherArgs),

  /// List a PNG's chunks
  Chunks { input: PathBuf },

  /// Remove every ancillary chunk from a PNG
  Anonymize {
    input: PathBuf,
    /// Also join all image data chunks into one
    #[arg(long)]
    join: bool,
    /// Output path (default: `<input>_anon.png`)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
  },

  /// Generate keys, then run every variant and its inverse on one PNG
  Demo {
    input: PathBuf,
    /// Where the generated key file goes
    #[arg(long, short = 'k', default_value = "keys.txt")]
    keys: PathBuf,
  },
}

#[derive(Args, Debug)]
struct CipherArgs {
  input: PathBuf,
  /// Key file written by `keygen`
  #[arg(long, short = 'k')]
  keys: PathBuf,
  #[arg(long, short = 'm', value_enum, default_value_t = ModeArg::Ecb)]
  mode: ModeArg,
  /// Inflate the image data before the cipher and deflate it after
  #[arg(long)]
  inflate: bool,
  /// Output path (default: derived from the input name and variant)
  #[arg(long, short = 'o')]
  out: Option<PathBuf>,
}
impl CipherArgs {
  fn variant(&self, direction: Direction) -> Variant {
    let mode = match self.mode {
      ModeArg::Ecb => CipherMode::Ecb,
      ModeArg::Ctr => CipherMode::Ctr,
    };
    Variant::new(mode, direction, self.inflate)
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
  Ecb,
  Ctr,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose > 0 { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  let config = match &cli.config {
    Some(path) => {
      Config::load(path).with_context(|| format!("loading config {}", path.display()))?
    }
    None => Config::default(),
  };

  match cli.command {
    Commands::Keygen { out } => cmd_keygen(&config, &out),
    Commands::Encrypt(args) => cmd_cipher(&config, &args, Direction::Encrypt),
    Commands::Decrypt(args) => cmd_cipher(&config, &args, Direction::Decrypt),
    Commands::Chunks { input } => cmd_chunks(&input),
    Commands::Anonymize { input, join, out } => cmd_anonymize(&input, join, out),
    Commands::Demo { input, keys } => cmd_demo(&config, &input, &keys),
  }
}

fn cmd_keygen(config: &Config, out: &Path) -> Result<()> {
  let keys = rsa::generate_key_pair(config.bits, &mut rand::thread_rng())?;
  rsa::write_key_file(out, &keys).with_context(|| format!("writing {}", out.display()))?;
  info!(bits = keys.modulus().bits(), path = %out.display(), "wrote key pair");
  Ok(())
}

fn cmd_cipher(config: &Config, args: &CipherArgs, direction: Direction) -> Result<()> {
  let keys = rsa::read_key_file(&args.keys)
    .with_context(|| format!("reading key file {}", args.keys.display()))?;
  let variant = args.variant(direction);
  let out = args.out.clone().unwrap_or_else(|| output_path_for(&args.input, variant));
  pipeline::process_file(&args.input, &out, variant, &keys, config)
    .with_context(|| format!("processing {}", args.input.display()))?;
  println!("{}", out.display());
  Ok(())
}

fn cmd_chunks(input: &Path) -> Result<()> {
  let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
  let chunks = parse_chunks(&bytes)?;
  for (n, chunk) in chunks.iter().enumerate() {
    let class = chunk.type_().classify();
    let kind = if class.critical { "critical" } else { "ancillary" };
    let crc = if chunk.check_crc().is_ok() { "ok" } else { "BAD" };
    println!("{n}: {:?} ({}, {kind}) length: {} crc: {crc}", chunk.type_(), class.name, chunk.length());
    match chunk.type_() {
      PngChunkType::IHDR => println!("   {:?}", ImageHeader::try_from(chunk)),
      PngChunkType::PLTE => match chunk.palette_entries() {
        Some(entries) => println!("   {} palette entries", entries.len()),
        None => println!("   palette length isn't a multiple of 3"),
      },
      _ => (),
    }
  }
  Ok(())
}

fn cmd_anonymize(input: &Path, join: bool, out: Option<PathBuf>) -> Result<()> {
  let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
  let chunks = parse_chunks(&bytes)?;
  let kept = pipeline::anonymize(&chunks, join)?;
  info!(before = chunks.len(), after = kept.len(), "dropped ancillary chunks");
  let out = out.unwrap_or_else(|| {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    input.with_file_name(format!("{stem}_anon.png"))
  });
  pipeline::write_png_file(&out, &kept)?;
  println!("{}", out.display());
  Ok(())
}

fn cmd_demo(config: &Config, input: &Path, key_path: &Path) -> Result<()> {
  let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
  let chunks = parse_chunks(&bytes)?;
  let parts = pipeline::split(&chunks)?;
  if let Ok(header) = parts.image_header() {
    info!(
      width = header.width,
      height = header.height,
      color_type = ?header.color_type,
      expected = ?header.expected_inflated_len(),
      compressed = parts.image_data.data().len(),
      "image info"
    );
  }

  let generated = rsa::generate_key_pair(config.bits, &mut rand::thread_rng())?;
  rsa::write_key_file(key_path, &generated)?;
  // go through the file, so the demo also proves the key text round trips
  let keys: KeyPair = rsa::read_key_file(key_path)?;
  anyhow::ensure!(keys == generated, "key file did not round trip");

  for variant in Variant::ENCRYPTING {
    let encrypted = pipeline::run(variant, &keys, config, &chunks)?;
    let enc_path = output_path_for(input, variant);
    pipeline::write_png_file(&enc_path, &encrypted)?;

    let inverse = variant.inverse();
    let decrypted = pipeline::run(inverse, &keys, config, &encrypted)?;
    let dec_path = output_path_for(input, inverse);
    pipeline::write_png_file(&dec_path, &decrypted)?;
    println!("{} -> {}", enc_path.display(), dec_path.display());
  }
  Ok(())
}
