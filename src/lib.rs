#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]

//! A crate for encrypting the image data of PNG files with textbook RSA.
//!
//! The work happens in a few stages, each with its own module:
//!
//! * [`png`]: splits PNG bytes into chunks, classifies them, and writes
//!   chunks back out with fresh CRC values.
//! * [`rsa`]: generates key pairs and handles the key file text format.
//! * [`cipher`]: the two block modes, ECB-style direct exponentiation and a
//!   counter keystream.
//! * [`compress`]: the zlib round trip used by the "inflated" variants.
//! * [`pipeline`]: ties it all together over a whole PNG.
//!
//! None of this is secure cryptography. There's no padding, the public
//! exponent is chosen at random, and ECB mode leaks equal blocks. It's a tool
//! for looking at what RSA does to image bytes.
//!
//! ```no_run
//! use pngrsa::{pipeline::{self, Variant}, rsa, Config};
//! # fn main() -> pngrsa::Result<()> {
//! let config = Config::default();
//! let keys = rsa::generate_key_pair(config.bits, &mut rand::thread_rng())?;
//! let bytes = std::fs::read("in.png")?;
//! let chunks = pngrsa::png::parse_chunks(&bytes)?;
//! let out = pipeline::run(Variant::ENCRYPT_CTR, &keys, &config, &chunks)?;
//! std::fs::write("in_enc_ctr.png", pngrsa::png::write_png(&out)?)?;
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod config;
pub use config::*;

pub mod png;

pub mod rsa;

pub mod cipher;

pub mod compress;

pub mod pipeline;
