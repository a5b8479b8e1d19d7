//! # ccd-crypto
//!
//! Cryptographic primitives for the CCD client SDK.
//!
//! - SHA-256 hashing (signing digests, transaction hashes)
//! - Ed25519 signing/verification of 32-byte digests

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;

pub use error::CryptoError;
pub use hash::{sha256, sha256_concat};
pub use signature::{sign, verify, KeyPair, PublicKey, Signature};
