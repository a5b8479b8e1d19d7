//! Ed25519 signature operations

use ccd_primitives::Hash256;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroize;

use crate::CryptoError;

/// Ed25519 public key (32 bytes)
pub type PublicKey = VerifyingKey;

/// 64-byte Ed25519 signature as it appears on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Size in bytes
    pub const LEN: usize = 64;

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Signature(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        if slice.len() != Self::LEN {
            return Err(CryptoError::InvalidSignature(format!(
                "expected 64 bytes, got {}",
                slice.len()
            )));
        }
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(slice);
        Ok(Signature(bytes))
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a 32-byte digest
pub fn sign(digest: &Hash256, key: &SigningKey) -> Signature {
    Signature(key.sign(digest.as_bytes()).to_bytes())
}

/// Verify a signature on a 32-byte digest
pub fn verify(digest: &Hash256, signature: &Signature, public_key: &PublicKey) -> Result<(), CryptoError> {
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    public_key
        .verify(digest.as_bytes(), &sig)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}

/// Ed25519 key pair
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create from the 32-byte secret key
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    /// Create from a hex-encoded 32-byte secret key
    pub fn from_secret_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        if bytes.len() != 32 {
            let len = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                len
            )));
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        bytes.zeroize();
        let pair = Self::from_secret_bytes(&secret);
        secret.zeroize();
        Ok(pair)
    }

    /// Public half of the pair
    pub fn public_key(&self) -> PublicKey {
        self.signing_key.verifying_key()
    }

    /// Sign a 32-byte digest
    pub fn sign(&self, digest: &Hash256) -> Signature {
        sign(digest, &self.signing_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key().as_bytes()))
            .finish_non_exhaustive()
    }
}
