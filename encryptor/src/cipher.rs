//! # cipher — AES-256-GCM
//!
//! ## Wire format
//! ```text
//! base64( nonce[12] ‖ ciphertext+tag )
//! ```
//! Every call draws a fresh random nonce, so encrypting the same payload twice
//! gives different output.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// AES-256 key size (bytes)
pub const KEY_SIZE: usize = 32;

/// AES-GCM nonce size (bytes)
pub const NONCE_SIZE: usize = 12;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("invalid key: expected 32 bytes, got {0}")]
    InvalidKey(usize),

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("ciphertext too short: {0} bytes")]
    InvalidCiphertext(usize),

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// ตัวเข้ารหัสที่ route handler ใช้ — แยกเป็น trait เพื่อ inject ตัวปลอมใน test
pub trait Encryptor: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError>;
}

pub struct Aes256Encryption {
    cipher: Aes256Gcm,
}

impl Aes256Encryption {
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_SIZE {
            return Err(CipherError::InvalidKey(key.len()));
        }

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKey(key.len()))?;
        Ok(Self { cipher })
    }

    /// Inverse of [`Encryptor::encrypt`].
    pub fn decrypt(&self, encoded: &str) -> Result<Vec<u8>, CipherError> {
        let raw = STANDARD.decode(encoded.trim())?;
        if raw.len() < NONCE_SIZE {
            return Err(CipherError::InvalidCiphertext(raw.len()));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::DecryptionFailed)
    }
}

impl Encryptor for Aes256Encryption {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(out))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"abcdefghijklmnopqrstuvwxyz012345";

    #[test]
    fn test_key_length_is_not_32() {
        assert!(matches!(Aes256Encryption::new(b"abc123"), Err(CipherError::InvalidKey(6))));
    }

    #[test]
    fn test_encrypt_then_decrypt() {
        let enc = Aes256Encryption::new(KEY).unwrap();
        let encrypted = enc.encrypt(b"valid plain text").unwrap();

        assert_ne!(encrypted.as_bytes(), b"valid plain text");
        assert_eq!(enc.decrypt(&encrypted).unwrap(), b"valid plain text");
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let enc = Aes256Encryption::new(KEY).unwrap();
        let a = enc.encrypt(b"same").unwrap();
        let b = enc.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let enc = Aes256Encryption::new(KEY).unwrap();
        let other = Aes256Encryption::new(b"012345abcdefghijklmnopqrstuvwxyz").unwrap();

        let encrypted = enc.encrypt(b"secret").unwrap();
        assert!(matches!(other.decrypt(&encrypted), Err(CipherError::DecryptionFailed)));
    }

    #[test]
    fn test_short_ciphertext_is_rejected() {
        let enc = Aes256Encryption::new(KEY).unwrap();
        let short = STANDARD.encode([0u8; 4]);
        assert!(matches!(enc.decrypt(&short), Err(CipherError::InvalidCiphertext(4))));
        assert!(matches!(enc.decrypt("not base64!"), Err(CipherError::Base64(_))));
    }
}
