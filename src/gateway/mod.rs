//! # gateway
//!
//! Encryption Gateway boundary: the [`PayloadEncryptor`] capability and the
//! HTTP client for the `encryptor` service.
//!
//! The payload is opaque both ways.  Nothing here knows the cipher.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::EncryptorClient;

#[derive(Debug, Error)]
pub enum EncryptError {
    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Encryptor answered with a non-200.  Detail stays in the log.
    #[error("error response from encryptor status code [{status}] message [{body}]")]
    ServerError { status: u16, body: String },
}

/// Turns an arbitrary byte payload into an opaque one.
#[async_trait]
pub trait PayloadEncryptor: Send + Sync {
    async fn encrypt(&self, payload: Vec<u8>) -> Result<Vec<u8>, EncryptError>;
}
