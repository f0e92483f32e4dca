//! # gateway::client
//!
//! POST ข้อมูลไปที่ encryptor service แล้วคืน body ที่เข้ารหัสแล้ว
//!
//! ```text
//! POST {ENCRYPTOR_HOST}      body = JSON ของ Stock
//! ← 200                       body = ciphertext (base64)
//! ← อื่นๆ                      → EncryptError::ServerError
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error};

use super::{EncryptError, PayloadEncryptor};

pub struct EncryptorClient {
    http: reqwest::Client,
    host: String,
}

impl EncryptorClient {
    pub fn new(http: reqwest::Client, host: impl Into<String>) -> Self {
        Self { http, host: host.into() }
    }
}

#[async_trait]
impl PayloadEncryptor for EncryptorClient {
    async fn encrypt(&self, payload: Vec<u8>) -> Result<Vec<u8>, EncryptError> {
        debug!(bytes = payload.len(), host = %self.host, "Sending payload to encryptor");

        let response = self
            .http
            .post(&self.host)
            .body(payload)
            .send()
            .await
            .map_err(EncryptError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(EncryptError::Body)?;

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(http_status = %status, body = %body, "Encryptor returned HTTP error");
            return Err(EncryptError::ServerError { status: status.as_u16(), body });
        }

        Ok(body.to_vec())
    }
}
