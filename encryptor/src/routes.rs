//! # routes — POST body → ciphertext
//!
//! | Result                  | Status | Body                          |
//! |-------------------------|--------|-------------------------------|
//! | encrypted               | 200    | base64 ciphertext             |
//! | body unreadable         | 400    | `failed to read body`         |
//! | cipher failure          | 500    | `failed to encrypt message`   |

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Router,
};
use tracing::{debug, error};

use crate::cipher::Encryptor;

/// Upper bound on a single payload.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub type SharedEncryptor = Arc<dyn Encryptor>;

/// ทุก path/method ไปที่ handler เดียว เหมือนกับที่ stock service POST มา
pub fn router(encryptor: SharedEncryptor) -> Router {
    Router::new()
        .fallback(handle_encrypt)
        .with_state(encryptor)
}

pub async fn handle_encrypt(
    State(encryptor): State<SharedEncryptor>,
    body: Body,
) -> impl IntoResponse {
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "failed to read body");
            return (StatusCode::BAD_REQUEST, "failed to read body".to_string());
        }
    };

    match encryptor.encrypt(&body) {
        Ok(encrypted) => {
            debug!(plain = body.len(), encrypted = encrypted.len(), "🔒 Payload encrypted");
            (StatusCode::OK, encrypted)
        }
        Err(e) => {
            error!(error = %e, "failed to encrypt message");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to encrypt message".to_string())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::cipher::{Aes256Encryption, CipherError};

    struct SuccessEnc;

    impl Encryptor for SuccessEnc {
        fn encrypt(&self, _plaintext: &[u8]) -> Result<String, CipherError> {
            Ok("abcd1234".to_string())
        }
    }

    struct FailEnc;

    impl Encryptor for FailEnc {
        fn encrypt(&self, _plaintext: &[u8]) -> Result<String, CipherError> {
            Err(CipherError::EncryptionFailed)
        }
    }

    async fn post(encryptor: SharedEncryptor, body: &'static str) -> (StatusCode, String) {
        let response = router(encryptor)
            .oneshot(Request::post("/").body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_failed_to_encrypt_request_body() {
        let (status, body) = post(Arc::new(FailEnc), "any body").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "failed to encrypt message");
    }

    #[tokio::test]
    async fn test_success() {
        let (status, body) = post(Arc::new(SuccessEnc), "any body").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "abcd1234");
    }

    #[tokio::test]
    async fn test_real_cipher_round_trip() {
        let enc = Arc::new(Aes256Encryption::new(b"abcdefghijklmnopqrstuvwxyz012345").unwrap());
        let (status, body) = post(enc.clone(), r#"{"points":[]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(enc.decrypt(&body).unwrap(), br#"{"points":[]}"#);
    }
}
