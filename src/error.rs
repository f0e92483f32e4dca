//! # error
//!
//! Centralised application error type.
//!
//! Every stage of the stock pipeline bubbles its own error kind up unchanged
//! into [`AppError`].  The granularity is kept for the log only: Axum's
//! `IntoResponse` impl collapses every variant into the same opaque
//! `500 internal error` so no upstream detail ever reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::gateway::EncryptError;
use crate::provider::ProviderError;

/// Body ที่ส่งกลับทุกครั้งที่ pipeline ล้มเหลว
pub const INTERNAL_ERROR_BODY: &str = "internal error";

#[derive(Debug, Error)]
pub enum AppError {
    /// Alpha Vantage unreachable, non-200, or returned a malformed CSV.
    #[error("failed to get stock: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered with a header and no data rows.
    #[error("empty time series: nothing to aggregate")]
    EmptySeries,

    /// A summary statistic left its numeric range (volume sum past `i64`,
    /// market cap past `f64`).
    #[error("{0} overflowed while aggregating")]
    Overflow(&'static str),

    /// The pipeline did not finish within the request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The aggregated stock could not be encoded as JSON.
    #[error("failed to marshal stock data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Encryptor unreachable or answered with a non-200.
    #[error("failed to encrypt stock data: {0}")]
    Encryption(#[from] EncryptError),
}

impl AppError {
    /// ชื่อสั้นของประเภท error สำหรับ structured log
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Provider(_)      => "provider",
            AppError::EmptySeries      => "empty_series",
            AppError::Overflow(_)      => "overflow",
            AppError::Timeout(_)       => "timeout",
            AppError::Serialization(_) => "serialization",
            AppError::Encryption(_)    => "encryption",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(kind = self.kind(), error = %self, "❌ Stock request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
    }
}
