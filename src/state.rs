//! # state
//!
//! AppState — มีแค่ capability สองตัวที่ inject เข้ามาตอน construct
//! ไม่มี mutable state ร่วมกันระหว่าง Request

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::gateway::{EncryptorClient, PayloadEncryptor};
use crate::provider::{AlphaVantageClient, TimeSeriesSource};

/// Top-level shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// แหล่งข้อมูล Time Series (Alpha Vantage ใน production)
    pub source:    Arc<dyn TimeSeriesSource>,
    /// ตัวเข้ารหัส response body
    pub encryptor: Arc<dyn PayloadEncryptor>,
    /// เวลาสูงสุดของ pipeline ทั้งเส้น (fetch → aggregate → encrypt)
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        source: Arc<dyn TimeSeriesSource>,
        encryptor: Arc<dyn PayloadEncryptor>,
        request_timeout: Duration,
    ) -> Self {
        Self { source, encryptor, request_timeout }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

/// สร้าง State จาก Config — reqwest Client ตัวเดียว share กันทั้งสอง client
pub fn build_state(config: &Config) -> anyhow::Result<SharedState> {
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let source = AlphaVantageClient::new(
        http_client.clone(),
        config.alphavantage_host.clone(),
        config.alphavantage_key.clone(),
    );
    let encryptor = EncryptorClient::new(http_client, config.encryptor_host.clone());

    Ok(Arc::new(AppState::new(
        Arc::new(source),
        Arc::new(encryptor),
        config.server_timeout,
    )))
}
