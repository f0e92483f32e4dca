//! # config — อ่าน Config จาก Environment Variables

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Config ทั้งหมดที่ stock service ต้องการ
#[derive(Debug, Clone)]
pub struct Config {
    /// Address ที่ Axum listen
    pub bind_addr:         SocketAddr,
    /// Base URL ของ Alpha Vantage (ไม่มี `/query`)
    pub alphavantage_host: String,
    pub alphavantage_key:  String,
    /// URL ของ encryptor service (POST ตรงไปที่ URL นี้)
    pub encryptor_host:    String,
    /// Timeout ของ outbound HTTP client (Alpha Vantage + Encryptor)
    pub http_timeout:      Duration,
    /// Timeout ของ pipeline ทั้งเส้นต่อ request (หมดเวลา → 500 internal error)
    pub server_timeout:    Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let alphavantage_key = std::env::var("ALPHAVANTAGE_KEY")
            .context("ALPHAVANTAGE_KEY environment variable is required")?;

        Ok(Self {
            bind_addr,
            alphavantage_host: std::env::var("ALPHAVANTAGE_HOST")
                .unwrap_or_else(|_| "https://www.alphavantage.co".to_string()),
            alphavantage_key,
            encryptor_host:    std::env::var("ENCRYPTOR_HOST")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            http_timeout:      Duration::from_secs(env_secs("HTTP_TIMEOUT_SECS", 10)?),
            server_timeout:    Duration::from_secs(env_secs("SERVER_TIMEOUT_SECS", 10)?),
        })
    }
}

fn env_secs(key: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
