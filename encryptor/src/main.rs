//! # Encryptor — Encryption Gateway
//!
//! รับ body ใดๆ ผ่าน HTTP POST แล้วคืน ciphertext (AES-256-GCM, base64)
//! stock service ใช้ตัวนี้ห่อ JSON ก่อนส่งกลับให้ client
//!
//! ## Environment Variables
//!
//! | Variable              | Default        | Description                 |
//! |-----------------------|----------------|-----------------------------|
//! | `BIND_ADDR`           | `0.0.0.0:8081` | Address Axum listens on     |
//! | `ENCRYPTOR_KEY`       | —              | 32-byte key (required)      |
//! | `SERVER_TIMEOUT_SECS` | `10`           | Inbound request timeout     |

use std::sync::Arc;

use anyhow::Context;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use encryptor::{cipher::Aes256Encryption, config::Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("encryptor=debug".parse()?)
            .add_directive("tower_http=info".parse()?))
        .init();

    let config = Config::from_env().context("Failed to load config")?;
    let enc = Aes256Encryption::new(&config.key)
        .with_context(|| format!("failed to create encryption method (key is {} bytes)", config.key.len()))?;

    let app = routes::router(Arc::new(enc))
        .layer(TimeoutLayer::new(config.server_timeout))
        .layer(TraceLayer::new_for_http());

    info!(addr = ?config.bind_addr, "🔒 Encryptor service starting");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
