//! # Stockplay — Stock Time-Series Service
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐  GET /?mode=&interval=&symbol=  ┌──────────────────────────┐
//!  │  Client      │ ───────────────────────────────▶│  routes::stock           │
//!  └──────────────┘                                 │   ├─ translator          │
//!         ▲                                         │   ├─ Alpha Vantage (CSV) │──▶ GET /query
//!         │   opaque bytes / 500 internal error     │   ├─ aggregator          │
//!         └──────────────────────────────────────── │   └─ encryptor client    │──▶ POST encryptor
//!                                                   └──────────────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable              | Default                       | Description                        |
//! |-----------------------|-------------------------------|------------------------------------|
//! | `BIND_ADDR`           | `0.0.0.0:8080`                | Address Axum listens on            |
//! | `ALPHAVANTAGE_HOST`   | `https://www.alphavantage.co` | Provider base URL                  |
//! | `ALPHAVANTAGE_KEY`    | —                             | Provider API key (required)        |
//! | `ENCRYPTOR_HOST`      | `http://localhost:8081`       | Encryptor service URL              |
//! | `HTTP_TIMEOUT_SECS`   | `10`                          | Outbound HTTP client timeout       |
//! | `SERVER_TIMEOUT_SECS` | `10`                          | Whole-pipeline request timeout     |
//! | `RUST_LOG`            | `stockplay=debug`             | Tracing filter                     |

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod engine;
mod error;
mod gateway;
mod models;
mod provider;
mod routes;
mod state;

use config::Config;
use state::build_state;

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — CI/prod can use real env vars) ──────────────
    dotenvy::dotenv().ok();

    // ── 2. Initialise structured logging ─────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("stockplay=debug".parse()?)
            .add_directive("tower_http=info".parse()?)
            .add_directive("reqwest=warn".parse()?))
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════════╗
  ║        STOCKPLAY — Stock Service              ║
  ║        Alpha Vantage  ·  Encrypted Output     ║
  ╚═══════════════════════════════════════════════╝"#
    );

    // ── 3. Config + shared state ─────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let state = build_state(&config)?;

    info!(
        provider       = %config.alphavantage_host,
        encryptor      = %config.encryptor_host,
        http_timeout   = ?config.http_timeout,
        server_timeout = ?config.server_timeout,
        "Config loaded"
    );

    // ── 4. Build the Axum router ─────────────────────────────────────────────
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http());

    // ── 5. Start the server ──────────────────────────────────────────────────
    info!(addr = ?config.bind_addr, "🚀 Stock service starting");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
