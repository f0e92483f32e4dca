//! # routes::stock
//!
//! **Gateway Handler** — จุดเดียวที่ต่อ pipeline ทั้งเส้นเข้าด้วยกัน
//!
//! ## Endpoints
//!
//! | Method | Path                 | Description                                   |
//! |--------|----------------------|-----------------------------------------------|
//! | GET    | `/`, `/api/stock`    | Fetch, aggregate and encrypt a time series    |
//! | GET    | `/health`            | Liveness probe                                |
//!
//! ### Query parameters
//! * `mode`     — 0 intraday, 1 daily, 2 weekly (default), 3 monthly
//! * `interval` — 54 1m, 55 5m, 56 15m, 57 30m, 58 60m (default); intraday only
//! * `symbol`   — forwarded as-is
//!
//! ### Response
//! * `200 OK` with the encryptor's opaque bytes
//! * `500` with the fixed body `internal error` on any failure (see [`AppError`])

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    engine,
    error::AppError,
    models::StockQuery,
    state::{AppState, SharedState},
};

/// Query values the handler reads.  Built from the raw pairs so a repeated
/// key never turns into a 400: the first occurrence wins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StockParams {
    pub mode:     Option<String>,
    pub interval: Option<String>,
    pub symbol:   Option<String>,
}

impl StockParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "mode"     => &mut params.mode,
                "interval" => &mut params.interval,
                "symbol"   => &mut params.symbol,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

// ─── GET / ────────────────────────────────────────────────────────────────────

pub async fn get_stock(
    State(state): State<SharedState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    // ── Step 1: Derive the provider-agnostic query ────────────────────────────
    let params = StockParams::from_pairs(pairs);
    let query = StockQuery::from_params(
        params.mode.as_deref(),
        params.interval.as_deref(),
        params.symbol.as_deref(),
    );

    // ── Step 2: Pipeline ทั้งเส้นภายใต้ timeout เดียว ────────────────────────────
    // หมดเวลา → future ถูก drop พร้อม outbound request ที่ค้างอยู่
    let encrypted = tokio::time::timeout(state.request_timeout, fetch_and_encrypt(&state, &query))
        .await
        .map_err(|_| AppError::Timeout(state.request_timeout))??;

    Ok((StatusCode::OK, encrypted))
}

/// Translate → fetch → aggregate → serialize → encrypt.
async fn fetch_and_encrypt(state: &AppState, query: &StockQuery) -> Result<Vec<u8>, AppError> {
    let stock = engine::get_stock(state.source.as_ref(), query).await?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        if let Ok(pretty) = serde_json::to_string_pretty(&stock) {
            debug!("stock data \n{pretty}");
        }
    }

    // ── Serialize แล้วส่งไปเข้ารหัส ───────────────────────────────────────────
    let text = serde_json::to_vec(&stock)?;
    let encrypted = state.encryptor.encrypt(text).await?;

    info!(
        symbol    = %query.symbol,
        mode      = ?query.mode,
        points    = stock.points.len(),
        bytes     = encrypted.len(),
        "✅ Encrypted stock response ready"
    );

    Ok(encrypted)
}

// ─── GET /health ──────────────────────────────────────────────────────────────

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
