//! # provider::alphavantage
//!
//! **Alpha Vantage client** — ดึง Time Series เป็น CSV ผ่าน HTTP GET
//!
//! ## API Contract
//! ```text
//! GET {host}/query?function=TIME_SERIES_WEEKLY&symbol=IBM&apikey=...&datatype=csv
//!                  [&interval=5min]   ← เฉพาะ TIME_SERIES_INTRADAY
//! ```
//! One request per call, no retry.  Dropping the returned future abandons the
//! in-flight request.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error};

use super::{parse::parse_time_series, ProviderError, ProviderRequest, RawRecord, TimeSeriesSource};

pub struct AlphaVantageClient {
    /// Shared client built in `main`; its timeout bounds every fetch.
    http:    reqwest::Client,
    host:    String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(http: reqwest::Client, host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            host:    host.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Query parameters in the order they are sent.
    pub fn query_params(&self, request: &ProviderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("function", request.function.as_str().to_string()),
            ("symbol",   request.symbol.clone()),
            ("apikey",   self.api_key.clone()),
            ("datatype", "csv".to_string()),
        ];

        // interval มีความหมายเฉพาะ Intraday — โหมดอื่นห้ามส่งขึ้นไป
        if request.function.is_intraday() {
            if let Some(interval) = request.interval {
                params.push(("interval", interval.as_str().to_string()));
            }
        }

        params
    }
}

#[async_trait]
impl TimeSeriesSource for AlphaVantageClient {
    async fn fetch_time_series(
        &self,
        request: &ProviderRequest,
    ) -> Result<Vec<RawRecord>, ProviderError> {
        let url = format!("{}/query", self.host);

        debug!(
            function = request.function.as_str(),
            interval = ?request.interval.map(|i| i.as_str()),
            symbol   = %request.symbol,
            "Fetching time series from Alpha Vantage"
        );

        // ── HTTP GET ──────────────────────────────────────────────────────────
        let response = self
            .http
            .get(&url)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        // ── HTTP Status ───────────────────────────────────────────────────────
        let status = response.status();
        if status != StatusCode::OK {
            let dump = dump_response(response).await;
            error!(http_status = %status, "Alpha Vantage returned HTTP error");
            return Err(ProviderError::ServerResponse { status: status.as_u16(), dump });
        }

        // ── Parse CSV ─────────────────────────────────────────────────────────
        let body = response.text().await.map_err(ProviderError::Body)?;
        let records = parse_time_series(request.function, &body)?;

        debug!(symbol = %request.symbol, records = records.len(), "Time series parsed");

        Ok(records)
    }
}

/// Status line + headers + body, for diagnostics only.
async fn dump_response(response: reqwest::Response) -> String {
    let mut dump = format!("{:?} {}\n", response.version(), response.status());
    for (name, value) in response.headers() {
        dump.push_str(&format!("{}: {}\n", name, value.to_str().unwrap_or("<binary>")));
    }
    dump.push('\n');
    dump.push_str(&response.text().await.unwrap_or_default());
    dump
}

// ─── Tests ────────────────────────────────────────────────────────────────────
