use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::ExchangeSymbol;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{ApiErrorResponse, ExchangeInfoResponse, SymbolInfo, TickerStats};

/// The read-only market data surface the orchestrator consumes.
/// The pair selector only ever talks to this trait, so a fake can stand in
/// for the exchange in tests.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches metadata (status, base/quote asset) for every listed symbol.
    async fn fetch_exchange_symbols(&self) -> Result<Vec<ExchangeSymbol>, ApiError>;

    /// Fetches 24h rolling statistics for every listed symbol.
    async fn fetch_24h_tickers(&self) -> Result<Vec<TickerStats>, ApiError>;
}

/// A concrete implementation of the `MarketDataClient` for the Binance spot API.
#[derive(Clone)]
pub struct BinanceClient {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceClient {
    /// Builds a client that sends the API key with every request.
    /// Callers are expected to have validated the credentials already.
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-MBX-APIKEY",
            HeaderValue::from_str(&api_config.key)
                .map_err(|_| ApiError::InvalidCredentials("api.key contains invalid characters".to_string()))?,
        );

        Ok(Self {
            client: reqwest::Client::builder().default_headers(headers).build()?,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues an unsigned GET with no query parameters.
    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text)
    }
}

/// Turns a raw HTTP status and body into either the expected payload or the
/// most specific error we can extract from it.
fn decode_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ApiError> {
    if status.is_success() {
        return serde_json::from_str::<T>(text).map_err(|e| ApiError::Deserialization(e.to_string()));
    }
    match serde_json::from_str::<ApiErrorResponse>(text) {
        Ok(api_error) => Err(ApiError::BinanceError(api_error.code, api_error.msg)),
        Err(_) => Err(ApiError::Http {
            status: status.as_u16(),
            body: text.to_string(),
        }),
    }
}

#[async_trait]
impl MarketDataClient for BinanceClient {
    async fn fetch_exchange_symbols(&self) -> Result<Vec<ExchangeSymbol>, ApiError> {
        let info: ExchangeInfoResponse = self.get_public("/api/v3/exchangeInfo").await?;
        tracing::debug!(count = info.symbols.len(), "Fetched exchange metadata.");
        Ok(info.symbols.into_iter().map(ExchangeSymbol::from).collect())
    }

    async fn fetch_24h_tickers(&self) -> Result<Vec<TickerStats>, ApiError> {
        let tickers: Vec<TickerStats> = self.get_public("/api/v3/ticker/24hr").await?;
        tracing::debug!(count = tickers.len(), "Fetched 24h tickers.");
        Ok(tickers)
    }
}
