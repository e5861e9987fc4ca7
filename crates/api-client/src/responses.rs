use core_types::ExchangeSymbol;
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to automatically map from JSON camelCase to Rust snake_case.

/// The response from `GET /api/v3/exchangeInfo`. Only the symbol list is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfoResponse {
    pub symbols: Vec<SymbolInfo>,
}

/// A single symbol's metadata from `GET /api/v3/exchangeInfo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    // There are more fields (filters, permissions), none of which we need.
}

impl From<SymbolInfo> for ExchangeSymbol {
    fn from(info: SymbolInfo) -> Self {
        ExchangeSymbol {
            symbol: info.symbol,
            status: info.status,
            base_asset: info.base_asset,
            quote_asset: info.quote_asset,
        }
    }
}

/// A single entry from `GET /api/v3/ticker/24hr` (called without a symbol).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerStats {
    pub symbol: String,
    /// Kept as the decimal string Binance sends; the selector parses it.
    pub quote_volume: String,
    /// Not part of the standard payload; present only on some gateways.
    #[serde(default)]
    pub status: Option<String>,
}

/// Represents an error response from the Binance API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}
