use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// 24h statistics for one trading pair, as consumed by the pair selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    /// Traded volume over 24h in the quote asset, kept as the exchange sent it.
    pub quote_volume: String,
    /// Trading status (e.g. "TRADING", "BREAK"). Empty when unknown.
    pub status: String,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, quote_volume: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quote_volume: quote_volume.into(),
            status: status.into(),
        }
    }

    /// Parses `quote_volume` as a float. NaN and infinities are rejected.
    pub fn parsed_quote_volume(&self) -> Result<f64, CoreError> {
        self.quote_volume
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CoreError::InvalidQuoteVolume {
                symbol: self.symbol.clone(),
                value: self.quote_volume.clone(),
            })
    }
}

/// One row of exchange metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSymbol {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
}

/// A symbol that made it into the ranking, with the volume it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSymbol {
    pub symbol: String,
    pub quote_volume: f64,
}

/// Symbols ordered by descending 24h quote volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolRanking {
    pub entries: Vec<RankedSymbol>,
}

impl SymbolRanking {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }
}

/// Everything needed to render one bot's service unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSpec {
    /// The trading pair, as the exchange spells it (e.g. "BTCUSDC").
    pub symbol: String,
    /// `tradebot_<lowercase symbol>.service`
    pub service_name: String,
    pub working_directory: String,
    /// Command prefix that runs the archive, e.g. `/usr/bin/java -jar`.
    pub launcher: String,
    pub jar_path: String,
    pub log_path: String,
    pub run_as_user: String,
}
