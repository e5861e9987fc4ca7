use serde::{Deserialize, Serialize};

/// How the set of eligible symbols is determined before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Trading status comes from the exchange metadata endpoint.
    #[default]
    ExchangeInfo,
    /// Trading status comes from the ticker payload itself.
    TickerStatus,
}

/// Where each bot's stdout/stderr is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLayout {
    /// One `output_<symbol>.log` per bot.
    #[default]
    PerSymbol,
    /// All bots append to a single `output.log`.
    Shared,
}
