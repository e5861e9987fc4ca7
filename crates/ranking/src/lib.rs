//! Picks which trading pairs get a bot.
//!
//! [`universe::load_tickers`] pulls the raw market data through the
//! `MarketDataClient` trait and attaches a trading status per the configured
//! selection policy; [`PairSelector`] then filters, ranks and truncates.

pub mod error;
pub mod selector;
pub mod universe;

pub use error::RankingError;
pub use selector::PairSelector;
pub use universe::load_tickers;
