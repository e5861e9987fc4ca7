use crate::error::RankingError;
use api_client::{MarketDataClient, TickerStats};
use core_types::{SelectionPolicy, Ticker};
use std::collections::HashMap;

/// Fetches the 24h tickers and attaches a trading status to each one,
/// according to `policy`.
///
/// With [`SelectionPolicy::ExchangeInfo`] the status comes from exchange
/// metadata (fetched first) and the ticker's own status field is ignored.
/// With [`SelectionPolicy::TickerStatus`] only the ticker endpoint is called.
/// Either way, a symbol with no known status gets an empty one, which no
/// selector treats as tradable.
pub async fn load_tickers<C>(client: &C, policy: SelectionPolicy) -> Result<Vec<Ticker>, RankingError>
where
    C: MarketDataClient + ?Sized,
{
    match policy {
        SelectionPolicy::ExchangeInfo => {
            let statuses: HashMap<String, String> = client
                .fetch_exchange_symbols()
                .await?
                .into_iter()
                .map(|s| (s.symbol, s.status))
                .collect();
            tracing::info!(symbols = statuses.len(), "Loaded exchange metadata.");

            let stats = client.fetch_24h_tickers().await?;
            tracing::info!(tickers = stats.len(), "Loaded 24h tickers.");

            Ok(stats
                .into_iter()
                .map(|s| {
                    let status = statuses.get(&s.symbol).cloned().unwrap_or_default();
                    Ticker::new(s.symbol, s.quote_volume, status)
                })
                .collect())
        }
        SelectionPolicy::TickerStatus => {
            let stats = client.fetch_24h_tickers().await?;
            tracing::info!(tickers = stats.len(), "Loaded 24h tickers.");

            Ok(stats.into_iter().map(from_own_status).collect())
        }
    }
}

fn from_own_status(stats: TickerStats) -> Ticker {
    Ticker::new(stats.symbol, stats.quote_volume, stats.status.unwrap_or_default())
}
