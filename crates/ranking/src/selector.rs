use crate::error::RankingError;
use configuration::SelectionConfig;
use core_types::{RankedSymbol, SymbolRanking, Ticker};

/// Filters tickers down to tradable pairs of one quote asset and ranks them
/// by 24h quote volume.
#[derive(Debug, Clone)]
pub struct PairSelector {
    quote_asset: String,
    trading_status: String,
    top_n: usize,
}

impl PairSelector {
    pub fn new(quote_asset: impl Into<String>, trading_status: impl Into<String>, top_n: usize) -> Self {
        Self {
            quote_asset: quote_asset.into(),
            trading_status: trading_status.into(),
            top_n,
        }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(&config.quote_asset, &config.trading_status, config.top_n)
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    fn is_eligible(&self, ticker: &Ticker) -> bool {
        ticker.symbol.ends_with(&self.quote_asset) && ticker.status == self.trading_status
    }

    /// Produces at most `top_n` symbols, highest quote volume first.
    ///
    /// Equal volumes keep their input order. A volume that does not parse
    /// aborts the whole selection; it is never skipped or sorted arbitrarily.
    pub fn select(&self, tickers: &[Ticker]) -> Result<SymbolRanking, RankingError> {
        // 1. Filter
        let mut ranked = tickers
            .iter()
            .filter(|t| self.is_eligible(t))
            .map(|t| -> Result<RankedSymbol, RankingError> {
                Ok(RankedSymbol {
                    symbol: t.symbol.clone(),
                    quote_volume: t.parsed_quote_volume()?,
                })
            })
            .collect::<Result<Vec<_>, RankingError>>()?;

        // 2. Rank (`sort_by` is stable)
        ranked.sort_by(|a, b| b.quote_volume.total_cmp(&a.quote_volume));

        // 3. Truncate
        ranked.truncate(self.top_n);

        for (i, entry) in ranked.iter().enumerate() {
            tracing::info!(
                "Top {}: {} with quoteVolume {:.2} {}",
                i + 1,
                entry.symbol,
                entry.quote_volume,
                self.quote_asset
            );
        }

        Ok(SymbolRanking { entries: ranked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;

    fn selector() -> PairSelector {
        PairSelector::new("USDC", "TRADING", 20)
    }

    fn symbols(ranking: &SymbolRanking) -> Vec<&str> {
        ranking.symbols().collect()
    }

    #[test]
    fn filters_by_suffix_and_status_then_ranks() {
        let tickers = vec![
            Ticker::new("BTCUSDC", "1000000", "TRADING"),
            Ticker::new("ETHUSDC", "2000000", "TRADING"),
            Ticker::new("XRPUSDT", "5000000", "TRADING"),
            Ticker::new("DOGEUSDC", "500", "BREAK"),
        ];
        let ranking = selector().select(&tickers).unwrap();
        assert_eq!(symbols(&ranking), vec!["ETHUSDC", "BTCUSDC"]);
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let ranking = selector().select(&[]).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn bad_volume_names_symbol_and_value() {
        let tickers = vec![
            Ticker::new("BTCUSDC", "1000", "TRADING"),
            Ticker::new("ETHUSDC", "not_a_number", "TRADING"),
        ];
        let err = selector().select(&tickers).unwrap_err();
        match err {
            RankingError::DataFormat(CoreError::InvalidQuoteVolume { symbol, value }) => {
                assert_eq!(symbol, "ETHUSDC");
                assert_eq!(value, "not_a_number");
            }
            other => panic!("expected data format error, got: {other}"),
        }
        assert!(
            selector()
                .select(&tickers)
                .unwrap_err()
                .to_string()
                .contains("not_a_number")
        );
    }

    #[test]
    fn bad_volume_on_ineligible_ticker_is_ignored() {
        let tickers = vec![
            Ticker::new("BTCUSDC", "1000", "TRADING"),
            Ticker::new("ETHUSDT", "garbage", "TRADING"),
            Ticker::new("SOLUSDC", "garbage", "BREAK"),
        ];
        let ranking = selector().select(&tickers).unwrap();
        assert_eq!(symbols(&ranking), vec!["BTCUSDC"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let tickers: Vec<Ticker> = (0..30)
            .map(|i| Ticker::new(format!("C{i}USDC"), format!("{}", i * 10), "TRADING"))
            .collect();
        let ranking = selector().select(&tickers).unwrap();

        assert_eq!(ranking.len(), 20);
        assert_eq!(ranking.entries[0].symbol, "C29USDC");
        assert_eq!(ranking.entries[19].symbol, "C10USDC");
    }

    #[test]
    fn ties_keep_input_order() {
        let tickers = vec![
            Ticker::new("AAAUSDC", "10", "TRADING"),
            Ticker::new("BBBUSDC", "50", "TRADING"),
            Ticker::new("CCCUSDC", "10", "TRADING"),
            Ticker::new("DDDUSDC", "10.0", "TRADING"),
        ];
        let ranking = selector().select(&tickers).unwrap();
        assert_eq!(symbols(&ranking), vec!["BBBUSDC", "AAAUSDC", "CCCUSDC", "DDDUSDC"]);
    }

    #[test]
    fn volumes_compare_numerically_not_lexically() {
        let tickers = vec![
            Ticker::new("AUSDC", "9.5", "TRADING"),
            Ticker::new("BUSDC", "10.25", "TRADING"),
            Ticker::new("CUSDC", "100", "TRADING"),
        ];
        let ranking = selector().select(&tickers).unwrap();
        assert_eq!(symbols(&ranking), vec!["CUSDC", "BUSDC", "AUSDC"]);
    }

    #[test]
    fn output_respects_predicates_order_and_bound() {
        let statuses = ["TRADING", "BREAK", "HALT", ""];
        let suffixes = ["USDC", "USDT", "BTC"];
        let tickers: Vec<Ticker> = (0..120)
            .map(|i| {
                Ticker::new(
                    format!("S{i}{}", suffixes[i % suffixes.len()]),
                    format!("{}.{}", (i * 7919) % 1000, i % 10),
                    statuses[i % statuses.len()],
                )
            })
            .collect();
        let ranking = selector().select(&tickers).unwrap();

        assert!(ranking.len() <= 20);
        assert!(!ranking.is_empty());
        for entry in &ranking.entries {
            let source = tickers.iter().find(|t| t.symbol == entry.symbol).unwrap();
            assert!(source.symbol.ends_with("USDC"));
            assert_eq!(source.status, "TRADING");
        }
        for pair in ranking.entries.windows(2) {
            assert!(pair[0].quote_volume >= pair[1].quote_volume);
        }
    }

    #[test]
    fn selection_is_idempotent() {
        let tickers = vec![
            Ticker::new("BTCUSDC", "1000000", "TRADING"),
            Ticker::new("ETHUSDC", "2000000", "TRADING"),
            Ticker::new("SOLUSDC", "2000000", "TRADING"),
        ];
        let first = selector().select(&tickers).unwrap();
        let second = selector().select(&tickers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn config_values_are_honoured() {
        let config = SelectionConfig {
            top_n: 1,
            quote_asset: "USDT".to_string(),
            ..SelectionConfig::default()
        };
        let tickers = vec![
            Ticker::new("BTCUSDT", "5", "TRADING"),
            Ticker::new("ETHUSDT", "6", "TRADING"),
            Ticker::new("ETHUSDC", "60", "TRADING"),
        ];
        let ranking = PairSelector::from_config(&config).select(&tickers).unwrap();
        assert_eq!(symbols(&ranking), vec!["ETHUSDT"]);
    }
}
