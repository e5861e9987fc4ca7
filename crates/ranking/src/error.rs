use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Market data request failed: {0}")]
    MarketData(#[from] api_client::error::ApiError),

    #[error("Data format error: {0}")]
    DataFormat(#[from] core_types::CoreError),
}
