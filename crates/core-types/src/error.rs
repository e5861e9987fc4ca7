use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid quoteVolume for {symbol}: '{value}' is not a finite number")]
    InvalidQuoteVolume { symbol: String, value: String },
}
