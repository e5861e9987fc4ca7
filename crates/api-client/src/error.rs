use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build or send the HTTP request: {0}")]
    RequestBuild(#[from] reqwest::Error),

    #[error("Binance returned error {0}: {1}")]
    BinanceError(i64, String),

    #[error("The API request returned an error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid API credentials: {0}")]
    InvalidCredentials(String),
}
