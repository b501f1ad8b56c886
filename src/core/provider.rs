//! Price history provider abstraction

use async_trait::async_trait;
use thiserror::Error;

use super::series::PriceSeries;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request error: {source} for symbol: {symbol}")]
    Request {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for symbol: {symbol}")]
    Status {
        symbol: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse response for {symbol}: {message}")]
    Parse { symbol: String, message: String },

    #[error("Provider rejected symbol {symbol}: {code}: {description}")]
    Rejected {
        symbol: String,
        code: String,
        description: String,
    },
}

#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetches the full daily history available for `symbol`.
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, ProviderError>;
}
