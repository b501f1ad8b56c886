//! Core domain types and abstractions

pub mod catalog;
pub mod config;
pub mod log;
pub mod provider;
pub mod series;

// Re-export main types for cleaner imports
pub use catalog::CurrencyCatalog;
pub use provider::{ProviderError, SeriesProvider};
pub use series::{PriceBar, PriceSeries};
