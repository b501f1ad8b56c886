//! Currency selection, range filtering and the chart/status pair shown to the user

pub mod chart;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::core::{CurrencyCatalog, PriceSeries, ProviderError, SeriesProvider};
pub use chart::Chart;

pub const NO_DATA_STATUS: &str = "Nenhum dado disponível para o período selecionado.";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// The user's current inputs. A missing date falls back to the matching end
/// of the selected currency's own series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub currency: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Selection {
    pub fn new(currency: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Selection {
            currency: currency.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }

    pub fn whole_series(currency: impl Into<String>) -> Self {
        Selection {
            currency: currency.into(),
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub figure: Chart,
    pub status: String,
    #[serde(skip)]
    pub rows: PriceSeries,
}

/// What the page needs before the first update: the choices and the date
/// span of the default currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialView {
    pub currencies: Vec<String>,
    pub default_currency: String,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

pub fn status_text(latest_close: Option<f64>) -> String {
    match latest_close {
        Some(value) => format!("Valor mais recente no período selecionado: R$ {value:.2}"),
        None => NO_DATA_STATUS.to_string(),
    }
}

pub struct Dashboard {
    catalog: CurrencyCatalog,
    provider: Arc<dyn SeriesProvider>,
}

impl Dashboard {
    pub fn new(catalog: CurrencyCatalog, provider: Arc<dyn SeriesProvider>) -> Self {
        Dashboard { catalog, provider }
    }

    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    async fn fetch(&self, currency: &str) -> Result<PriceSeries, DashboardError> {
        let symbol = self
            .catalog
            .symbol(currency)
            .ok_or_else(|| DashboardError::UnknownCurrency(currency.to_string()))?;
        Ok(self.provider.fetch_series(symbol).await?)
    }

    /// Fetches the default currency once to bound the date pickers.
    pub async fn initial_view(&self) -> Result<InitialView, DashboardError> {
        let default_currency = self
            .catalog
            .default_name()
            .ok_or_else(|| DashboardError::UnknownCurrency(String::new()))?
            .to_string();
        let series = self.fetch(&default_currency).await?;

        Ok(InitialView {
            currencies: self.catalog.names().map(str::to_string).collect(),
            default_currency,
            min_date: series.first_date(),
            max_date: series.last_date(),
        })
    }

    /// One full render cycle: always refetches, then filters and draws.
    #[instrument(skip(self), fields(currency = %selection.currency))]
    pub async fn update(&self, selection: &Selection) -> Result<DashboardUpdate, DashboardError> {
        let series = self.fetch(&selection.currency).await?;

        let rows = match (
            selection.start_date.or(series.first_date()),
            selection.end_date.or(series.last_date()),
        ) {
            (Some(start), Some(end)) => series.between(start, end),
            _ => PriceSeries::default(),
        };
        let latest_close = rows.latest_close();
        debug!(rows = rows.len(), ?latest_close, "Filtered series");

        Ok(DashboardUpdate {
            figure: chart::daily_close_chart(&selection.currency, &rows),
            status: status_text(latest_close),
            rows,
        })
    }
}
