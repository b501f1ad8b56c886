use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::{PriceBar, PriceSeries, ProviderError, SeriesProvider};

const DEFAULT_LOOKBACK_YEARS: u32 = 20;

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    result: Option<Vec<ChartItem>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct ChartMeta {
    #[serde(alias = "exchangeTimezoneName")]
    exchange_timezone_name: Option<String>,
    /// Offset in effect when the response was generated, not per bar.
    #[serde(default)]
    gmtoffset: i64,
}

/// Calendar that turns bar timestamps into exchange-local dates.
enum ExchangeClock {
    Zone(Tz),
    Offset(FixedOffset),
}

impl ExchangeClock {
    fn for_meta(meta: &ChartMeta) -> Result<Self, String> {
        if let Some(zone) = meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
        {
            return Ok(ExchangeClock::Zone(zone));
        }
        i32::try_from(meta.gmtoffset)
            .ok()
            .and_then(FixedOffset::east_opt)
            .map(ExchangeClock::Offset)
            .ok_or_else(|| format!("invalid gmtoffset {}", meta.gmtoffset))
    }

    fn date_of(&self, ts: i64) -> Option<NaiveDate> {
        match self {
            ExchangeClock::Zone(zone) => {
                zone.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive())
            }
            ExchangeClock::Offset(offset) => {
                offset.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive())
            }
        }
    }
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

type Column = Option<Vec<Option<f64>>>;

#[derive(Deserialize, Debug)]
struct Quote {
    open: Column,
    high: Column,
    low: Column,
    close: Column,
    volume: Column,
}

fn cell(column: &Column, index: usize) -> Option<f64> {
    column
        .as_ref()
        .and_then(|values| values.get(index).copied().flatten())
}

/// Flattens the parallel `timestamp` and quote arrays into one bar per day.
/// Days without a close are skipped.
fn flatten_bars(item: &ChartItem) -> Result<Vec<PriceBar>, String> {
    let Some(timestamps) = item.timestamp.as_ref() else {
        return Ok(Vec::new());
    };
    let quote = item
        .indicators
        .as_ref()
        .and_then(|inds| inds.quote.first())
        .ok_or_else(|| "timestamps present without quote indicators".to_string())?;

    let clock = ExchangeClock::for_meta(&item.meta)?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, ts) in timestamps.iter().enumerate() {
        let Some(close) = cell(&quote.close, index) else {
            continue;
        };
        let date = clock
            .date_of(*ts)
            .ok_or_else(|| format!("invalid timestamp {ts}"))?;

        bars.push(PriceBar {
            date,
            open: cell(&quote.open, index),
            high: cell(&quote.high, index),
            low: cell(&quote.low, index),
            close,
            volume: cell(&quote.volume, index).map(|v| v as u64),
        });
    }

    Ok(bars)
}

/// Daily unadjusted bars from the Yahoo Finance chart API.
pub struct YahooFinanceProvider {
    base_url: String,
    lookback_years: u32,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Self {
        YahooFinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            lookback_years: DEFAULT_LOOKBACK_YEARS,
        }
    }

    pub fn with_lookback_years(mut self, years: u32) -> Self {
        self.lookback_years = years;
        self
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}y&interval=1d&events=history",
            self.base_url, symbol, self.lookback_years
        )
    }
}

#[async_trait]
impl SeriesProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooSeriesFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        let request_error = |source| ProviderError::Request {
            symbol: symbol.to_string(),
            source,
        };

        let url = self.chart_url(symbol);
        debug!("Requesting price history from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxdash/1.0")
            .build()
            .map_err(request_error)?;
        let response = client.get(&url).send().await.map_err(request_error)?;

        let status = response.status();
        let text = response.text().await.map_err(request_error)?;
        let parsed = serde_json::from_str::<YahooChartResponse>(&text);

        // Unknown symbols come back as a 404 carrying a chart error body.
        if let Ok(YahooChartResponse {
            chart: ChartEnvelope {
                error: Some(err), ..
            },
        }) = &parsed
        {
            return Err(ProviderError::Rejected {
                symbol: symbol.to_string(),
                code: err.code.clone(),
                description: err.description.clone(),
            });
        }

        if !status.is_success() {
            return Err(ProviderError::Status {
                symbol: symbol.to_string(),
                status,
            });
        }

        let data = parsed.map_err(|e| ProviderError::Parse {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

        let bars = match data.chart.result.as_deref().and_then(|items| items.first()) {
            Some(item) => flatten_bars(item).map_err(|message| ProviderError::Parse {
                symbol: symbol.to_string(),
                message,
            })?,
            None => Vec::new(),
        };

        let series = PriceSeries::from_bars(bars);
        debug!(
            rows = series.len(),
            first = ?series.first_date(),
            last = ?series.last_date(),
            "Received price history"
        );
        Ok(series)
    }
}
