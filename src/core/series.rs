//! Daily price series and date-range filtering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar. Only the close is guaranteed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    /// A bar carrying only a close, as used by fixtures and sparse responses.
    pub fn close_only(date: NaiveDate, close: f64) -> Self {
        PriceBar {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Daily bars ordered by ascending date with no duplicate dates. Only
/// `from_bars` builds one, so the ordering always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series from bars in any order. On duplicate dates the bar
    /// appearing last in the input wins.
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Self {
        // Stable sort, so input order is kept among equal dates.
        bars.sort_by_key(|bar| bar.date);

        let mut unique: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match unique.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => unique.push(bar),
            }
        }

        PriceSeries { bars: unique }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Bars with `start <= date <= end`. A reversed range yields an empty series.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        if start > end {
            return PriceSeries::default();
        }

        let lower = self.bars.partition_point(|bar| bar.date < start);
        let upper = self.bars.partition_point(|bar| bar.date <= end);

        PriceSeries {
            bars: self.bars[lower..upper].to_vec(),
        }
    }

    /// Close of the chronologically last bar, `None` only for an empty series.
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|bar| bar.date)
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }
}
