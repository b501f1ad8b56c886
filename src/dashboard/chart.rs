//! Line chart definition, serialized in the figure format plotly.js renders

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::PriceSeries;

pub const X_AXIS_TITLE: &str = "Data";
pub const Y_AXIS_TITLE: &str = "Cotação (R$)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub data: Vec<LineTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

/// Daily close line for `currency_name`. An empty series gives an empty line.
pub fn daily_close_chart(currency_name: &str, series: &PriceSeries) -> Chart {
    let trace = LineTrace {
        kind: "scatter",
        mode: "lines",
        x: series.dates().collect(),
        y: series.closes().collect(),
        hovertemplate: format!("{X_AXIS_TITLE}=%{{x|%Y-%m-%d}}<br>Fechamento=%{{y:.2f}}<extra></extra>"),
    };

    Chart {
        data: vec![trace],
        layout: Layout {
            title: Title::new(format!("{currency_name} - Fechamento Diário")),
            xaxis: Axis {
                title: Title::new(X_AXIS_TITLE),
            },
            yaxis: Axis {
                title: Title::new(Y_AXIS_TITLE),
            },
        },
    }
}

impl Chart {
    pub fn point_count(&self) -> usize {
        self.data.iter().map(|trace| trace.x.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PriceBar;

    #[test]
    fn test_chart_figure_json() {
        let series = PriceSeries::from_bars(vec![
            PriceBar::close_only(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 5.36),
            PriceBar::close_only(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 5.43),
        ]);
        let chart = daily_close_chart("Euro (EUR/BRL)", &series);
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["layout"]["title"]["text"], "Euro (EUR/BRL) - Fechamento Diário");
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "Data");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "Cotação (R$)");
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["x"][0], "2024-03-04");
        assert_eq!(json["data"][0]["y"][1], 5.43);
        assert!(
            json["data"][0]["hovertemplate"]
                .as_str()
                .unwrap()
                .contains("%{y:.2f}")
        );
        assert_eq!(chart.point_count(), 2);
    }

    #[test]
    fn test_empty_series_gives_empty_line() {
        let chart = daily_close_chart("Euro (EUR/BRL)", &PriceSeries::default());
        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.point_count(), 0);
    }
}
