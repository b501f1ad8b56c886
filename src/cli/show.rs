use super::ui;
use crate::core::CurrencyCatalog;
use crate::dashboard::{Dashboard, DashboardUpdate, Selection};
use anyhow::Result;
use comfy_table::Cell;

impl DashboardUpdate {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Data"),
            ui::header_cell("Abertura"),
            ui::header_cell("Máxima"),
            ui::header_cell("Mínima"),
            ui::header_cell("Fechamento"),
        ]);

        for bar in self.rows.bars() {
            table.add_row(vec![
                Cell::new(bar.date.format("%Y-%m-%d")),
                ui::optional_price_cell(bar.open),
                ui::optional_price_cell(bar.high),
                ui::optional_price_cell(bar.low),
                ui::price_cell(bar.close),
            ]);
        }

        let status_style = if self.rows.is_empty() {
            ui::StyleType::Error
        } else {
            ui::StyleType::Value
        };

        let mut output = format!(
            "{}\n\n",
            ui::style_text(&self.figure.layout.title.text, ui::StyleType::Title)
        );
        if !self.rows.is_empty() {
            output.push_str(&table.to_string());
            output.push_str("\n\n");
        }
        output.push_str(&ui::style_text(&self.status, status_style));
        output
    }
}

/// Runs one update cycle and prints the filtered rows with the status line.
pub async fn run(dashboard: &Dashboard, selection: &Selection) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching {}", selection.currency));
    let result = dashboard.update(selection).await;
    spinner.finish_and_clear();

    println!("{}", result?.display_as_table());
    Ok(())
}

/// Prints the supported currencies and their provider symbols.
pub fn list_currencies(catalog: &CurrencyCatalog) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Moeda"), ui::header_cell("Símbolo")]);
    for (name, symbol) in catalog.entries() {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(ui::style_text(symbol, ui::StyleType::Subtle)),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use crate::core::{PriceBar, PriceSeries};
    use crate::dashboard::{chart, status_text};
    use chrono::NaiveDate;

    use super::*;

    fn update_for(rows: PriceSeries) -> DashboardUpdate {
        DashboardUpdate {
            figure: chart::daily_close_chart("Euro (EUR/BRL)", &rows),
            status: status_text(rows.latest_close()),
            rows,
        }
    }

    #[test]
    fn test_display_lists_rows_and_status() {
        let rows = PriceSeries::from_bars(vec![
            PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                open: Some(5.35),
                high: None,
                low: Some(5.33),
                close: 5.3812,
                volume: Some(0),
            },
            PriceBar::close_only(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 5.4321),
        ]);

        let output = console::strip_ansi_codes(&update_for(rows).display_as_table()).to_string();
        assert!(output.contains("Euro (EUR/BRL) - Fechamento Diário"));
        assert!(output.contains("2024-03-04"));
        assert!(output.contains("5.38"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Valor mais recente no período selecionado: R$ 5.43"));
    }

    #[test]
    fn test_display_without_rows_shows_no_data() {
        let output =
            console::strip_ansi_codes(&update_for(PriceSeries::default()).display_as_table())
                .to_string();
        assert!(!output.contains("Abertura"));
        assert!(output.contains("Nenhum dado disponível"));
    }
}
