use super::ui;
use crate::converter::{Converter, ConverterState};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

impl ConverterState {
    pub fn display_rates_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Country"),
            ui::header_cell("Rate"),
            ui::header_cell("Selected"),
        ]);

        let source = self.source.success_data().map(|c| c.code);
        let target = self.target.success_data().map(|c| c.code);

        for currency in &self.all_currencies {
            let code = Some(currency.code);
            let selected = match (code == source, code == target) {
                (true, true) => "from/to",
                (true, false) => "from",
                (false, true) => "to",
                (false, false) => "",
            };
            table.add_row(vec![
                Cell::new(currency.code),
                Cell::new(currency.code.country()),
                Cell::new(format!("{:.4}", currency.value)).set_alignment(CellAlignment::Right),
                Cell::new(selected),
            ]);
        }

        let mut output = format!("{}\n\n", ui::status_header(self.rate_status));
        if self.all_currencies.is_empty() {
            output.push_str(&ui::style_text("No rates available", ui::StyleType::Error));
        } else {
            output.push_str(&table.to_string());
        }
        output
    }
}

pub async fn run(converter: &mut Converter) -> Result<()> {
    let pb = ui::new_spinner("Loading exchange rates...");
    let result = converter.init().await;
    pb.finish_and_clear();
    result?;

    println!("{}", converter.state().display_rates_table());
    if let Some(message) = &converter.state().last_fetch_error {
        eprintln!("{}", ui::style_text(message, ui::StyleType::Error));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::converter::ConverterState;
    use crate::core::currency::{Currency, CurrencyCode};
    use crate::core::freshness::RateStatus;
    use crate::core::request_state::RequestState;

    /// Text of the "Selected" column in the row for `code`.
    fn selected(output: &str, code: &str) -> String {
        let row = output
            .lines()
            .find(|line| line.contains(code))
            .unwrap_or_default();
        // Outer borders leave an empty piece at each end.
        let cells: Vec<&str> = row.split('│').map(str::trim).collect();
        assert_eq!(cells.len(), 6, "unexpected row: {row}");
        cells[4].to_string()
    }

    #[test]
    fn test_rates_table_marks_selection() {
        console::set_colors_enabled(false);
        let usd = Currency::new(CurrencyCode::USD, 1.0);
        let eur = Currency::new(CurrencyCode::EUR, 0.9312);
        let state = ConverterState {
            rate_status: RateStatus::Fresh,
            all_currencies: vec![eur, usd],
            source: RequestState::Success(usd),
            target: RequestState::Success(eur),
            ..ConverterState::default()
        };

        let output = state.display_rates_table();
        assert!(output.contains("European Union"));
        assert!(output.contains("0.9312"));
        assert_eq!(selected(&output, "USD"), "from");
        assert_eq!(selected(&output, "EUR"), "to");
    }

    #[test]
    fn test_same_source_and_target_are_both_marked() {
        console::set_colors_enabled(false);
        let usd = Currency::new(CurrencyCode::USD, 1.0);
        let eur = Currency::new(CurrencyCode::EUR, 0.9312);
        let state = ConverterState {
            rate_status: RateStatus::Fresh,
            all_currencies: vec![eur, usd],
            source: RequestState::Success(usd),
            target: RequestState::Success(usd),
            ..ConverterState::default()
        };

        let output = state.display_rates_table();
        assert_eq!(selected(&output, "USD"), "from/to");
        assert_eq!(selected(&output, "EUR"), "");
    }

    #[test]
    fn test_empty_rates() {
        console::set_colors_enabled(false);
        let output = ConverterState::default().display_rates_table();
        assert!(output.contains("No rates available"));
    }
}
