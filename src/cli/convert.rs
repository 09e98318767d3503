use super::ui;
use crate::converter::{Converter, ConverterEvent, ConverterState};
use crate::core::currency::CurrencyCode;
use anyhow::{Result, anyhow};
use comfy_table::Cell;

impl ConverterState {
    pub fn display_conversion(&self, converted: Option<f64>) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell("Amount"),
            ui::header_cell("Result"),
        ]);
        table.add_row(vec![
            ui::request_state_cell(&self.source, |c| c.code.to_string()),
            ui::request_state_cell(&self.target, |c| c.code.to_string()),
            Cell::new(format!("{:.2}", self.amount)),
            converted.map_or_else(
                || Cell::new("N/A"),
                |v| Cell::new(format!("{v:.2}")),
            ),
        ]);

        let mut output = format!("{}\n\n", ui::status_header(self.rate_status));
        output.push_str(&table.to_string());
        output
    }
}

pub async fn run(
    converter: &mut Converter,
    amount: f64,
    from: Option<CurrencyCode>,
    to: Option<CurrencyCode>,
) -> Result<()> {
    let pb = ui::new_spinner("Loading exchange rates...");
    let result = converter.init().await;
    pb.finish_and_clear();
    result?;

    if let Some(code) = from {
        converter.send_event(ConverterEvent::SelectSource(code)).await?;
    }
    if let Some(code) = to {
        converter.send_event(ConverterEvent::SelectTarget(code)).await?;
    }
    converter.send_event(ConverterEvent::SetAmount(amount)).await?;

    let state = converter.state();
    let converted = converter.converted_amount();
    println!("{}", state.display_conversion(converted));

    if converted.is_none() {
        let reason = state
            .last_fetch_error
            .as_deref()
            .or(state.source.error_message())
            .or(state.target.error_message())
            .unwrap_or("Rates are unavailable");
        return Err(anyhow!("Conversion failed: {}", reason));
    }
    Ok(())
}
