use super::ui;
use crate::converter::Converter;
use anyhow::{Result, bail};

pub async fn run(converter: &mut Converter, force: bool) -> Result<()> {
    let pb = ui::new_spinner("Refreshing exchange rates...");
    let result = converter.refresh_rates(force).await;
    pb.finish_and_clear();
    result?;

    let state = converter.state();
    println!("{}", ui::status_header(state.rate_status));
    if let Some(message) = &state.last_fetch_error {
        bail!("Failed to refresh rates: {}", message);
    }
    if state.all_currencies.is_empty() {
        bail!("Failed to refresh rates: no exchange rates available");
    }
    println!(
        "{} {}",
        ui::style_text("Cached currencies:", ui::StyleType::Label),
        state.all_currencies.len()
    );
    Ok(())
}
