use super::ui;
use crate::converter::{Converter, ConverterEvent};
use anyhow::Result;

pub async fn run(converter: &mut Converter) -> Result<()> {
    converter.init().await?;
    converter
        .send_event(ConverterEvent::SwitchCurrencies)
        .await?;

    let state = converter.state();
    let code = |c: &crate::core::Currency| c.code.to_string();
    println!(
        "{} {} -> {}",
        ui::style_text("Now converting:", ui::StyleType::Label),
        ui::format_request_state(&state.source, code),
        ui::format_request_state(&state.target, code)
    );
    Ok(())
}
