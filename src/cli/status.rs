use super::ui;
use crate::core::freshness::{FreshnessValidator, NEVER_UPDATED};
use crate::core::repository::CurrencyStore;
use crate::core::request_state::RequestState;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Describes the cached rates without touching the network.
pub async fn status_report(store: Arc<dyn CurrencyStore>) -> String {
    let validator = FreshnessValidator::new(Arc::clone(&store));
    let status = validator.rate_status().await;
    let last_updated = store.get_last_updated_time().await;
    let cached = store.read_currency_data().await;

    let last_updated_text = if last_updated == NEVER_UPDATED {
        "never".to_string()
    } else {
        DateTime::from_timestamp_millis(last_updated).map_or_else(
            || "unknown".to_string(),
            |dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M %Z")
                    .to_string()
            },
        )
    };

    let mut output = format!("{}\n\n", ui::status_header(status));
    output.push_str(&format!(
        "{} {}\n",
        ui::style_text("Last updated:", ui::StyleType::Label),
        last_updated_text
    ));
    output.push_str(&format!(
        "{} {}",
        ui::style_text("Cached currencies:", ui::StyleType::Label),
        ui::format_request_state(&cached, |c| c.len().to_string())
    ));
    if let RequestState::Success(currencies) = &cached {
        if currencies.is_empty() {
            output.push_str(&format!(
                "\n{}",
                ui::style_text("No rates cached yet", ui::StyleType::Subtle)
            ));
        }
    }
    output
}

pub async fn run(store: Arc<dyn CurrencyStore>) -> anyhow::Result<()> {
    println!("{}", status_report(store).await);
    Ok(())
}
