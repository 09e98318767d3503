use crate::core::freshness::RateStatus;
use crate::core::request_state::RequestState;
use chrono::Local;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Renders a request state as plain text; only `Success` uses `on_success`.
pub fn format_request_state<T>(state: &RequestState<T>, on_success: impl Fn(&T) -> String) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Loading => "Loading...".to_string(),
        RequestState::Error(message) => message.clone(),
        RequestState::Success(data) => on_success(data),
    }
}

/// Cell for a request state, red when it holds an error.
pub fn request_state_cell<T>(state: &RequestState<T>, on_success: impl Fn(&T) -> String) -> Cell {
    let cell = Cell::new(format_request_state(state, on_success)).set_alignment(CellAlignment::Right);
    match state {
        RequestState::Error(_) => cell.fg(Color::Red),
        RequestState::Success(_) => cell.add_attribute(Attribute::Bold),
        RequestState::Idle | RequestState::Loading => cell.fg(Color::DarkGrey),
    }
}

pub fn rate_status_text(status: RateStatus) -> String {
    let styled = match status {
        RateStatus::Idle => style(status.title()).white(),
        RateStatus::Fresh => style(status.title()).green(),
        RateStatus::Stale => style(status.title()).yellow(),
    };
    styled.to_string()
}

pub fn display_current_date_time() -> String {
    Local::now().format("%e %B, %Y").to_string().trim().to_string()
}

/// Header line shown above every command's output.
pub fn status_header(status: RateStatus) -> String {
    let mut header = format!(
        "{}  {}",
        style_text(&display_current_date_time(), StyleType::Label),
        rate_status_text(status)
    );
    if status == RateStatus::Stale {
        header.push_str(&format!(
            "  {}",
            style_text("(run `currex refresh` to update)", StyleType::Subtle)
        ));
    }
    header
}

/// Creates a spinner shown while rates are being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_request_state() {
        let format = |v: &f64| format!("{v:.2}");
        assert_eq!(format_request_state(&RequestState::<f64>::Idle, format), "");
        assert_eq!(
            format_request_state(&RequestState::<f64>::Loading, format),
            "Loading..."
        );
        assert_eq!(
            format_request_state(&RequestState::<f64>::Error("boom".to_string()), format),
            "boom"
        );
        assert_eq!(format_request_state(&RequestState::Success(1.5), format), "1.50");
    }

    #[test]
    fn test_status_header_mentions_refresh_only_when_stale() {
        console::set_colors_enabled(false);
        assert!(status_header(RateStatus::Stale).contains("currex refresh"));
        assert!(!status_header(RateStatus::Fresh).contains("currex refresh"));
        assert!(status_header(RateStatus::Fresh).contains("Fresh rates"));
    }
}
