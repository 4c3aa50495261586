use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Success,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Success => style(text).green().bold(),
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

/// Cell for a currency code: "N/A" dimmed, "Error" red, real codes plain.
pub fn currency_code_cell(code: &str) -> Cell {
    match code {
        "N/A" => Cell::new(code).fg(Color::DarkGrey),
        "Error" => Cell::new(code).fg(Color::Red),
        _ => Cell::new(code).add_attribute(Attribute::Bold),
    }
}

/// Cell for a transaction/payment status with the usual color coding.
pub fn status_cell(status: &str) -> Cell {
    let color = match status.to_uppercase().as_str() {
        "COMPLETED" | "SUCCESS" => Color::Green,
        "PENDING" => Color::Yellow,
        "BLOCKED" | "FAILED" | "ERROR" => Color::Red,
        _ => Color::White,
    };
    Cell::new(status).fg(color)
}

/// Right-aligned amount cell.
pub fn amount_cell(amount: f64, currency: &str) -> Cell {
    Cell::new(format!("{amount:.2} {currency}")).set_alignment(CellAlignment::Right)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
