pub mod csv_out;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Fields holding rates or fractions rather than money.
const RATE_MARKERS: [&str; 4] = ["rate", "fraction", "threshold", "debt_to_income"];

/// Render a scalar for human-facing formats.
///
/// Engine values carry full decimal precision; they are only rounded here,
/// at presentation time: money to cents, rates to four places.
pub fn display_scalar(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => round_for_key(key, d).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| display_scalar(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn round_for_key(key: &str, d: Decimal) -> Decimal {
    let dp = if RATE_MARKERS.iter().any(|m| key.contains(m)) {
        4
    } else {
        2
    };
    d.round_dp(dp)
}
