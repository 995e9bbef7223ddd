use serde_json::Value;

use super::display_scalar;

/// Headline fields, most useful first.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment_with_pmi",
    "monthly_payment",
    "lifetime_total",
    "total_paid",
    "month",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in priority order, then falls back to
/// the first field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return display_scalar("", result_obj);
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return display_scalar(key, val);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, display_scalar(key, val)),
        None => String::new(),
    }
}
