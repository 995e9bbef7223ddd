use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_scalar;

/// Format output as tables using the tabled crate.
///
/// Scalars go into one Field/Value table; nested objects (snapshot, summary)
/// and record arrays (schedule, cumulative, layers) get their own titled table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_object(map),
        },
        Value::Array(arr) => print_records(arr),
        _ => println!("{}", display_scalar("", value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        Value::Array(arr) => print_records(arr),
        other => println!("{}", display_scalar("result", other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Value)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(_) => nested.push((key, val)),
            Value::Array(items) if items.iter().any(Value::is_object) => nested.push((key, val)),
            _ => builder.push_record([key.as_str(), &display_scalar(key, val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, val) in nested {
        println!("\n{}:", key);
        match val {
            Value::Object(inner) => print_object(inner),
            Value::Array(arr) => print_records(arr),
            _ => {}
        }
    }
}

fn print_records(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            println!("(empty)");
        }
        for item in arr {
            println!("{}", display_scalar("", item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());

    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(|v| display_scalar(h, v)).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }

    println!("{}", Table::from(builder));
}
