use serde_json::{Map, Value};
use std::io;

use super::display_scalar;

/// Write output as CSV to stdout.
///
/// Record arrays (schedule, cumulative series) become one row per month; an
/// envelope or single record becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_fields(&mut wtr, result),
            Some(Value::Array(arr)) => write_records(&mut wtr, arr),
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_records(&mut wtr, arr),
        _ => wtr.write_record([display_scalar("", value)]),
    };

    if let Err(e) = result.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!("CSV output failed: {}", e);
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        // Nested series do not fit a field/value listing.
        if val.as_array().is_some_and(|a| a.iter().any(Value::is_object)) {
            continue;
        }
        wtr.write_record([key.as_str(), &display_scalar(key, val)])?;
    }
    Ok(())
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([display_scalar("", item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(|v| display_scalar(h, v)).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut csv::Writer<Vec<u8>>) -> csv::Result<()>) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        f(&mut wtr).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_records_one_row_per_month() {
        let rows = vec![
            json!({"month": 1, "principal": "238.918818", "interest": "1200"}),
            json!({"month": 2, "principal": "240.113412", "interest": "1198.805406"}),
        ];
        let out = render(|w| write_records(w, &rows));
        assert_eq!(
            out,
            "month,principal,interest\n1,238.92,1200\n2,240.11,1198.81\n"
        );
    }

    #[test]
    fn test_fields_skip_nested_series() {
        let map = json!({"loan_amount": "240000", "schedule": [{"month": 1}]});
        let out = render(|w| write_fields(w, map.as_object().unwrap()));
        assert_eq!(out, "field,value\nloan_amount,240000\n");
    }
}
