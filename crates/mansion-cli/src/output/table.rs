use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::SCHEDULE_COLUMNS;

/// Format output as tables using the tabled crate.
///
/// A simulation envelope renders as a KPI table followed by the year-by-year
/// schedule; listings and other arrays render as rows; everything else falls
/// back to a two-column field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_rows(arr, None),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    let mut printed = false;

    if let Some(kpis) = result.get("kpis") {
        print_flat_object(kpis);
        printed = true;
    }

    if let Some(Value::Array(schedule)) = result.get("schedule") {
        if printed {
            println!();
        }
        print_rows(schedule, Some(&SCHEDULE_COLUMNS));
        printed = true;
    }

    if !printed {
        print_flat_object(result);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

/// Print an array of objects as rows. The preferred column order is used when
/// every column is present; otherwise headers come from the first object.
fn print_rows(arr: &[Value], preferred: Option<&[&str]>) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = match preferred {
        Some(cols) if cols.iter().all(|c| first.contains_key(*c)) => {
            cols.iter().map(|c| c.to_string()).collect()
        }
        _ => first.keys().cloned().collect(),
    };

    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    map.get(h.as_str())
                        .map(format_value)
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
