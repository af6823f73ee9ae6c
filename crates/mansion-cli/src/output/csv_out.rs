use serde_json::Value;
use std::io;

use super::SCHEDULE_COLUMNS;

/// Write output as CSV to stdout.
///
/// A simulation envelope emits the schedule rows; flat objects emit
/// field/value pairs; arrays emit one row per element.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            if let Some(Value::Array(schedule)) = result.get("schedule") {
                write_schedule_csv(&mut wtr, schedule);
            } else if let Value::Object(fields) = result {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            } else {
                let _ = wtr.write_record([&format_csv_value(result)]);
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, schedule: &[Value]) {
    let _ = wtr.write_record(SCHEDULE_COLUMNS);

    for entry in schedule {
        if let Value::Object(map) = entry {
            let row: Vec<String> = SCHEDULE_COLUMNS
                .iter()
                .map(|col| {
                    map.get(*col)
                        .map(format_csv_value)
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
