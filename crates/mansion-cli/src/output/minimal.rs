use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: advisory text first, then the headline KPI figures, then the
/// first field of whatever object remains.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // The simulation envelope nests the KPI figures one level down.
    let target = result.get("kpis").unwrap_or(result);

    let priority_keys = [
        "advice",
        "roi",
        "net_yield",
        "surface_yield",
        "annual_cash_flow_man",
    ];

    if let Value::Object(map) = target {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(target));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
