use serde_json::Value;

/// Fields that answer "what will I pay?", in order of priority.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "annual_rate_percent",
    "total_payment",
    "overpayment",
    "path",
];

/// Print just the key answer value from the output.
///
/// Arrays (schedules, program lists) print one compact line per row.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in &PRIORITY_KEYS {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }

            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(rows) => {
            for row in rows {
                println!("{}", format_row(row));
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn format_row(row: &Value) -> String {
    match row {
        Value::Object(map) => map
            .values()
            .map(format_minimal)
            .collect::<Vec<_>>()
            .join(" "),
        other => format_minimal(other),
    }
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
