use serde_json::Value;

/// Headline fields, most significant first.
const PRIORITY_KEYS: [&str; 7] = [
    "score",
    "net_profit",
    "liquidity",
    "debt_ratio",
    "net_profit_var",
    "status",
    "latest_indicators",
];

/// Print just the key answer value from the output.
///
/// Arrays print one line per element, prefixed by its period or label.
pub fn print_minimal(value: &Value) {
    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Array(items) => {
            for item in items {
                println!("{}", headline(item));
            }
        }
        other => println!("{}", headline(other)),
    }
}

fn headline(value: &Value) -> String {
    let Value::Object(map) = value else {
        return format_minimal(value);
    };

    let label = ["period", "label"]
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str));

    let key_value = PRIORITY_KEYS
        .iter()
        .find_map(|k| map.get(*k).filter(|v| !v.is_null()))
        .or_else(|| map.values().next());

    match (label, key_value) {
        (Some(label), Some(v)) => format!("{}: {}", label, format_minimal(v)),
        (None, Some(v)) => format_minimal(v),
        (_, None) => String::new(),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(headline).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
