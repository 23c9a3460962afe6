use bson::Bson;

/// Reads a client epoch-milliseconds value. Numbers are taken as-is, strings
/// are parsed from their leading numeric prefix, anything else counts as 0.
pub fn bson_to_millis(value: &Bson) -> f64 {
    match value {
        Bson::Int32(i) => f64::from(*i),
        #[allow(clippy::cast_precision_loss)]
        Bson::Int64(i) => *i as f64,
        Bson::Double(f) => *f,
        Bson::String(s) => leading_float(s),
        _ => 0.0,
    }
}

/// Parses the longest numeric prefix of `s`, or 0 when there is none.
pub fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let prefix_len = s
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E') || (i == 0 && matches!(c, '+' | '-')))
        .count();
    (1..=prefix_len)
        .rev()
        .find_map(|len| s[..len].parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
