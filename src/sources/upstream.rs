//! Tolerant field extraction for loosely-shaped upstream responses.
//!
//! Providers rename and nest fields freely between API versions; the
//! normalizers scan a list of candidate paths and fall back to a named
//! default so downstream engines always see a well-formed shape.

use serde_json::Value;

/// Look up a value by trying each candidate path in order. A path segment
/// separated by '.' descends into nested objects.
pub(crate) fn lookup<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    for path in paths {
        let mut current = value;
        let mut found = true;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            return Some(current);
        }
    }
    None
}

/// Extract a float, accepting numbers and numeric strings.
pub(crate) fn f64_field(value: &Value, paths: &[&str], default: f64) -> f64 {
    lookup(value, paths)
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or(default)
}

/// Extract a string field.
pub(crate) fn str_field(value: &Value, paths: &[&str], default: &str) -> String {
    lookup(value, paths)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// Extract an array field, empty when absent.
pub(crate) fn array_field<'a>(value: &'a Value, paths: &[&str]) -> &'a [Value] {
    lookup(value, paths)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_descends_nested_paths() {
        let value = json!({"main": {"temp": 31.5}});
        assert_eq!(f64_field(&value, &["temperature", "main.temp"], 0.0), 31.5);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let value = json!({"humidity": "72"});
        assert_eq!(f64_field(&value, &["humidity"], 0.0), 72.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_default() {
        let value = json!({});
        assert_eq!(f64_field(&value, &["wind_speed"], 8.0), 8.0);
        assert_eq!(str_field(&value, &["condition"], "clear"), "clear");
        assert!(array_field(&value, &["forecast"]).is_empty());
    }
}
