//! Lenient deserializers for model-authored JSON.
//!
//! The payload inside a reply is written by a language model, not by the API, so
//! numbers sometimes arrive as strings and lists sometimes arrive as `null` or
//! as a single bare string.

/// Optional `f64` that also accepts numeric strings.
///
/// Strings that do not parse as a number (for example `"unknown"`) become `None`
/// instead of failing the whole payload.
pub(crate) mod lenient_f64 {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_leading_number(&s),
            _ => None,
        })
    }

    /// Parses the numeric prefix of strings such as `"31"`, `"31.5°C"` or `"70%"`.
    fn parse_leading_number(s: &str) -> Option<f64> {
        let s = s.trim();
        let end = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
            .map_or(s.len(), |(i, _)| i);
        s[..end].parse().ok()
    }
}

/// Optional free text that also accepts numbers and booleans.
///
/// Blank strings, objects and arrays become `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde_json::Value;
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// List of strings that tolerates a bare scalar or stray elements.
///
/// A single string becomes a one-element list; `null`, blank strings, objects
/// and nested arrays are skipped.
pub(crate) fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde_json::Value;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar).collect(),
        Some(value) => scalar(value).into_iter().collect(),
        None => Vec::new(),
    })
}
