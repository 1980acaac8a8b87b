//! Deserializers that tolerate the loose typing of model output.
//!
//! `"25,000"`, `25000`, `25000.0` and `null` are all accepted where a count
//! is expected; numbers are accepted where a string is expected. An explicit
//! `null` anywhere falls back to the field's default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn digits_only(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// `null` becomes `T::default()`; `#[serde(default)]` alone only covers missing keys.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => digits_only(&s).unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if n.is_finite() && n > 0.0 { n.round() as u64 } else { 0 })
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

pub fn optional_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::count")]
        population: u64,
        #[serde(default, deserialize_with = "super::optional_float")]
        severity: Option<f64>,
        #[serde(default, deserialize_with = "super::string")]
        id: String,
        #[serde(default, deserialize_with = "super::or_default")]
        tags: Vec<String>,
    }

    fn fields(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_count_accepts_loose_forms() {
        assert_eq!(fields(r#"{"population": "25,000"}"#).population, 25_000);
        assert_eq!(fields(r#"{"population": 1200.4}"#).population, 1200);
        assert_eq!(fields(r#"{"population": null}"#).population, 0);
        assert_eq!(fields(r#"{"population": -5}"#).population, 0);
        assert_eq!(fields("{}").population, 0);
    }

    #[test]
    fn test_optional_float() {
        assert_eq!(fields(r#"{"severity": "7.5"}"#).severity, Some(7.5));
        assert_eq!(fields(r#"{"severity": "high"}"#).severity, None);
        assert_eq!(fields("{}").severity, None);
    }

    #[test]
    fn test_string_from_number() {
        assert_eq!(fields(r#"{"id": 42}"#).id, "42");
    }

    #[test]
    fn test_null_falls_back_to_default() {
        assert!(fields(r#"{"tags": null}"#).tags.is_empty());
        assert_eq!(fields(r#"{"tags": ["a"]}"#).tags, vec!["a"]);
        assert_eq!(fields(r#"{"id": null}"#).id, "");
    }
}
