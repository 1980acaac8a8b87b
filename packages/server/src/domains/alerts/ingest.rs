//! Turn raw feed payloads into alert and region rows.
//!
//! Feeds arrive either as a bare array or wrapped in an object under
//! `alerts` / `regions`. Incomplete entries are skipped, not rejected.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::models::{Alert, AlertType, Region, RegionType};

/// Source recorded when an alert entry does not name one.
pub const DEFAULT_ALERT_SOURCE: &str = "NDEM";

fn entries<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Non-empty string field. Numeric ids are accepted and stringified.
fn text(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(entry: &Value, key: &str) -> Option<f64> {
    match entry.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp(entry: &Value, now: DateTime<Utc>) -> DateTime<Utc> {
    text(entry, "timestamp")
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(now)
}

/// Alerts with an id, title, description and severity.
pub fn parse_alerts(payload: &Value, now: DateTime<Utc>) -> Vec<Alert> {
    entries(payload, "alerts")
        .iter()
        .filter_map(|entry| {
            let (Some(source_id), Some(title), Some(description), Some(severity)) = (
                text(entry, "id"),
                text(entry, "title"),
                text(entry, "description"),
                text(entry, "severity"),
            ) else {
                debug!(entry = %entry, "Skipping incomplete alert");
                return None;
            };

            let alert_type = text(entry, "type")
                .map(|t| AlertType::from_feed_label(&t))
                .unwrap_or(AlertType::News);

            Some(Alert {
                id: Uuid::now_v7(),
                source_id,
                alert_type: alert_type.to_string(),
                source: text(entry, "source").unwrap_or_else(|| DEFAULT_ALERT_SOURCE.to_string()),
                title,
                description,
                severity,
                location: text(entry, "location"),
                latitude: number(entry, "latitude"),
                longitude: number(entry, "longitude"),
                issued_at: timestamp(entry, now),
                raw_data: entry.clone(),
            })
        })
        .collect()
}

/// Regions with a name and a recognised type.
pub fn parse_regions(payload: &Value, now: DateTime<Utc>) -> Vec<Region> {
    entries(payload, "regions")
        .iter()
        .filter_map(|entry| {
            let name = text(entry, "name")?;
            let region_type: RegionType = match text(entry, "type")?.parse() {
                Ok(t) => t,
                Err(e) => {
                    debug!(name = %name, error = %e, "Skipping region");
                    return None;
                }
            };

            Some(Region {
                id: Uuid::now_v7(),
                name,
                region_type: region_type.to_string(),
                description: text(entry, "description"),
                latitude: number(entry, "latitude"),
                longitude: number(entry, "longitude"),
                observed_at: timestamp(entry, now),
                raw_data: entry.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alerts_from_wrapped_object() {
        let payload = json!({
            "alerts": [
                {"id": 17, "title": "Heavy rain", "description": "Red alert", "severity": "High",
                 "type": "IMD", "location": "East District", "latitude": "25.4", "longitude": 85.1,
                 "timestamp": "2024-07-01T06:00:00Z"},
                {"id": "x2", "title": "Missing severity", "description": "..."},
                {"id": "x3", "title": "Tremor", "description": "M4.1", "severity": "Moderate"}
            ]
        });
        let now = Utc::now();
        let alerts = parse_alerts(&payload, now);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].source_id, "17");
        assert_eq!(alerts[0].alert_type, "meteorological");
        assert_eq!(alerts[0].source, DEFAULT_ALERT_SOURCE);
        assert_eq!(alerts[0].latitude, Some(25.4));
        assert_eq!(alerts[0].issued_at.to_rfc3339(), "2024-07-01T06:00:00+00:00");
        assert_eq!(alerts[1].alert_type, "news");
        assert_eq!(alerts[1].issued_at, now);
    }

    #[test]
    fn test_alerts_from_bare_array_and_junk() {
        let payload = json!([{"id": "a", "title": "t", "description": "d", "severity": "s"}]);
        assert_eq!(parse_alerts(&payload, Utc::now()).len(), 1);
        assert!(parse_alerts(&json!("not a feed"), Utc::now()).is_empty());
        assert!(parse_alerts(&json!({"warnings": []}), Utc::now()).is_empty());
    }

    #[test]
    fn test_regions_skip_unknown_types() {
        let payload = json!({
            "regions": [
                {"name": "Coast A", "type": "WAVE"},
                {"name": "Valley B", "type": "lava"},
                {"type": "flood"}
            ]
        });
        let regions = parse_regions(&payload, Utc::now());

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Coast A");
        assert_eq!(regions[0].region_type, "wave");
    }
}
