use db::models::reading::Model as Reading;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingResponse {
    pub id: i64,
    pub value: f64,
    pub timestamp: String,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            value: reading.value,
            timestamp: reading.timestamp.to_rfc3339(),
        }
    }
}

/// Body of `GET /current`: the reading itself, or `{}` when there is none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CurrentReading {
    Reading(ReadingResponse),
    Empty {},
}

impl From<Option<Reading>> for CurrentReading {
    fn from(reading: Option<Reading>) -> Self {
        match reading {
            Some(reading) => CurrentReading::Reading(reading.into()),
            None => CurrentReading::Empty {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn reading() -> Reading {
        Reading {
            id: 3,
            value: 44.0,
            timestamp: Utc.with_ymd_and_hms(2025, 12, 3, 17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn reading_response_uses_iso_timestamp() {
        let value = serde_json::to_value(ReadingResponse::from(reading())).unwrap();
        assert_eq!(
            value,
            json!({ "id": 3, "value": 44.0, "timestamp": "2025-12-03T17:00:00+00:00" })
        );
    }

    #[test]
    fn missing_current_reading_serializes_as_empty_object() {
        let value = serde_json::to_value(CurrentReading::from(None)).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn present_current_reading_is_flat() {
        let value = serde_json::to_value(CurrentReading::from(Some(reading()))).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["value"], 44.0);
    }
}
