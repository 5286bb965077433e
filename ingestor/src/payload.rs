use serde_json::Value;

/// Name of the JSON field carrying the moisture percentage.
pub const HUMIDITY_FIELD: &str = "humidity";

/// Why a payload was rejected.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload has no `humidity` field")]
    MissingField,

    #[error("`humidity` is not a finite number: {0}")]
    InvalidValue(String),
}

impl PayloadError {
    /// True when the bytes could not be read as a JSON document at all.
    pub fn is_decode(&self) -> bool {
        matches!(self, PayloadError::Utf8(_) | PayloadError::Json(_))
    }
}

/// Extracts the humidity value from a raw sensor payload.
///
/// The payload must be UTF-8 JSON. Anything other than an object with a
/// `humidity` member counts as a missing field. The member may be a JSON
/// number or a string holding a number (`"42.5"`); booleans, `null`, nested
/// values and non-finite numbers are rejected.
pub fn decode_humidity(payload: &[u8]) -> Result<f64, PayloadError> {
    let text = std::str::from_utf8(payload)?;
    let doc: Value = serde_json::from_str(text)?;

    let field = doc
        .as_object()
        .and_then(|obj| obj.get(HUMIDITY_FIELD))
        .ok_or(PayloadError::MissingField)?;

    let value = match field {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| PayloadError::InvalidValue(field.to_string()))
}
