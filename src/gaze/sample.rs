//! Gaze Sample Parsing
//!
//! Defines the validated gaze snapshot and the parser that produces it from
//! the raw bytes of the shared file.

use std::time::Instant;

/// Errors produced while parsing a gaze snapshot
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The bytes are not a well-formed JSON object
    #[error("malformed gaze record: {0}")]
    Malformed(String),

    /// A required field is absent or not a number
    #[error("missing or non-numeric field `{0}`")]
    MissingField(&'static str),

    /// A coordinate falls outside the normalized range
    #[error("field `{field}` out of range: {value} (expected 0.0..=1.0)")]
    OutOfRange { field: &'static str, value: f64 },
}

/// A single validated gaze coordinate snapshot
///
/// Coordinates are screen-relative and normalized to `[0.0, 1.0]`.
/// Out-of-range values are rejected at parse time, never clamped, so a
/// sample that exists is always safe to act on. Samples are immutable;
/// a new read produces a new sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    /// Horizontal gaze position, 0.0 = left edge, 1.0 = right edge
    pub x: f64,
    /// Vertical gaze position, 0.0 = top edge, 1.0 = bottom edge
    pub y: f64,
    /// When this snapshot was read from the shared file
    pub read_at: Instant,
    /// Producer-side timestamp (seconds, producer clock), when present.
    /// Carried for observability only; ticks never gate on it because the
    /// producer and consumer clocks are not comparable.
    pub produced_at: Option<f64>,
}

/// Parse and validate one gaze snapshot from raw file bytes.
///
/// Expects a JSON object with numeric `gaze_x` and `gaze_y` fields in
/// `[0.0, 1.0]`. Extra fields written by the producer (`center_x`,
/// `center_y`, ...) are tolerated; an optional `timestamp` is carried into
/// the sample. Pure function, no side effects.
pub fn parse_sample(bytes: &[u8]) -> Result<GazeSample, ParseError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ParseError::Malformed(e.to_string()))?;

    let x = numeric_field(&value, "gaze_x")?;
    let y = numeric_field(&value, "gaze_y")?;
    let produced_at = value.get("timestamp").and_then(serde_json::Value::as_f64);

    Ok(GazeSample {
        x,
        y,
        read_at: Instant::now(),
        produced_at,
    })
}

/// Extract a required numeric field and check the normalized range.
/// NaN and infinities fail the range check and are rejected like any other
/// out-of-range value.
fn numeric_field(value: &serde_json::Value, field: &'static str) -> Result<f64, ParseError> {
    let v = value
        .get(field)
        .and_then(serde_json::Value::as_f64)
        .ok_or(ParseError::MissingField(field))?;

    if !(0.0..=1.0).contains(&v) {
        return Err(ParseError::OutOfRange { field, value: v });
    }

    Ok(v)
}
