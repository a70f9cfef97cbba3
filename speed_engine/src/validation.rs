//! Payload validation for speed calculation requests.
//!
//! The validator is deliberately lenient about filler entries in the incline array: JSON producers that leave
//! trailing commas behind tend to emit `null` (or sometimes an empty string) in their place, and those entries are
//! silently dropped rather than rejected. Everything else is strict.

use log::trace;
use serde_json::Value;

use crate::{errors::ValidationError, speed_objects::SpeedRequest};

/// Terrain grades at or beyond vertical are outside the supported domain.
pub const MAX_INCLINE_DEGREES: f64 = 90.0;

/// Transforms an untrusted JSON payload into a well-formed [`SpeedRequest`], or fails with the first constraint
/// violation found. Pure function of its input; no side effects.
pub fn validate_speed_request(body: &Value) -> Result<SpeedRequest, ValidationError> {
    let initial_speed = body
        .get("initialSpeed")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or(ValidationError::InvalidInitialSpeed)?;
    let entries = body.get("inclines").and_then(Value::as_array).ok_or(ValidationError::InclinesNotAnArray)?;
    let mut inclines = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if is_filler(entry) {
            trace!("Dropping filler incline entry at index {index}");
            continue;
        }
        let incline = entry
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::InvalidIncline { index, value: entry.to_string() })?;
        if incline.abs() >= MAX_INCLINE_DEGREES {
            return Err(ValidationError::InclineTooSteep { index, value: incline });
        }
        inclines.push(incline);
    }
    Ok(SpeedRequest { initial_speed, inclines })
}

// Trailing-comma artifacts from lenient JSON producers.
fn is_filler(entry: &Value) -> bool {
    match entry {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
