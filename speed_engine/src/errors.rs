use thiserror::Error;

/// Validation failures for speed calculation payloads.
///
/// Every variant is client-correctable: the message identifies the violated constraint and, where applicable, the
/// offending array index and value. Indices always refer to positions in the array as the client sent it, before
/// any null entries are dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Initial speed must be a non-negative number")]
    InvalidInitialSpeed,
    #[error("Inclines must be an array")]
    InclinesNotAnArray,
    #[error("Incline at index {index} is not a number: {value}")]
    InvalidIncline { index: usize, value: String },
    #[error("Incline at index {index} is too steep: {value} degrees. Terrain grades must be less than 90 degrees")]
    InclineTooSteep { index: usize, value: f64 },
}
