use gsc_common::Speed;
use serde::{Deserialize, Serialize};

/// A validated speed calculation request.
///
/// Instances are only ever produced by [`validate_speed_request`][crate::validate_speed_request], so holders can rely
/// on `initial_speed` being finite and non-negative, and every incline being a finite grade with a magnitude below
/// 90 degrees. The incline order is significant: it is the order in which the terrain segments are traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedRequest {
    pub initial_speed: f64,
    pub inclines: Vec<f64>,
}

/// The outcome of a speed calculation. `final_speed` is always non-negative and rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedResult {
    pub final_speed: Speed,
}
