//! The speed calculation itself: a single left-to-right pass over the incline sequence.

use gsc_common::Speed;

use crate::speed_objects::{SpeedRequest, SpeedResult};

/// Computes the final speed for a validated [`SpeedRequest`].
///
/// Uphill grades (positive inclines) slow the character down by the grade; downhill grades speed it up by the
/// grade's magnitude; flat segments leave the speed unchanged. The result is floored at zero and rounded to one
/// decimal place.
///
/// The clamp is applied once, after the full traversal, not after each segment. A sequence that conceptually dips
/// below zero mid-way and rebounds (e.g. a steep climb followed by a long descent) keeps the interim deficit.
pub fn calculate_final_speed(request: &SpeedRequest) -> SpeedResult {
    let mut current = Speed::from(request.initial_speed);
    for &incline in &request.inclines {
        if incline > 0.0 {
            current = current - Speed::from(incline);
        } else if incline < 0.0 {
            current = current + Speed::from(incline.abs());
        }
        // incline == 0: no change on flat terrain
    }
    SpeedResult { final_speed: current.clamped().rounded() }
}
