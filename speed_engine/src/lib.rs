//! Speed calculation engine
//!
//! This library contains the core logic for the gaming speed calculator. It is transport-agnostic: nothing in here
//! knows about HTTP, authentication, or where request payloads come from.
//!
//! The library is divided into two main sections:
//! 1. Input validation ([`validate_speed_request`]). Untrusted, loosely-typed JSON payloads are turned into
//!    well-formed [`SpeedRequest`] values, or rejected with a descriptive [`ValidationError`]. The calculator's
//!    preconditions are exactly the validator's postconditions, so a validated request can always be computed.
//! 2. The calculation itself ([`calculate_final_speed`]). A single left-to-right pass over the incline sequence.
//!    It is pure, total and deterministic, and safe to call concurrently from multiple request handlers without
//!    any coordination.

mod calculator;
mod errors;
mod speed_objects;
mod validation;

pub use calculator::calculate_final_speed;
pub use errors::ValidationError;
pub use speed_objects::{SpeedRequest, SpeedResult};
pub use validation::{validate_speed_request, MAX_INCLINE_DEGREES};
