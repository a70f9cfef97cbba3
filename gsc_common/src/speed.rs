use std::{fmt::Display, ops::{Add, Sub}};

use serde::{Deserialize, Serialize};

//--------------------------------------     Speed       -------------------------------------------------------------
/// A character speed, in game units per second.
///
/// Speeds reported by the service are always non-negative and carry one decimal place. The raw value is only
/// constrained once [`Speed::clamped`] and [`Speed::rounded`] have been applied, so intermediate arithmetic can dip
/// below zero without losing information.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speed(f64);

impl From<f64> for Speed {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Speed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Speed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Speed {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Floors the speed at zero. A character can slow to a standstill, but never move backwards.
    pub fn clamped(self) -> Self {
        Self(self.0.max(0.0))
    }

    /// Rounds the speed to one decimal place, half away from zero.
    pub fn rounded(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }
}
