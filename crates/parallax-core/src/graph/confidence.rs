use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Confidence score clamped to [0.0, 1.0].
/// Represents how strongly the system believes a node or relation holds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Mastery threshold — learner nodes above this render as MASTERED.
    pub const MASTERED: f64 = 0.8;
    /// Critical-gap threshold — baseline-only edges at or above this are
    /// classified GAP_CRITICAL.
    pub const GAP_CRITICAL: f64 = 0.8;
    /// Plausible-discovery floor for learner-only edges.
    pub const DISCOVERY_FLOOR: f64 = 0.6;
    /// Likely-error ceiling for learner-only edges.
    pub const ERROR_CEILING: f64 = 0.5;
    /// Confidence assigned to doubt markers and registry candidates.
    pub const TENTATIVE: f64 = 0.3;

    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Check if confidence is above the mastery threshold.
    pub fn is_mastered(self) -> bool {
        self.0 > Self::MASTERED
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl Add for Confidence {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Confidence {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for Confidence {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}
