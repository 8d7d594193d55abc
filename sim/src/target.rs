//! Point-target model.
//!
//! A single reflector at a one-way range with a fixed reflection factor. The
//! range may drift between ticks; within a pulse the target is frozen, so no
//! Doppler shift is applied to the echo.

use serde::{Deserialize, Serialize};

/// How the target range evolves between ticks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MotionSpec {
    /// Fixed range.
    #[default]
    Stationary,
    /// Range changes by `range_rate` m/s (negative = closing).
    ConstantRangeRate { range_rate: f64 },
}

/// A simulated point reflector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointTarget {
    /// One-way range (meters)
    pub range_m: f64,
    /// Echo amplitude factor
    pub reflection: f64,
    pub motion: MotionSpec,
}

impl PointTarget {
    pub fn stationary(range_m: f64, reflection: f64) -> Self {
        Self {
            range_m,
            reflection,
            motion: MotionSpec::Stationary,
        }
    }

    /// Advance the range by `dt` seconds. Range is clamped at zero.
    pub fn step(&mut self, dt: f64) {
        match self.motion {
            MotionSpec::Stationary => {}
            MotionSpec::ConstantRangeRate { range_rate } => {
                self.range_m = (self.range_m + range_rate * dt).max(0.0);
            }
        }
    }
}
