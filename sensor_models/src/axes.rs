//! Sample axes: sample index → time (µs) or range (m).
//!
//! # Axes supported
//! - **Time**: tᵢ = i / fs · 1e6, used for the transmit and receive plots
//! - **Range**: rᵢ = (i / fs) · c / 2, used for the compressed envelope

use crate::radar::SimConfig;
use serde::{Deserialize, Serialize};

/// Maps a sample index to a physical coordinate.
pub trait SampleAxis {
    /// Coordinate of sample `index`
    fn value_at(&self, index: usize) -> f64;

    /// The first `len` coordinates
    fn build(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.value_at(i)).collect()
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Sample time in microseconds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimeAxisUs {
    pub sampling_rate: f64,
}

impl SampleAxis for TimeAxisUs {
    fn value_at(&self, index: usize) -> f64 {
        index as f64 / self.sampling_rate * 1e6
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Round-trip sample delay expressed as one-way range in meters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RangeAxisM {
    pub sampling_rate: f64,
    pub speed_of_light: f64,
}

impl SampleAxis for RangeAxisM {
    fn value_at(&self, index: usize) -> f64 {
        let time_s = index as f64 / self.sampling_rate;
        time_s * self.speed_of_light / 2.0
    }
}

// ---------------------------------------------------------------------------
// The three plot axes
// ---------------------------------------------------------------------------

/// Axes handed to the presentation layer alongside the sample vectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalAxes {
    /// Parallels the transmit pulse (length P)
    pub time_tx_us: Vec<f64>,
    /// Parallels the receive vector (length R)
    pub time_rx_us: Vec<f64>,
    /// Parallels the first R compressed bins
    pub range_m: Vec<f64>,
}

impl SignalAxes {
    pub fn from_config(config: &SimConfig) -> Self {
        let time = TimeAxisUs {
            sampling_rate: config.sampling_rate,
        };
        let range = RangeAxisM {
            sampling_rate: config.sampling_rate,
            speed_of_light: config.speed_of_light,
        };
        let rx_len = config.rx_samples();
        Self {
            time_tx_us: time.build(config.pulse_samples()),
            time_rx_us: time.build(rx_len),
            range_m: range.build(rx_len),
        }
    }
}
