//! Detection metrics accumulated over a run: hit rate, range RMSE, mean SNR.

use crate::detection::Detection;
use serde::{Deserialize, Serialize};

/// Accumulated statistics over many compressed frames.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompressionMetrics {
    /// Number of frames evaluated
    pub n_frames: u64,
    /// Frames whose peak fell within ±`tolerance_bins` of the expected bin
    pub hits: u64,
    /// Frames with an expected echo but the peak elsewhere
    pub misses: u64,
    /// Frames where no echo was expected (target outside the window)
    pub no_echo_frames: u64,
    /// Sum of squared range errors over hits (m²)
    pub sum_sq_range_err: f64,
    /// Sum of finite SNR values (dB)
    pub sum_snr_db: f64,
    /// Number of frames contributing to `sum_snr_db`
    pub n_snr: u64,
    /// Largest SNR seen, ignoring non-finite values
    pub max_snr_db: Option<f64>,
}

impl CompressionMetrics {
    /// Accumulate one frame.
    ///
    /// `expected_bin` is `None` when the echo falls outside the receive window.
    pub fn accumulate(
        &mut self,
        detection: &Detection,
        expected_bin: Option<usize>,
        expected_range_m: f64,
        tolerance_bins: usize,
    ) {
        self.n_frames += 1;

        match expected_bin {
            Some(bin) => {
                if detection.peak.index.abs_diff(bin) <= tolerance_bins {
                    self.hits += 1;
                    let err = detection.range_m - expected_range_m;
                    self.sum_sq_range_err += err * err;
                } else {
                    self.misses += 1;
                }
            }
            None => self.no_echo_frames += 1,
        }

        if detection.snr_db.is_finite() {
            self.sum_snr_db += detection.snr_db;
            self.n_snr += 1;
            self.max_snr_db = Some(
                self.max_snr_db
                    .map_or(detection.snr_db, |m| m.max(detection.snr_db)),
            );
        }
    }

    /// Fraction of echo-bearing frames detected at the right bin.
    pub fn hit_rate(&self) -> f64 {
        let denom = (self.hits + self.misses) as f64;
        if denom == 0.0 { 1.0 } else { self.hits as f64 / denom }
    }

    /// Root-mean-square range error over hits (meters).
    pub fn rmse_range_m(&self) -> f64 {
        if self.hits == 0 {
            return 0.0;
        }
        (self.sum_sq_range_err / self.hits as f64).sqrt()
    }

    /// Mean of the finite SNR values (dB).
    pub fn mean_snr_db(&self) -> Option<f64> {
        if self.n_snr == 0 {
            None
        } else {
            Some(self.sum_snr_db / self.n_snr as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Peak;

    fn det(index: usize, snr_db: f64) -> Detection {
        Detection {
            peak: Peak { index, magnitude: 1.0 },
            range_m: index as f64 * 15.0,
            noise_floor: 0.1,
            snr_db,
        }
    }

    #[test]
    fn hits_and_misses() {
        let mut m = CompressionMetrics::default();
        m.accumulate(&det(100, 40.0), Some(100), 1500.0, 1);
        m.accumulate(&det(101, 30.0), Some(100), 1500.0, 1);
        m.accumulate(&det(300, 5.0), Some(100), 1500.0, 1);
        m.accumulate(&det(7, f64::INFINITY), None, 12_000.0, 1);

        assert_eq!(m.n_frames, 4);
        assert_eq!(m.hits, 2);
        assert_eq!(m.misses, 1);
        assert_eq!(m.no_echo_frames, 1);
        assert!((m.hit_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.rmse_range_m() - (225.0f64 / 2.0).sqrt()).abs() < 1e-9);
        assert_eq!(m.n_snr, 3);
        assert_eq!(m.max_snr_db, Some(40.0));
        assert!((m.mean_snr_db().unwrap() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn empty_metrics_are_neutral() {
        let m = CompressionMetrics::default();
        assert_eq!(m.hit_rate(), 1.0);
        assert_eq!(m.rmse_range_m(), 0.0);
        assert!(m.mean_snr_db().is_none());
    }
}
