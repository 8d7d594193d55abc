//! Peak picking on a compressed envelope.
//!
//! A single arg-max over the plotted range window, with the window median as
//! the noise-floor reference. There is no adaptive thresholding here.

use serde::{Deserialize, Serialize};

/// Largest bin of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Bin index (lag in samples)
    pub index: usize,
    pub magnitude: f64,
}

/// Peak plus its range and its height above the median floor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub peak: Peak,
    /// Range of the peak bin (meters)
    pub range_m: f64,
    /// Median magnitude over the search window
    pub noise_floor: f64,
    /// 20·log10(peak / floor); +∞ on a zero floor
    pub snr_db: f64,
}

/// Largest entry among the first `window` bins. The earliest bin wins ties.
/// Returns `None` for an empty search window.
pub fn find_peak(envelope: &[f64], window: usize) -> Option<Peak> {
    let window = window.min(envelope.len());
    envelope[..window]
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<Peak>, (index, magnitude)| match best {
            Some(b) if b.magnitude >= magnitude => Some(b),
            _ => Some(Peak { index, magnitude }),
        })
}

/// Median of a slice (mean of the two middle values for even lengths).
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Amplitude ratio in dB.
pub fn snr_db(peak: f64, floor: f64) -> f64 {
    if peak <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if floor <= 0.0 {
        return f64::INFINITY;
    }
    20.0 * (peak / floor).log10()
}

/// Detect the strongest return within the first `window` bins.
pub fn detect(envelope: &[f64], window: usize, range_bin_m: f64) -> Option<Detection> {
    let peak = find_peak(envelope, window)?;
    let window = window.min(envelope.len());
    let noise_floor = median(&envelope[..window]);
    Some(Detection {
        peak,
        range_m: peak.index as f64 * range_bin_m,
        noise_floor,
        snr_db: snr_db(peak.magnitude, noise_floor),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_within_window_only() {
        let env = [0.1, 0.5, 0.2, 9.0];
        let p = find_peak(&env, 3).unwrap();
        assert_eq!(p.index, 1);
        assert_eq!(find_peak(&env, 10).unwrap().index, 3);
        assert!(find_peak(&env, 0).is_none());
    }

    #[test]
    fn ties_resolve_to_first_bin() {
        assert_eq!(find_peak(&[0.0, 0.0, 0.0], 3).unwrap().index, 0);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn snr_edges() {
        assert!((snr_db(10.0, 1.0) - 20.0).abs() < 1e-12);
        assert_eq!(snr_db(1.0, 0.0), f64::INFINITY);
        assert_eq!(snr_db(0.0, 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn detection_reports_range() {
        let mut env = vec![1.0; 9];
        env[4] = 100.0;
        let d = detect(&env, 9, 15.0).unwrap();
        assert_eq!(d.peak.index, 4);
        assert_eq!(d.range_m, 60.0);
        assert_eq!(d.noise_floor, 1.0);
        assert!((d.snr_db - 40.0).abs() < 1e-9);
    }
}
