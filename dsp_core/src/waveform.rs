//! LFM chirp synthesis.
//!
//! ## Waveform
//! τ = P / fs, k = B / τ
//! w[i] = sin(2π · (f0·t + ½·k·t²)),  t = i / fs
//!
//! The instantaneous frequency f(t) = f0 + k·t sweeps linearly from f0 at
//! t = 0 to f0 + B at t = τ. The pulse envelope is rectangular.

use crate::error::{ensure_finite, ensure_positive, DspError, DspResult};
use std::f64::consts::TAU;

/// Generate a real-valued linear-FM pulse of `samples` samples.
pub fn generate_chirp(
    samples: usize,
    sampling_rate: f64,
    carrier_freq: f64,
    bandwidth: f64,
) -> DspResult<Vec<f64>> {
    if samples == 0 {
        return Err(DspError::invalid("pulse_samples", "must be >= 1"));
    }
    ensure_positive("sampling_rate", sampling_rate)?;
    ensure_finite("carrier_freq", carrier_freq)?;
    ensure_finite("chirp_bandwidth", bandwidth)?;

    let tau = samples as f64 / sampling_rate;
    let k = chirp_rate(bandwidth, tau);

    let waveform = (0..samples)
        .map(|i| {
            let t = i as f64 / sampling_rate;
            let phase = TAU * (carrier_freq * t + 0.5 * k * t * t);
            phase.sin()
        })
        .collect();
    Ok(waveform)
}

/// Chirp rate k = B / τ in Hz per second.
pub fn chirp_rate(bandwidth: f64, pulse_duration: f64) -> f64 {
    bandwidth / pulse_duration
}

/// Analytic instantaneous frequency f(t) = f0 + k·t (Hz).
pub fn instantaneous_frequency(t: f64, carrier_freq: f64, bandwidth: f64, pulse_duration: f64) -> f64 {
    carrier_freq + chirp_rate(bandwidth, pulse_duration) * t
}

/// Pulse energy Σ w[i]², the ideal compressed peak for a unit reflector.
pub fn energy(waveform: &[f64]) -> f64 {
    waveform.iter().map(|w| w * w).sum()
}
