//! Radar and scene parameters, plus the geometry that ties time to range.

use dsp_core::error::{ensure_finite, ensure_non_negative, ensure_positive, DspError, DspResult};
use serde::{Deserialize, Serialize};

/// Receive window length as a multiple of the pulse length (R = 4·P).
pub const RX_WINDOW_FACTOR: usize = 4;

/// Suspicious but runnable settings, reported by [`SimConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigWarning {
    /// Reflection outside (0, 1]
    ReflectionOutOfRange { reflection: f64 },
    /// f0 + B at or above fs / 2: the chirp aliases
    NyquistViolation { top_freq_hz: f64, nyquist_hz: f64 },
}

/// Physical configuration of the simulated radar and its single target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// ADC sampling rate (Hz)
    pub sampling_rate: f64,
    /// Transmit pulse width (seconds)
    pub pulse_width: f64,
    /// Chirp start frequency (Hz)
    pub carrier_freq: f64,
    /// Chirp sweep bandwidth (Hz)
    pub chirp_bandwidth: f64,
    /// Propagation speed (m/s)
    pub speed_of_light: f64,
    /// One-way distance to the target (meters)
    pub target_range: f64,
    /// Echo amplitude factor, nominally in (0, 1]
    pub target_reflection: f64,
    /// Receiver noise standard deviation (amplitude units)
    pub noise_std: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 10e6,   // 10 MHz
            pulse_width: 20e-6,    // 20 µs
            carrier_freq: 1e6,     // 1 MHz
            chirp_bandwidth: 2e6,  // 2 MHz sweep
            speed_of_light: 3e8,
            target_range: 1500.0,  // 1.5 km
            target_reflection: 0.8,
            noise_std: 0.1,
        }
    }
}

impl SimConfig {
    /// P = ⌊pulse_width · sampling_rate⌋
    pub fn pulse_samples(&self) -> usize {
        (self.pulse_width * self.sampling_rate).floor() as usize
    }

    /// R = 4·P
    pub fn rx_samples(&self) -> usize {
        self.pulse_samples() * RX_WINDOW_FACTOR
    }

    /// Pulse duration actually synthesized, P / fs (seconds).
    pub fn pulse_duration(&self) -> f64 {
        self.pulse_samples() as f64 / self.sampling_rate
    }

    /// Range spanned by one sample, c / (2·fs) (meters).
    pub fn range_bin_m(&self) -> f64 {
        range_bin_m(self.sampling_rate, self.speed_of_light)
    }

    /// Ideal chirp range resolution, c / (2·B) (meters).
    pub fn range_resolution_m(&self) -> f64 {
        self.speed_of_light / (2.0 * self.chirp_bandwidth)
    }

    /// Round-trip delay of the configured target in whole samples.
    pub fn delay_samples(&self) -> usize {
        delay_samples(self.target_range, self.speed_of_light, self.sampling_rate)
    }

    /// Highest swept frequency stays below fs / 2.
    pub fn satisfies_nyquist(&self) -> bool {
        self.carrier_freq + self.chirp_bandwidth < self.sampling_rate / 2.0
    }

    /// Check every parameter. Nyquist violations only warn: the chirp aliases
    /// but the pipeline still runs.
    pub fn validate(&self) -> DspResult<()> {
        ensure_positive("sampling_rate", self.sampling_rate)?;
        ensure_positive("pulse_width", self.pulse_width)?;
        ensure_finite("carrier_freq", self.carrier_freq)?;
        ensure_positive("chirp_bandwidth", self.chirp_bandwidth)?;
        ensure_positive("speed_of_light", self.speed_of_light)?;
        ensure_non_negative("target_range", self.target_range)?;
        ensure_finite("target_reflection", self.target_reflection)?;
        ensure_non_negative("noise_std", self.noise_std)?;

        if self.pulse_samples() == 0 {
            return Err(DspError::InvalidConfig {
                field: "pulse_width",
                reason: format!(
                    "{} s at {} Hz yields no samples",
                    self.pulse_width, self.sampling_rate
                ),
            });
        }

        for warning in self.warnings() {
            match warning {
                ConfigWarning::ReflectionOutOfRange { reflection } => {
                    tracing::warn!(reflection, "target reflection outside (0, 1]")
                }
                ConfigWarning::NyquistViolation {
                    top_freq_hz,
                    nyquist_hz,
                } => tracing::warn!(
                    top_freq_hz,
                    nyquist_hz,
                    "chirp exceeds Nyquist; transmit pulse will alias"
                ),
            }
        }
        Ok(())
    }

    /// Settings that run but deserve a warning.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut out = Vec::new();
        if !(self.target_reflection > 0.0 && self.target_reflection <= 1.0) {
            out.push(ConfigWarning::ReflectionOutOfRange {
                reflection: self.target_reflection,
            });
        }
        if !self.satisfies_nyquist() {
            out.push(ConfigWarning::NyquistViolation {
                top_freq_hz: self.carrier_freq + self.chirp_bandwidth,
                nyquist_hz: self.sampling_rate / 2.0,
            });
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Two-way travel time to a target at `range` (seconds).
pub fn round_trip_delay_s(range: f64, speed_of_light: f64) -> f64 {
    2.0 * range / speed_of_light
}

/// D = ⌊(2·d / c) · fs⌋. Fractional delay is truncated.
pub fn delay_samples(range: f64, speed_of_light: f64, sampling_rate: f64) -> usize {
    (round_trip_delay_s(range, speed_of_light) * sampling_rate).floor() as usize
}

/// c / (2·fs): range step between consecutive samples (meters).
pub fn range_bin_m(sampling_rate: f64, speed_of_light: f64) -> f64 {
    speed_of_light / (2.0 * sampling_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn default_counts() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.pulse_samples(), 200);
        assert_eq!(cfg.rx_samples(), 800);
        assert_eq!(cfg.delay_samples(), 100);
        assert!((cfg.range_bin_m() - 15.0).abs() < 1e-12);
        assert!((cfg.range_resolution_m() - 75.0).abs() < 1e-9);
        assert!(cfg.satisfies_nyquist());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn delay_quantization() {
        assert_eq!(delay_samples(0.0, 3e8, 10e6), 0);
        assert_eq!(delay_samples(12_000.0, 3e8, 10e6), 800);
        // 22 m is 1.47 samples, truncated
        assert_eq!(delay_samples(22.0, 3e8, 10e6), 1);
    }

    #[test]
    fn validation_failures() {
        let bad = |f: fn(&mut SimConfig)| {
            let mut cfg = SimConfig::default();
            f(&mut cfg);
            cfg.validate()
        };
        assert!(bad(|c| c.sampling_rate = 0.0).is_err());
        assert!(bad(|c| c.noise_std = -1.0).is_err());
        assert!(bad(|c| c.target_reflection = f64::NAN).is_err());
        assert!(bad(|c| c.pulse_width = 1e-9).is_err());
        assert!(bad(|c| c.chirp_bandwidth = 0.0).is_err());
        assert!(bad(|c| c.target_range = -5.0).is_err());
    }

    /// Collects formatted log output for one test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn validate_with_logs(cfg: &SimConfig) -> (DspResult<()>, String) {
        let buf = LogBuffer::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, || cfg.validate());
        let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    #[test]
    fn nyquist_violation_only_warns() {
        let cfg = SimConfig {
            carrier_freq: 4e6,
            ..Default::default()
        };
        assert!(!cfg.satisfies_nyquist());
        assert_eq!(
            cfg.warnings(),
            vec![ConfigWarning::NyquistViolation {
                top_freq_hz: 6e6,
                nyquist_hz: 5e6
            }]
        );

        let (result, logs) = validate_with_logs(&cfg);
        assert!(result.is_ok());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("chirp exceeds Nyquist"), "{logs}");
    }

    #[test]
    fn reflection_above_one_only_warns() {
        let cfg = SimConfig {
            target_reflection: 1.5,
            ..Default::default()
        };
        assert_eq!(
            cfg.warnings(),
            vec![ConfigWarning::ReflectionOutOfRange { reflection: 1.5 }]
        );
        let (result, logs) = validate_with_logs(&cfg);
        assert!(result.is_ok());
        assert!(logs.contains("target reflection outside (0, 1]"), "{logs}");
    }

    #[test]
    fn default_config_is_silent() {
        let cfg = SimConfig::default();
        assert!(cfg.warnings().is_empty());
        let (result, logs) = validate_with_logs(&cfg);
        assert!(result.is_ok());
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn config_json_roundtrip() {
        let cfg = SimConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
