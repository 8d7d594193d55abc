//! Pipeline orchestrator: the compression stage for one receive vector.
//!
//! # Processing steps per receive vector
//! 1. Matched-filter the receive vector against the planned reference
//! 2. Pick the strongest bin within the first R lags (the plotted range window)
//! 3. Convert the bin to range and measure it against the window median
//!
//! The transmit reference is fixed at construction; each call is independent.

use crate::{
    compressor::PulseCompressor,
    detection::{detect, Detection},
    error::{ensure_positive, DspError, DspResult},
    fft::FftSizePolicy,
};
use rayon::prelude::*;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the compression pipeline.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// FFT length policy for the matched filter
    pub fft_policy: FftSizePolicy,
    /// Range covered by one lag, c / (2·fs) (meters)
    pub range_bin_m: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fft_policy: FftSizePolicy::PowerOfTwo,
            range_bin_m: 15.0, // 10 MHz sampling, c = 3e8
        }
    }
}

/// Outputs of one pipeline step.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Full magnitude envelope, length N
    pub compressed: Vec<f64>,
    /// Strongest return within the receive window
    pub detection: Detection,
    /// Wall-clock time of processing
    pub total_time_us: u64,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The compression pipeline. Holds the planned matched filter.
#[derive(Clone, Debug)]
pub struct Pipeline {
    pub config: PipelineConfig,
    compressor: PulseCompressor,
}

impl Pipeline {
    /// Plan a pipeline for transmit pulse `tx` and `rx_len`-sample receive vectors.
    pub fn new(tx: &[f64], rx_len: usize, config: PipelineConfig) -> DspResult<Self> {
        ensure_positive("range_bin_m", config.range_bin_m)?;
        let compressor = PulseCompressor::new(tx, rx_len, config.fft_policy)?;
        Ok(Self { config, compressor })
    }

    pub fn fft_size(&self) -> usize {
        self.compressor.fft_size()
    }

    pub fn rx_len(&self) -> usize {
        self.compressor.rx_len()
    }

    /// Compress one receive vector and detect its peak.
    pub fn process(&mut self, rx: &[f64]) -> DspResult<PipelineOutput> {
        let start = Instant::now();
        let compressed = self.compressor.compress(rx)?;
        let detection = Self::finish(&compressed, self.rx_len(), self.config.range_bin_m)?;
        Ok(PipelineOutput {
            compressed,
            detection,
            total_time_us: start.elapsed().as_micros() as u64,
        })
    }

    /// Compress a batch of receive vectors in parallel, preserving order.
    pub fn process_many(&self, frames: &[Vec<f64>]) -> DspResult<Vec<PipelineOutput>> {
        let rx_len = self.rx_len();
        let range_bin_m = self.config.range_bin_m;
        frames
            .par_iter()
            .map_init(
                || self.compressor.clone(),
                |compressor, rx| -> DspResult<PipelineOutput> {
                    let start = Instant::now();
                    let compressed = compressor.compress(rx)?;
                    let detection = Self::finish(&compressed, rx_len, range_bin_m)?;
                    Ok(PipelineOutput {
                        compressed,
                        detection,
                        total_time_us: start.elapsed().as_micros() as u64,
                    })
                },
            )
            .collect()
    }

    /// Peak search over the first `window` lags. The compressor always
    /// returns at least R bins, so an empty window means a broken envelope.
    fn finish(compressed: &[f64], window: usize, range_bin_m: f64) -> DspResult<Detection> {
        detect(compressed, window, range_bin_m).ok_or(DspError::EmptyInput("compressed envelope"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::generate_chirp;

    fn make_echo(tx: &[f64], rx_len: usize, delay: usize) -> Vec<f64> {
        let mut rx = vec![0.0; rx_len];
        for (i, &s) in tx.iter().enumerate() {
            if i + delay < rx_len {
                rx[i + delay] += 0.8 * s;
            }
        }
        rx
    }

    #[test]
    fn pipeline_detects_range() {
        let tx = generate_chirp(200, 10e6, 1e6, 2e6).unwrap();
        let mut pipeline = Pipeline::new(&tx, 800, PipelineConfig::default()).unwrap();
        let out = pipeline.process(&make_echo(&tx, 800, 100)).unwrap();

        assert_eq!(out.compressed.len(), 2048);
        assert_eq!(out.detection.peak.index, 100);
        assert_eq!(out.detection.range_m, 1500.0);
        assert!(out.detection.snr_db > 20.0);
    }

    #[test]
    fn batch_matches_sequential() {
        let tx = generate_chirp(64, 10e6, 1e6, 2e6).unwrap();
        let mut pipeline = Pipeline::new(&tx, 256, PipelineConfig::default()).unwrap();
        let frames: Vec<Vec<f64>> = [0, 17, 150, 190]
            .iter()
            .map(|&d| make_echo(&tx, 256, d))
            .collect();

        let batch = pipeline.process_many(&frames).unwrap();
        assert_eq!(batch.len(), frames.len());
        for (frame, out) in frames.iter().zip(&batch) {
            let single = pipeline.process(frame).unwrap();
            assert_eq!(single.detection.peak.index, out.detection.peak.index);
            assert_eq!(single.compressed, out.compressed);
        }
    }

    #[test]
    fn batch_propagates_errors() {
        let tx = generate_chirp(64, 10e6, 1e6, 2e6).unwrap();
        let pipeline = Pipeline::new(&tx, 256, PipelineConfig::default()).unwrap();
        let frames = vec![vec![0.0; 256], vec![0.0; 3]];
        assert!(matches!(
            pipeline.process_many(&frames),
            Err(DspError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn empty_envelope_is_an_error() {
        assert!(matches!(
            Pipeline::finish(&[], 800, 15.0),
            Err(DspError::EmptyInput(_))
        ));
        assert!(matches!(
            Pipeline::finish(&[1.0, 2.0], 0, 15.0),
            Err(DspError::EmptyInput(_))
        ));
        let det = Pipeline::finish(&[1.0, 3.0, 2.0], 3, 15.0).unwrap();
        assert_eq!(det.peak.index, 1);
        assert_eq!(det.range_m, 15.0);
    }

    #[test]
    fn rejects_bad_range_bin() {
        let tx = generate_chirp(64, 10e6, 1e6, 2e6).unwrap();
        let cfg = PipelineConfig {
            range_bin_m: 0.0,
            ..Default::default()
        };
        assert!(Pipeline::new(&tx, 256, cfg).is_err());
    }
}
