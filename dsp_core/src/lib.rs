//! `dsp_core` — Radar pulse-compression signal processing.
//!
//! # Module layout
//! - [`error`]     : `DspError` and the `DspResult` alias
//! - [`waveform`]  : Real-valued LFM chirp synthesis
//! - [`fft`]       : FFT sizing policy and a cached forward/inverse engine
//! - [`compressor`]: Frequency-domain matched filter (pulse compression)
//! - [`detection`] : Peak picking, noise floor, SNR
//! - [`metrics`]   : Per-run detection statistics
//! - [`pipeline`]  : Compression stage orchestrator for one receive vector
//!
//! Everything here is real-valued, double precision, and free of any UI or
//! simulator dependency.

pub mod compressor;
pub mod detection;
pub mod error;
pub mod fft;
pub mod metrics;
pub mod pipeline;
pub mod waveform;

pub use compressor::{compress, correlate, PulseCompressor};
pub use detection::{Detection, Peak};
pub use error::{DspError, DspResult};
pub use fft::FftSizePolicy;
pub use metrics::CompressionMetrics;
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput};
pub use waveform::generate_chirp;
