//! Frequency-domain matched filter (pulse compression).
//!
//! # Processing steps per receive vector
//! 1. Zero-pad rx to N (tx was padded and transformed once at construction)
//! 2. RX = FFT(rx_pad)
//! 3. C[k] = RX[k] · conj(TX[k])  (correlation, not convolution)
//! 4. c = IFFT(C), normalized by 1/N
//! 5. |c[i]| is the detection envelope; index i is the lag in samples
//!
//! With N ≥ P + R − 1 the cyclic correlation equals the linear one for lags
//! 0..R. Negative lags (−P+1..0) wrap to the top of the output.

use crate::error::{DspError, DspResult};
use crate::fft::{ensure_finite_spectrum, FftEngine, FftSizePolicy};
use rustfft::num_complex::Complex64;

/// Matched filter planned for a fixed transmit pulse and receive length.
#[derive(Clone, Debug)]
pub struct PulseCompressor {
    pulse_len: usize,
    rx_len: usize,
    engine: FftEngine,
    /// conj(FFT(tx_pad)), reused every call
    reference_conj: Vec<Complex64>,
}

impl PulseCompressor {
    /// Plan a compressor for `tx` against receive vectors of `rx_len` samples.
    pub fn new(tx: &[f64], rx_len: usize, policy: FftSizePolicy) -> DspResult<Self> {
        if tx.is_empty() {
            return Err(DspError::EmptyInput("transmit pulse"));
        }
        if rx_len == 0 {
            return Err(DspError::EmptyInput("receive signal"));
        }

        let n = policy.size_for(tx.len(), rx_len);
        let mut engine = FftEngine::new(n);
        let reference = engine.forward_real(tx)?;
        ensure_finite_spectrum(&reference, "reference FFT")?;
        let reference_conj = reference.iter().map(|c| c.conj()).collect();

        tracing::debug!(pulse_len = tx.len(), rx_len, fft_size = n, "planned pulse compressor");

        Ok(Self {
            pulse_len: tx.len(),
            rx_len,
            engine,
            reference_conj,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.engine.size()
    }

    pub fn pulse_len(&self) -> usize {
        self.pulse_len
    }

    pub fn rx_len(&self) -> usize {
        self.rx_len
    }

    /// Complex cross-correlation of `rx` against the reference, length N.
    pub fn correlate(&mut self, rx: &[f64]) -> DspResult<Vec<Complex64>> {
        if rx.len() != self.rx_len {
            return Err(DspError::LengthMismatch {
                expected: self.rx_len,
                actual: rx.len(),
            });
        }

        let mut spectrum = self.engine.forward_real(rx)?;
        for (bin, reference) in spectrum.iter_mut().zip(&self.reference_conj) {
            *bin *= *reference;
        }
        self.engine.inverse(&mut spectrum)?;
        ensure_finite_spectrum(&spectrum, "inverse FFT")?;
        Ok(spectrum)
    }

    /// Magnitude envelope |correlate(rx)|, length N.
    pub fn compress(&mut self, rx: &[f64]) -> DspResult<Vec<f64>> {
        Ok(self.correlate(rx)?.iter().map(|c| c.norm()).collect())
    }
}

/// One-shot complex correlation with the default power-of-two sizing.
pub fn correlate(tx: &[f64], rx: &[f64]) -> DspResult<Vec<Complex64>> {
    PulseCompressor::new(tx, rx.len(), FftSizePolicy::default())?.correlate(rx)
}

/// One-shot pulse compression with the default power-of-two sizing.
pub fn compress(tx: &[f64], rx: &[f64]) -> DspResult<Vec<f64>> {
    PulseCompressor::new(tx, rx.len(), FftSizePolicy::default())?.compress(rx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
