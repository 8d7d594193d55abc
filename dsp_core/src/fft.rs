//! FFT sizing and a planned forward/inverse transform pair.
//!
//! Linear correlation of a P-sample reference against an R-sample receive
//! vector through a cyclic FFT needs N ≥ P + R − 1 to avoid wrap-around.
//! The default policy rounds 2·R up to a power of two (radix-2 friendly);
//! the minimal policy uses exactly P + R − 1 with a mixed-radix plan.

use crate::error::{DspError, DspResult};
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How the correlation FFT length is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FftSizePolicy {
    /// Smallest power of two ≥ 2·R.
    #[default]
    PowerOfTwo,
    /// Exactly P + R − 1 (mixed radix).
    Minimal,
}

impl FftSizePolicy {
    /// FFT length for a `pulse_len`-sample reference and `rx_len`-sample receive vector.
    pub fn size_for(self, pulse_len: usize, rx_len: usize) -> usize {
        match self {
            FftSizePolicy::PowerOfTwo => (2 * rx_len).next_power_of_two(),
            FftSizePolicy::Minimal => pulse_len + rx_len - 1,
        }
    }
}

/// Forward + inverse complex FFT of a fixed size.
///
/// Forward is unscaled; inverse is scaled by 1/N so that
/// `inverse(forward(x)) == x`.
pub struct FftEngine {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftEngine").field("size", &self.size).finish()
    }
}

impl Clone for FftEngine {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            forward: Arc::clone(&self.forward),
            inverse: Arc::clone(&self.inverse),
            scratch: vec![Complex64::new(0.0, 0.0); self.scratch.len()],
        }
    }
}

impl FftEngine {
    /// Plan forward and inverse transforms of length `size`.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            size,
            forward,
            inverse,
            scratch: vec![Complex64::new(0.0, 0.0); scratch_len],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Zero-pad a real sequence to the engine size and transform it.
    pub fn forward_real(&mut self, samples: &[f64]) -> DspResult<Vec<Complex64>> {
        if samples.len() > self.size {
            return Err(DspError::LengthMismatch {
                expected: self.size,
                actual: samples.len(),
            });
        }
        let mut buffer = vec![Complex64::new(0.0, 0.0); self.size];
        for (slot, &s) in buffer.iter_mut().zip(samples) {
            slot.re = s;
        }
        self.forward.process_with_scratch(&mut buffer, &mut self.scratch);
        Ok(buffer)
    }

    /// In-place inverse transform, normalized by 1/N.
    pub fn inverse(&mut self, spectrum: &mut [Complex64]) -> DspResult<()> {
        if spectrum.len() != self.size {
            return Err(DspError::LengthMismatch {
                expected: self.size,
                actual: spectrum.len(),
            });
        }
        self.inverse.process_with_scratch(spectrum, &mut self.scratch);
        let scale = 1.0 / self.size as f64;
        for c in spectrum.iter_mut() {
            *c *= scale;
        }
        Ok(())
    }
}

/// Fail with `DspError::Backend` if any bin is NaN or infinite.
pub fn ensure_finite_spectrum(values: &[Complex64], stage: &str) -> DspResult<()> {
    match values.iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        Some(i) => Err(DspError::Backend(format!(
            "{stage} produced a non-finite value at bin {i}"
        ))),
        None => Ok(()),
    }
}
