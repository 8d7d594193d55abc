//! Echo channel simulator.
//!
//! Produces one receive vector per tick:
//! - the transmit pulse delayed by the integer round-trip delay D
//! - scaled by the target reflection factor
//! - plus white Gaussian noise of standard deviation σ
//!
//! An echo that starts beyond the receive window is dropped entirely and the
//! vector is pure noise.

use crate::target::PointTarget;
use dsp_core::error::{ensure_finite, ensure_non_negative, ensure_positive, DspError, DspResult};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use sensor_models::radar::{delay_samples, SimConfig};

/// Build a receive vector of `rx_len` samples: echo of `tx` from a reflector
/// at `target_range` plus `noise_std`·N(0, 1) noise drawn from `rng`.
#[allow(clippy::too_many_arguments)]
pub fn simulate_rx<R: Rng + ?Sized>(
    tx: &[f64],
    rx_len: usize,
    sampling_rate: f64,
    speed_of_light: f64,
    target_range: f64,
    reflection: f64,
    noise_std: f64,
    rng: &mut R,
) -> DspResult<Vec<f64>> {
    if rx_len == 0 {
        return Err(DspError::EmptyInput("receive window"));
    }
    ensure_positive("sampling_rate", sampling_rate)?;
    ensure_positive("speed_of_light", speed_of_light)?;
    ensure_non_negative("target_range", target_range)?;
    ensure_finite("target_reflection", reflection)?;
    ensure_non_negative("noise_std", noise_std)?;

    let delay = delay_samples(target_range, speed_of_light, sampling_rate);
    let mut rx = vec![0.0; rx_len];

    for (i, &s) in tx.iter().enumerate() {
        match i.checked_add(delay) {
            Some(idx) if idx < rx_len => rx[idx] += s * reflection,
            _ => break,
        }
    }

    if noise_std > 0.0 {
        for sample in rx.iter_mut() {
            let g: f64 = rng.sample(StandardNormal);
            *sample += noise_std * g;
        }
    }

    Ok(rx)
}

/// Generates receive vectors from a seeded RNG.
#[derive(Clone, Debug)]
pub struct RadarSimulator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl RadarSimulator {
    /// Deterministic simulator: the same seed yields the same noise stream.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Simulator with a fresh per-process seed. The seed is kept so the run
    /// can be reproduced with [`RadarSimulator::new`].
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        tracing::info!(seed, "seeded channel simulator from entropy");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulate one receive vector for `target` under `config`.
    pub fn generate(
        &mut self,
        tx: &[f64],
        config: &SimConfig,
        target: &PointTarget,
    ) -> DspResult<Vec<f64>> {
        simulate_rx(
            tx,
            config.rx_samples(),
            config.sampling_rate,
            config.speed_of_light,
            target.range_m,
            target.reflection,
            config.noise_std,
            &mut self.rng,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
