//! Tick-driven radar session.
//!
//! # Processing steps per tick
//! 1. Simulate a receive vector for the target's current range
//! 2. Compress it against the fixed transmit pulse and detect the peak
//! 3. Publish the finished `Frame`, replacing the previous one
//! 4. Move the target by one tick interval
//!
//! The transmit pulse and the plot axes are built once and never change.

use crate::radar_sim::RadarSimulator;
use crate::scenarios::Scenario;
use crate::target::PointTarget;
use dsp_core::detection::Detection;
use dsp_core::error::DspResult;
use dsp_core::pipeline::{Pipeline, PipelineConfig};
use dsp_core::waveform::generate_chirp;
use sensor_models::axes::SignalAxes;
use sensor_models::radar::{delay_samples, SimConfig};
use std::sync::Arc;

/// Everything produced by one tick.
#[derive(Clone, Debug)]
pub struct Frame {
    pub tick: u64,
    /// Target range used for this tick (meters)
    pub target_range_m: f64,
    /// Noisy echo, length R
    pub rx: Vec<f64>,
    /// Compression envelope, length N
    pub compressed: Vec<f64>,
    pub detection: Detection,
    /// Bin where the echo should peak; `None` when it starts past the window
    pub expected_bin: Option<usize>,
    pub total_time_us: u64,
}

/// Lag at which a target at `range_m` peaks, if its echo starts inside the
/// receive window.
pub fn expected_bin(config: &SimConfig, range_m: f64) -> Option<usize> {
    let delay = delay_samples(range_m, config.speed_of_light, config.sampling_rate);
    (delay < config.rx_samples()).then_some(delay)
}

/// A running simulation: fixed pulse, evolving target, latest frame.
#[derive(Debug)]
pub struct RadarSession {
    scenario: Scenario,
    tx: Arc<[f64]>,
    axes: Arc<SignalAxes>,
    target: PointTarget,
    simulator: RadarSimulator,
    pipeline: Pipeline,
    tick: u64,
    frame: Option<Frame>,
}

impl RadarSession {
    /// Set up a session. `seed = None` draws one from entropy.
    /// No tick is run.
    pub fn new(scenario: Scenario, seed: Option<u64>) -> DspResult<Self> {
        let config = &scenario.config;
        config.validate()?;

        let tx: Arc<[f64]> = generate_chirp(
            config.pulse_samples(),
            config.sampling_rate,
            config.carrier_freq,
            config.chirp_bandwidth,
        )?
        .into();
        let pipeline = Pipeline::new(
            &tx,
            config.rx_samples(),
            PipelineConfig {
                range_bin_m: config.range_bin_m(),
                ..Default::default()
            },
        )?;
        let axes = Arc::new(SignalAxes::from_config(config));
        let simulator = match seed {
            Some(seed) => RadarSimulator::new(seed),
            None => RadarSimulator::from_entropy(),
        };

        tracing::info!(
            scenario = %scenario.name,
            seed = simulator.seed(),
            pulse_samples = tx.len(),
            rx_samples = pipeline.rx_len(),
            fft_size = pipeline.fft_size(),
            "radar session started"
        );

        Ok(Self {
            target: scenario.initial_target(),
            scenario,
            tx,
            axes,
            simulator,
            pipeline,
            tick: 0,
            frame: None,
        })
    }

    /// Run one tick and return the frame it published.
    pub fn step(&mut self) -> DspResult<&Frame> {
        let config = &self.scenario.config;
        let range_m = self.target.range_m;

        let rx = self.simulator.generate(&self.tx, config, &self.target)?;
        let out = self.pipeline.process(&rx)?;
        let frame = Frame {
            tick: self.tick,
            target_range_m: range_m,
            rx,
            compressed: out.compressed,
            detection: out.detection,
            expected_bin: expected_bin(config, range_m),
            total_time_us: out.total_time_us,
        };

        tracing::debug!(
            tick = frame.tick,
            peak_bin = frame.detection.peak.index,
            range_m = frame.detection.range_m,
            snr_db = frame.detection.snr_db,
            time_us = frame.total_time_us,
            "tick"
        );

        self.target.step(self.scenario.tick_interval);
        self.tick += 1;
        Ok(self.frame.insert(frame))
    }

    /// Restart from tick 0 with a new noise seed.
    pub fn reset(&mut self, seed: u64) {
        self.simulator = RadarSimulator::new(seed);
        self.target = self.scenario.initial_target();
        self.tick = 0;
        self.frame = None;
        tracing::info!(scenario = %self.scenario.name, seed, "radar session reset");
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &SimConfig {
        &self.scenario.config
    }

    pub fn tx(&self) -> &Arc<[f64]> {
        &self.tx
    }

    pub fn axes(&self) -> &Arc<SignalAxes> {
        &self.axes
    }

    pub fn target(&self) -> &PointTarget {
        &self.target
    }

    pub fn seed(&self) -> u64 {
        self.simulator.seed()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn fft_size(&self) -> usize {
        self.pipeline.fft_size()
    }

    /// The most recently published frame, if any tick has run.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::ScenarioKind;

    fn session(kind: ScenarioKind, seed: u64) -> RadarSession {
        RadarSession::new(Scenario::build(kind), Some(seed)).unwrap()
    }

    #[test]
    fn construction_runs_no_tick() {
        let s = session(ScenarioKind::Baseline, 1);
        assert!(s.frame().is_none());
        assert_eq!(s.tick(), 0);
        assert_eq!(s.tx().len(), 200);
        assert_eq!(s.axes().range_m.len(), 800);
        assert_eq!(s.fft_size(), 2048);
    }

    #[test]
    fn step_publishes_complete_frame() {
        let mut s = session(ScenarioKind::Baseline, 42);
        let frame = s.step().unwrap().clone();
        assert_eq!(frame.tick, 0);
        assert_eq!(frame.rx.len(), 800);
        assert_eq!(frame.compressed.len(), 2048);
        assert_eq!(frame.expected_bin, Some(100));
        assert!(frame.detection.peak.index.abs_diff(100) <= 1);
        assert_eq!(s.tick(), 1);
        assert_eq!(s.frame().map(|f| f.tick), Some(0));

        s.step().unwrap();
        assert_eq!(s.frame().map(|f| f.tick), Some(1));
    }

    #[test]
    fn reset_replays_the_noise_stream() {
        let mut s = session(ScenarioKind::Baseline, 9);
        let first = s.step().unwrap().rx.clone();
        s.step().unwrap();
        s.reset(9);
        assert!(s.frame().is_none());
        assert_eq!(s.tick(), 0);
        assert_eq!(s.step().unwrap().rx, first);
    }

    #[test]
    fn closing_target_moves_between_ticks() {
        let mut s = session(ScenarioKind::Closing, 3);
        let r0 = s.step().unwrap().target_range_m;
        let r1 = s.step().unwrap().target_range_m;
        assert_eq!(r0, 5_000.0);
        assert!((r0 - r1 - 100.0).abs() < 1e-9);
        assert!(s.target().range_m < r1);
    }

    #[test]
    fn beyond_window_has_no_expected_bin() {
        let mut s = session(ScenarioKind::BeyondWindow, 0);
        let frame = s.step().unwrap();
        assert_eq!(frame.expected_bin, None);
    }

    #[test]
    fn noiseless_zero_range_peaks_at_origin() {
        let mut scenario = Scenario::build(ScenarioKind::ZeroRange);
        scenario.config.noise_std = 0.0;
        let mut s = RadarSession::new(scenario, Some(0)).unwrap();
        assert_eq!(s.step().unwrap().detection.peak.index, 0);
    }

    #[test]
    fn config_target_edits_reach_the_echo() {
        let mut scenario = Scenario::build(ScenarioKind::Noiseless);
        // 200.5 samples of round trip
        scenario.config.target_range = 3_007.5;
        scenario.config.target_reflection = 0.2;
        let mut s = RadarSession::new(scenario, Some(0)).unwrap();

        let frame = s.step().unwrap().clone();
        assert_eq!(frame.target_range_m, 3_007.5);
        assert_eq!(frame.expected_bin, Some(200));
        assert_eq!(frame.detection.peak.index, 200);
        let expected = 0.2 * dsp_core::waveform::energy(s.tx());
        assert!((frame.detection.peak.magnitude - expected).abs() / expected < 1e-9);

        s.reset(0);
        assert_eq!(s.target().range_m, 3_007.5);
        assert_eq!(s.target().reflection, 0.2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut scenario = Scenario::build(ScenarioKind::Baseline);
        scenario.config.noise_std = -0.5;
        assert!(RadarSession::new(scenario, Some(0)).is_err());
    }

    #[test]
    fn expected_bin_boundaries() {
        let cfg = SimConfig::default();
        assert_eq!(expected_bin(&cfg, 0.0), Some(0));
        assert_eq!(expected_bin(&cfg, 1500.0), Some(100));
        assert_eq!(expected_bin(&cfg, 11_990.0), Some(799));
        assert_eq!(expected_bin(&cfg, 12_000.0), None);
    }
}
