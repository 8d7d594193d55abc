//! Scenario definitions.
//!
//! Each scenario is a named radar configuration plus how its single target
//! moves. The target's starting range and reflection live in the config.
//! Scenarios carry no seed; the noise stream is chosen when a session starts.

use crate::target::{MotionSpec, PointTarget};
use sensor_models::radar::SimConfig;
use serde::{Deserialize, Serialize};

/// Which pre-defined scenario to load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    /// Stationary target at 1.5 km, σ = 0.1
    Baseline,
    /// Same target, no receiver noise
    Noiseless,
    /// Target at zero range: echo overlaps the pulse start
    ZeroRange,
    /// Target at 12 km: echo starts past the receive window
    BeyondWindow,
    /// σ = 1.0, peak barely above the sidelobe floor
    LowSnr,
    /// Target closing at 1 km/s from 5 km
    Closing,
}

/// A fully configured simulation scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub config: SimConfig,
    /// Range evolution between ticks
    pub motion: MotionSpec,
    /// Time between ticks (seconds)
    pub tick_interval: f64,
    /// Ticks in a batch run
    pub duration_ticks: u64,
}

impl Scenario {
    /// Build the named scenario.
    pub fn build(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Baseline => Self::baseline(),
            ScenarioKind::Noiseless => Self::with_config("noiseless", |c| c.noise_std = 0.0),
            ScenarioKind::ZeroRange => Self::with_config("zero_range", |c| c.target_range = 0.0),
            ScenarioKind::BeyondWindow => {
                Self::with_config("beyond_window", |c| c.target_range = 12_000.0)
            }
            ScenarioKind::LowSnr => Self::with_config("low_snr", |c| c.noise_std = 1.0),
            ScenarioKind::Closing => Self::closing(),
        }
    }

    /// Target at tick 0, taken from `config.target_range` and
    /// `config.target_reflection`.
    pub fn initial_target(&self) -> PointTarget {
        PointTarget {
            range_m: self.config.target_range,
            reflection: self.config.target_reflection,
            motion: self.motion.clone(),
        }
    }

    fn baseline() -> Self {
        Self {
            name: "baseline".into(),
            config: SimConfig::default(),
            motion: MotionSpec::Stationary,
            tick_interval: 0.1,
            duration_ticks: 100,
        }
    }

    fn with_config(name: &str, edit: impl FnOnce(&mut SimConfig)) -> Self {
        let mut config = SimConfig::default();
        edit(&mut config);
        Self {
            name: name.into(),
            config,
            ..Self::baseline()
        }
    }

    fn closing() -> Self {
        let config = SimConfig {
            target_range: 5_000.0,
            ..Default::default()
        };
        Self {
            name: "closing".into(),
            config,
            motion: MotionSpec::ConstantRangeRate { range_rate: -1_000.0 },
            tick_interval: 0.1,
            // 5 km down to 1 km
            duration_ticks: 40,
        }
    }
}
