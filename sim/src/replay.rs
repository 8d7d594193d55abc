//! Replay: serialize/deserialize receive-vector logs for offline re-compression.
//!
//! Only the simulated inputs are stored. Compressed envelopes and detections
//! are recomputed on load, so the log never carries non-finite SNR values.

use crate::session::Frame;
use sensor_models::radar::SimConfig;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// A full recorded run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayLog {
    pub scenario_name: String,
    pub seed: u64,
    pub config: SimConfig,
    /// Frames in tick order
    pub frames: Vec<RecordedFrame>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub tick: u64,
    pub target_range_m: f64,
    pub rx: Vec<f64>,
}

impl From<&Frame> for RecordedFrame {
    fn from(frame: &Frame) -> Self {
        Self {
            tick: frame.tick,
            target_range_m: frame.target_range_m,
            rx: frame.rx.clone(),
        }
    }
}

/// Save a replay log to a JSON file.
pub fn save_replay(log: &ReplayLog, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, log)?;
    Ok(())
}

/// Load a replay log from a JSON file.
pub fn load_replay(path: &Path) -> anyhow::Result<ReplayLog> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let log: ReplayLog = serde_json::from_reader(reader)?;
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{Scenario, ScenarioKind};
    use crate::session::RadarSession;

    #[test]
    fn save_then_load() {
        let mut session = RadarSession::new(Scenario::build(ScenarioKind::Baseline), Some(5)).unwrap();
        let mut frames = Vec::new();
        for _ in 0..3 {
            frames.push(RecordedFrame::from(session.step().unwrap()));
        }
        let log = ReplayLog {
            scenario_name: session.scenario().name.clone(),
            seed: session.seed(),
            config: session.config().clone(),
            frames,
        };

        let path = std::env::temp_dir().join(format!("radarsim_replay_{}.json", std::process::id()));
        save_replay(&log, &path).unwrap();
        let back = load_replay(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.scenario_name, "baseline");
        assert_eq!(back.seed, 5);
        assert_eq!(back.config, log.config);
        assert_eq!(back.frames.len(), 3);
        assert_eq!(back.frames[2].tick, 2);
        assert_eq!(back.frames[0].rx.len(), 800);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_replay(Path::new("/nonexistent/radarsim/replay.json")).is_err());
    }
}
