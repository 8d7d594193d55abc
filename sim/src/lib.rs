//! `sim` — Echo simulator: point target, scenarios, tick session, replay.

pub mod radar_sim;
pub mod replay;
pub mod scenarios;
pub mod session;
pub mod target;

pub use radar_sim::{simulate_rx, RadarSimulator};
pub use replay::{load_replay, save_replay, RecordedFrame, ReplayLog};
pub use scenarios::{Scenario, ScenarioKind};
pub use session::{expected_bin, Frame, RadarSession};
pub use target::{MotionSpec, PointTarget};
