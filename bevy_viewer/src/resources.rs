//! Bevy resources shared across systems.

use crate::views::ViewKind;
use bevy::prelude::*;
use sim::session::RadarSession;
use std::collections::VecDeque;

/// Rolling window of compression timings shown in the status bar.
const TIMING_WINDOW: usize = 50;

// ---------------------------------------------------------------------------
// Playback control
// ---------------------------------------------------------------------------

/// Whether the redraw timer advances the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Playing,
    Paused,
    /// Advance exactly one tick then pause
    StepOnce,
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The running session plus what the user is looking at.
#[derive(Resource)]
pub struct ViewerState {
    pub session: RadarSession,
    pub view: ViewKind,
    pub play_mode: PlayMode,
    /// Compression wall-clock times (µs), newest last
    pub timing_history: VecDeque<u64>,
    /// Last tick failure, shown in the status bar
    pub last_error: Option<String>,
}

impl ViewerState {
    pub fn new(session: RadarSession) -> Self {
        Self {
            session,
            view: ViewKind::default(),
            play_mode: PlayMode::default(),
            timing_history: VecDeque::with_capacity(TIMING_WINDOW),
            last_error: None,
        }
    }

    /// Run one tick. A failed tick keeps the previous frame and pauses.
    pub fn tick(&mut self) {
        match self.session.step() {
            Ok(frame) => {
                if self.timing_history.len() == TIMING_WINDOW {
                    self.timing_history.pop_front();
                }
                self.timing_history.push_back(frame.total_time_us);
                self.last_error = None;
            }
            Err(err) => {
                tracing::error!(%err, "tick failed");
                self.last_error = Some(err.to_string());
                self.play_mode = PlayMode::Paused;
            }
        }
    }

    pub fn mean_time_us(&self) -> Option<u64> {
        if self.timing_history.is_empty() {
            return None;
        }
        Some(self.timing_history.iter().sum::<u64>() / self.timing_history.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Emitted to restart the session with its current seed.
#[derive(Event, Default)]
pub struct ResetEvent;

#[cfg(test)]
mod tests {
    use super::*;
    use sim::scenarios::{Scenario, ScenarioKind};

    fn viewer() -> ViewerState {
        let session = RadarSession::new(Scenario::build(ScenarioKind::Baseline), Some(4)).unwrap();
        ViewerState::new(session)
    }

    #[test]
    fn timing_window_keeps_latest_ticks() {
        let mut v = viewer();
        assert!(v.mean_time_us().is_none());
        for _ in 0..TIMING_WINDOW + 5 {
            v.tick();
        }
        assert_eq!(v.timing_history.len(), TIMING_WINDOW);
        assert_eq!(v.session.tick(), (TIMING_WINDOW + 5) as u64);
        assert_eq!(
            v.timing_history.back().copied(),
            v.session.frame().map(|f| f.total_time_us)
        );
        assert!(v.mean_time_us().is_some());
        assert!(v.last_error.is_none());
    }
}
