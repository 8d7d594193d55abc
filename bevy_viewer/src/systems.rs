//! Tick and input systems.

use crate::resources::{PlayMode, ResetEvent, ViewerState};
use bevy::prelude::*;

/// Keyboard input: ←/→ cycle views, Space play/pause, Period step, R reset.
pub fn keyboard_control_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut viewer: ResMut<ViewerState>,
    mut reset_events: EventWriter<ResetEvent>,
) {
    if keys.just_pressed(KeyCode::ArrowRight) {
        viewer.view = viewer.view.next();
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        viewer.view = viewer.view.prev();
    }
    if keys.just_pressed(KeyCode::Space) {
        viewer.play_mode = match viewer.play_mode {
            PlayMode::Playing => PlayMode::Paused,
            _ => PlayMode::Playing,
        };
    }
    if keys.just_pressed(KeyCode::Period) {
        viewer.play_mode = PlayMode::StepOnce;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reset_events.send(ResetEvent);
    }
}

/// Simulate and compress one pulse. Scheduled on the redraw timer.
pub fn advance_simulation_system(mut viewer: ResMut<ViewerState>) {
    match viewer.play_mode {
        PlayMode::Paused => {}
        PlayMode::Playing => viewer.tick(),
        PlayMode::StepOnce => {
            viewer.play_mode = PlayMode::Paused;
            viewer.tick();
        }
    }
}

/// Handle reset events: restart from tick 0 and show a fresh frame at once.
pub fn reset_system(mut reset_events: EventReader<ResetEvent>, mut viewer: ResMut<ViewerState>) {
    for _ in reset_events.read() {
        let seed = viewer.session.seed();
        viewer.session.reset(seed);
        viewer.timing_history.clear();
        viewer.tick();
    }
}
