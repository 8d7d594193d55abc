use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;
use bevy_egui::EguiPlugin;
use dsp_core::error::DspResult;
use sim::scenarios::{Scenario, ScenarioKind};
use sim::session::RadarSession;
use std::time::Duration;

use crate::{
    resources::{ResetEvent, ViewerState},
    systems::{advance_simulation_system, keyboard_control_system, reset_system},
    ui::{ui_control_panel, ui_plot_panel, ui_status_panel},
};

/// Redraw and simulation period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Main entry point for the interactive viewer.
///
/// The first tick runs before the window opens, so every view has data from
/// the first rendered frame.
pub fn run_viewer(kind: ScenarioKind, seed: Option<u64>) -> DspResult<()> {
    let mut session = RadarSession::new(Scenario::build(kind), seed)?;
    session.step()?;
    let viewer = ViewerState::new(session);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Radar Pulse Compression".into(),
                        resolution: (1200., 700.).into(),
                        ..default()
                    }),
                    ..default()
                })
                // tracing_subscriber is installed by main
                .disable::<LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .insert_resource(viewer)
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.08)))
        .add_event::<ResetEvent>()
        .add_systems(Startup, setup_camera)
        .add_systems(
            Update,
            (
                keyboard_control_system,
                reset_system,
                advance_simulation_system.run_if(on_timer(TICK_INTERVAL)),
            )
                .chain(),
        )
        .add_systems(Update, (ui_control_panel, ui_status_panel, ui_plot_panel).chain())
        .run();

    Ok(())
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
