//! egui panels: control bar, signal plot, detection status.

use crate::resources::{PlayMode, ResetEvent, ViewerState};
use crate::views::{build_view, ViewKind};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Control bar: play/pause/step/reset, view selector, session info.
pub fn ui_control_panel(
    mut contexts: EguiContexts,
    mut viewer: ResMut<ViewerState>,
    mut reset_events: EventWriter<ResetEvent>,
) {
    let ctx = match contexts.try_ctx_mut() {
        Some(c) => c,
        None => return,
    };
    egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Pulse Compression");
            ui.separator();

            let play_label = match viewer.play_mode {
                PlayMode::Playing => "⏸ Pause",
                _ => "▶ Play",
            };
            if ui.button(play_label).clicked() {
                viewer.play_mode = match viewer.play_mode {
                    PlayMode::Playing => PlayMode::Paused,
                    _ => PlayMode::Playing,
                };
            }
            if ui.button("⏭ Step").clicked() {
                viewer.play_mode = PlayMode::StepOnce;
            }
            if ui.button("🔄 Reset").clicked() {
                reset_events.send(ResetEvent);
            }

            ui.separator();

            let mut view = viewer.view;
            for kind in ViewKind::ALL {
                ui.selectable_value(&mut view, kind, format!("{kind:?}"));
            }
            viewer.view = view;

            ui.separator();

            let session = &viewer.session;
            ui.label(format!(
                "scenario={}  seed={}  tick={}  N={}",
                session.scenario().name,
                session.seed(),
                session.tick(),
                session.fft_size(),
            ));
        });
    });
}

/// Detection readout (bottom).
pub fn ui_status_panel(mut contexts: EguiContexts, viewer: Res<ViewerState>) {
    let ctx = match contexts.try_ctx_mut() {
        Some(c) => c,
        None => return,
    };
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if let Some(err) = &viewer.last_error {
                ui.colored_label(egui::Color32::from_rgb(230, 80, 80), err.as_str());
                ui.separator();
            }

            let Some(frame) = viewer.session.frame() else {
                ui.label("No frame yet.");
                return;
            };

            ui.label(format!("target {:.0} m", frame.target_range_m));
            ui.separator();
            let det = &frame.detection;
            ui.label(format!(
                "peak bin {} → {:.0} m  |  SNR {:.1} dB",
                det.peak.index, det.range_m, det.snr_db
            ));
            ui.separator();
            match frame.expected_bin {
                Some(bin) => ui.label(format!("expected bin {bin}")),
                None => ui.label("echo outside window"),
            };
            if let Some(avg) = viewer.mean_time_us() {
                ui.separator();
                ui.label(format!("⏱ {avg}µs/tick"));
            }
        });
    });
}

/// The selected view, drawn with egui_plot.
pub fn ui_plot_panel(mut contexts: EguiContexts, viewer: Res<ViewerState>) {
    let ctx = match contexts.try_ctx_mut() {
        Some(c) => c,
        None => return,
    };
    let session = &viewer.session;
    let view = build_view(viewer.view, session.axes(), session.tx(), session.frame());

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(view.title);
        Plot::new("signal_plot")
            .x_axis_label(view.x_label)
            .y_axis_label(view.y_label)
            .legend(Legend::default())
            .allow_zoom(true)
            .allow_drag(true)
            .show(ui, |plot_ui| {
                for series in view.series {
                    plot_ui.line(Line::new(PlotPoints::from(series.points)).name(series.name));
                }
            });
    });
}
