//! View model: which signals a view plots, on which axes, under which labels.
//!
//! Pure data, no Bevy or egui types, so it builds and tests headless.

use sensor_models::axes::SignalAxes;
use sim::session::Frame;

/// The four plots the viewer cycles through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewKind {
    #[default]
    Transmit,
    Received,
    Compressed,
    Combined,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Transmit,
        ViewKind::Received,
        ViewKind::Compressed,
        ViewKind::Combined,
    ];

    pub fn index(self) -> usize {
        match self {
            ViewKind::Transmit => 0,
            ViewKind::Received => 1,
            ViewKind::Compressed => 2,
            ViewKind::Combined => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Right arrow.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Left arrow.
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Transmit => "Radar Visualization - Transmit Pulse",
            ViewKind::Received => "Radar Visualization - Received Signal (Echo + Noise)",
            ViewKind::Compressed => "Radar Visualization - Pulse Compression Output",
            ViewKind::Combined => "Radar Visualization - Combined Signals",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            ViewKind::Transmit | ViewKind::Received => "Time (µs)",
            ViewKind::Compressed => "Range (m)",
            ViewKind::Combined => "Time (µs) / Range (m)",
        }
    }
}

/// One named line on a plot.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: &'static str,
    /// (x, y) pairs
    pub points: Vec<[f64; 2]>,
}

/// Everything the renderer needs to draw one view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSpec {
    pub kind: ViewKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

fn zip_axis(name: &'static str, axis: &[f64], values: &[f64]) -> Series {
    Series {
        name,
        points: axis.iter().zip(values).map(|(&x, &y)| [x, y]).collect(),
    }
}

fn transmit(axes: &SignalAxes, tx: &[f64]) -> Series {
    zip_axis("Transmit Pulse", &axes.time_tx_us, tx)
}

fn received(axes: &SignalAxes, frame: Option<&Frame>) -> Series {
    let rx = frame.map(|f| f.rx.as_slice()).unwrap_or_default();
    zip_axis("Received Signal", &axes.time_rx_us, rx)
}

/// Only the first R bins are shown: one per range-axis entry.
fn compressed(axes: &SignalAxes, frame: Option<&Frame>) -> Series {
    let env = frame.map(|f| f.compressed.as_slice()).unwrap_or_default();
    zip_axis("Compressed Pulse", &axes.range_m, env)
}

/// Build the plot description for `kind`. Before the first tick the receive
/// and compressed series are empty.
pub fn build_view(kind: ViewKind, axes: &SignalAxes, tx: &[f64], frame: Option<&Frame>) -> ViewSpec {
    let series = match kind {
        ViewKind::Transmit => vec![transmit(axes, tx)],
        ViewKind::Received => vec![received(axes, frame)],
        ViewKind::Compressed => vec![compressed(axes, frame)],
        ViewKind::Combined => vec![
            transmit(axes, tx),
            received(axes, frame),
            compressed(axes, frame),
        ],
    };
    ViewSpec {
        kind,
        title: kind.title(),
        x_label: kind.x_label(),
        y_label: "Amplitude",
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::scenarios::{Scenario, ScenarioKind};
    use sim::session::RadarSession;

    #[test]
    fn arrow_cycling_wraps() {
        assert_eq!(ViewKind::Transmit.next(), ViewKind::Received);
        assert_eq!(ViewKind::Combined.next(), ViewKind::Transmit);
        assert_eq!(ViewKind::Transmit.prev(), ViewKind::Combined);
        assert_eq!(ViewKind::Compressed.prev(), ViewKind::Received);
        for kind in ViewKind::ALL {
            assert_eq!(kind.next().prev(), kind);
            assert_eq!(ViewKind::from_index(kind.index()), kind);
        }
    }

    #[test]
    fn views_pair_signals_with_axes() {
        let mut session =
            RadarSession::new(Scenario::build(ScenarioKind::Baseline), Some(42)).unwrap();
        session.step().unwrap();
        let axes = session.axes().clone();
        let tx = session.tx().clone();
        let frame = session.frame();

        let v = build_view(ViewKind::Transmit, &axes, &tx, frame);
        assert_eq!(v.title, "Radar Visualization - Transmit Pulse");
        assert_eq!(v.x_label, "Time (µs)");
        assert_eq!(v.series.len(), 1);
        assert_eq!(v.series[0].points.len(), 200);

        let v = build_view(ViewKind::Received, &axes, &tx, frame);
        assert_eq!(v.series[0].points.len(), 800);

        let v = build_view(ViewKind::Compressed, &axes, &tx, frame);
        assert_eq!(v.x_label, "Range (m)");
        let pts = &v.series[0].points;
        assert_eq!(pts.len(), 800);
        assert!((pts[100][0] - 1500.0).abs() < 1e-9);

        let v = build_view(ViewKind::Combined, &axes, &tx, frame);
        assert_eq!(v.title, "Radar Visualization - Combined Signals");
        assert_eq!(v.x_label, "Time (µs) / Range (m)");
        let names: Vec<_> = v.series.iter().map(|s| s.name).collect();
        assert_eq!(names, ["Transmit Pulse", "Received Signal", "Compressed Pulse"]);
    }

    #[test]
    fn empty_series_before_first_tick() {
        let session = RadarSession::new(Scenario::build(ScenarioKind::Baseline), Some(1)).unwrap();
        let v = build_view(ViewKind::Combined, session.axes(), session.tx(), None);
        assert_eq!(v.series[0].points.len(), 200);
        assert!(v.series[1].points.is_empty());
        assert!(v.series[2].points.is_empty());
    }
}
