//! `sensor_models` — Radar configuration, time/range geometry, plot axes.

pub mod axes;
pub mod radar;

pub use axes::{RangeAxisM, SampleAxis, SignalAxes, TimeAxisUs};
pub use radar::{ConfigWarning, SimConfig, RX_WINDOW_FACTOR};
