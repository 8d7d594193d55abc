//! `bevy_viewer` — interactive plot viewer for the pulse-compression chain.
//!
//! # Feature gate
//! The `viewer` feature enables Bevy rendering. Without it only the
//! headless view model (`views`) is built, which is what the tests exercise.
//!
//! # Architecture
//! - **Resource**: `ViewerState` (session, selected view, play mode)
//! - **Event**: `ResetEvent`
//! - **Systems** (in order): `keyboard_control_system`, `reset_system`,
//!   `advance_simulation_system` (every 100 ms), then the `ui_*` panels

pub mod views;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod resources;
#[cfg(feature = "viewer")]
pub mod systems;
#[cfg(feature = "viewer")]
pub mod ui;

#[cfg(feature = "viewer")]
pub use app::run_viewer;
pub use views::{build_view, Series, ViewKind, ViewSpec};
