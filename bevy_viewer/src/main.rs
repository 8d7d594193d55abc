//! bevy_viewer binary entry point.
//!
//! Usage:
//!   cargo run --release --package bevy_viewer --features viewer -- --scenario baseline --seed 42
//!   cargo run --release --package bevy_viewer --features viewer -- --scenario closing
//!
//! Keys: ←/→ cycle views, Space play/pause, Period single step, R reset.

use clap::Parser;
use sim::scenarios::ScenarioKind;

#[derive(Parser)]
#[command(name = "bevy_viewer", about = "Radar pulse-compression viewer")]
struct Args {
    /// Scenario to run
    #[arg(long, value_enum, default_value = "baseline")]
    scenario: ScenarioKind,

    /// Noise seed; drawn from entropy and logged when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    bevy_viewer::run_viewer(args.scenario, args.seed)?;
    Ok(())
}
