//! Command-line front end for the simulated DAQ.
//!
//! Connects one instrument, triggers it and prints a fixed number of
//! readings, optionally rendering them to a PNG.
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use daq_sim::daq::{
    render_readings_png, DaqSession, ManualClock, PlotStyle, SampleClock, WallClock,
};
use daq_sim::{DaqConfig, Identity};
/// Simulated data-acquisition instrument.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Matriculation number used to seed the instrument (e.g. s1234567).
    #[arg(short, long)]
    identity: String,

    /// Name printed as the licence holder.
    #[arg(long)]
    licensee: Option<String>,

    /// Instrument to connect: "constant", "ramp up", "ramp down" or "coursework".
    #[arg(short = 'n', long, default_value = "coursework")]
    instrument: String,

    /// Output level for the constant instrument (V).
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    level: f64,

    /// Number of readings to take after the trigger.
    #[arg(short, long, default_value_t = 120)]
    readings: usize,

    /// Skip real-time pacing and use a virtual sample clock.
    #[arg(long)]
    fast: bool,

    /// JSON instrument configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a PNG of the acquired readings.
    #[arg(long)]
    plot: Option<PathBuf>,
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DaqConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DaqConfig::default(),
    };
    let mut identity = Identity::parse(&cli.identity)?;
    if let Some(name) = &cli.licensee {
        identity = identity.with_licensee(name.clone());
    }
    if cli.fast {
        let clock = ManualClock::starting_at(SystemTime::now());
        run(DaqSession::new(identity, config, clock)?, &cli)
    } else {
        run(DaqSession::new(identity, config, WallClock)?, &cli)
    }
}
fn run<C: SampleClock>(mut daq: DaqSession<C>, cli: &Cli) -> Result<()> {
    daq.connect(&cli.instrument, cli.level)
        .with_context(|| format!("connecting instrument {:?}", cli.instrument))?;
    daq.trigger()?;
    let start = daq.triggered_at().context("session was not triggered")?;
    let mut readings = Vec::with_capacity(cli.readings);
    for _ in 0..cli.readings {
        let reading = daq.next_reading()?;
        let offset = reading
            .timestamp
            .duration_since(start)
            .unwrap_or_default()
            .as_secs_f64();
        println!(
            "{offset:8.2}  {:4}  {:+.4}",
            reading.code,
            daq.range().code_to_volts(reading.code)
        );
        readings.push(reading);
    }
    if let Some(path) = &cli.plot {
        let png = render_readings_png(&readings, daq.range(), PlotStyle::default())?;
        fs::write(path, png).with_context(|| format!("writing plot to {}", path.display()))?;
        info!("plot written to {}", path.display());
    }
    Ok(())
}
