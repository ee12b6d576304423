//! Basic example: an access point and a few stations at increasing distance.
//!
//! Every station sends one frame per 10ms to the access point. Once the
//! access point heard everyone, its peer table and the rates it picked
//! are printed.
//!
//! Run with:
//!   cargo run --example basic -p wifisim -- --stations 4 --spacing 15

use anyhow::{Context as _, Result};
use clap::Parser;
use std::{io, time::Duration};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use wifisim::{Delay, NodeIndex, Position, PredictorKind, Simulation};
use wifisim_core::report;

#[derive(Parser)]
struct Command {
    #[arg(long, default_value = "4")]
    stations: usize,

    /// meters between two consecutive stations
    #[arg(long, default_value = "15")]
    spacing: f64,

    #[arg(long, default_value = "snr-threshold")]
    predictor: PredictorKind,

    #[arg(long, default_value = "1s")]
    duration: Delay,

    /// print at most this many samples per peer
    #[arg(long, default_value = "4")]
    samples: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cmd = Command::parse();

    let mut sim = Simulation::<String>::new();
    let ap = sim
        .new_interface()
        .access_point()
        .set_predictor(cmd.predictor)
        .build()?;
    let ap_address = sim.interface(ap).context("access point")?.address();

    let stations = (1..=cmd.stations)
        .map(|i| {
            sim.new_interface()
                .set_position(Position::new(i as f64 * cmd.spacing, 0.0, 0.0))
                .build()
        })
        .collect::<Result<Vec<NodeIndex>, _>>()?;

    let steps = cmd.duration.into_duration().as_millis() / 10;
    let mut received = 0usize;
    for step in 0..steps {
        for &sta in &stations {
            sim.send(sta, ap_address, None, format!("{sta} step {step}"))?;
        }
        sim.advance_with(Duration::from_millis(10), |_, _| received += 1);
    }

    println!("{received} frames received in {}", cmd.duration);
    println!();

    let interface = sim.interface(ap).context("access point")?;
    println!(
        "{} peers known by {}, predictor {}",
        interface.registry().len(),
        interface.address(),
        cmd.predictor
    );
    for (peer, decision) in interface.registry().iter().zip(interface.decisions()) {
        println!(
            "  {}: mean snr {:>6.2}dB -> {}",
            peer.address(),
            peer.mean_snr().unwrap_or_default(),
            decision.mcs,
        );
    }
    println!();

    report::write_registry_summary(
        &mut io::stdout().lock(),
        interface.registry(),
        Some(cmd.samples),
    )?;

    Ok(())
}
