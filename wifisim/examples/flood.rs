//! Flood example: many stations sending random traffic to each other.
//!
//! Stations are scattered on a square around an access point. Every
//! millisecond each station picks a random destination with probability
//! `--load`. At the end, every station's peers and rate decisions are
//! summarised.
//!
//! Run with:
//!   cargo run --release --example flood -p wifisim -- --stations 20 --predictor ewma

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use wifisim::{Delay, Mac48Address, Position, PredictorKind, Simulation, Tid};

#[derive(Parser)]
struct Command {
    #[arg(long, default_value = "10")]
    stations: usize,

    /// side of the square the stations are scattered on, in meters
    #[arg(long, default_value = "60")]
    area: f64,

    /// probability for a station to send a frame every millisecond
    #[arg(long, default_value = "0.2")]
    load: f64,

    /// payload size, in bytes
    #[arg(long, default_value = "1500")]
    size: usize,

    #[arg(long, default_value = "snr-threshold")]
    predictor: PredictorKind,

    #[arg(long, default_value = "5s")]
    duration: Delay,

    #[arg(long, default_value = "0")]
    seed: u64,
}

const STEP: Duration = Duration::from_millis(1);
const TIDS: [Tid; 4] = [Tid::BACKGROUND, Tid::BEST_EFFORT, Tid::VIDEO, Tid::VOICE];

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cmd = Command::parse();
    let mut rng = StdRng::seed_from_u64(cmd.seed);

    let mut sim = Simulation::<Vec<u8>>::new();
    sim.set_seed(cmd.seed);

    let half = cmd.area / 2.0;
    sim.new_interface()
        .access_point()
        .set_predictor(cmd.predictor)
        .set_position(Position::new(half, half, 0.0))
        .build()?;
    for _ in 0..cmd.stations {
        let position = Position::new(
            rng.gen_range(0.0..=cmd.area),
            rng.gen_range(0.0..=cmd.area),
            0.0,
        );
        sim.new_interface()
            .set_predictor(cmd.predictor)
            .set_position(position)
            .build()?;
    }

    let nodes: Vec<_> = sim.interfaces().map(|i| (i.index(), i.address())).collect();

    let steps = cmd.duration.into_duration().as_millis() as u64;
    let pb = ProgressBar::new(steps);
    let mut sent = 0u64;
    let mut received = 0u64;
    for _ in 0..steps {
        for &(from, _) in &nodes {
            if !rng.gen_bool(cmd.load) {
                continue;
            }
            let to: Mac48Address = if rng.gen_bool(0.05) {
                Mac48Address::BROADCAST
            } else {
                let (index, address) = nodes[rng.gen_range(0..nodes.len())];
                if index == from {
                    continue;
                }
                address
            };
            let tid = TIDS[rng.gen_range(0..TIDS.len())];
            sim.send(from, to, Some(tid), vec![0; cmd.size])?;
            sent += 1;
        }
        sim.advance_with(STEP, |_, _| received += 1);
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let stats = sim.stats();
    println!(
        "{sent} frames sent, {received} received in {} ({})",
        cmd.duration, cmd.predictor
    );
    println!("index  address            peers  tx      rx      full    expired");
    for interface in &stats.interfaces {
        println!(
            "{:<6} {}  {:<6} {:<7} {:<7} {:<7} {}",
            interface.index.to_string(),
            interface.address,
            interface.registry.peers.len(),
            interface.transmitted,
            interface.received,
            interface.dropped_size_exceeded,
            interface.dropped_delay_exceeded,
        );
    }

    println!();
    let ap = &stats.interfaces[0];
    println!("rates picked by the access point {}:", ap.address);
    for (peer, decision) in ap.registry.peers.iter().zip(&ap.decisions) {
        println!(
            "  {} ({} samples, mean snr {:.2}dB): {}{}",
            peer.address,
            peer.samples,
            peer.mean_snr.unwrap_or_default(),
            decision.mcs,
            if decision.probing { " probing" } else { "" },
        );
    }

    Ok(())
}
