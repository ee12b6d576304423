//! Congestion example: saturate a transmit queue and observe the drops.
//!
//! The sender's queue is small and its voice traffic towards the receiver
//! is blocked. Voice frames pile up until they expire while best effort
//! frames keep flowing, and bursts larger than the queue are cut short.
//!
//! Run with:
//!   cargo run --example congestion -p wifisim

use anyhow::{Context as _, Result};
use clap::Parser;
use std::{collections::BTreeMap, sync::mpsc, time::Duration};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use wifisim::{Data, Delay, DropEvent, Payload, Position, Simulation, Tid};

// 1 KB payload
struct Chunk(#[allow(dead_code)] [u8; 1024]);

impl Data for Chunk {
    fn bytes_size(&self) -> u64 {
        1024
    }
}

#[derive(Parser)]
struct Command {
    #[arg(long, default_value = "16")]
    queue_size: usize,

    #[arg(long, default_value = "50ms")]
    max_delay: Delay,

    /// frames sent per burst and traffic class
    #[arg(long, default_value = "24")]
    burst: usize,

    #[arg(long, default_value = "10")]
    bursts: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cmd = Command::parse();

    let mut sim = Simulation::<Chunk>::new();
    let sender = sim
        .new_interface()
        .set_queue_max_size(cmd.queue_size)
        .set_queue_max_delay(cmd.max_delay)
        .build()?;
    let receiver = sim
        .new_interface()
        .set_position(Position::new(20.0, 0.0, 0.0))
        .build()?;
    let to = sim.interface(receiver).context("receiver")?.address();

    let (drops, dropped) = mpsc::channel();
    sim.subscribe_drops(sender, move |event: &DropEvent<Payload<Chunk>>| {
        let _ = drops.send((event.reason, event.header.qos_tid()));
    })?;

    sim.block(sender, to, Tid::VOICE)?;

    println!(
        "Sending {} bursts of {} voice and {} best effort frames through a queue of {}...",
        cmd.bursts, cmd.burst, cmd.burst, cmd.queue_size
    );

    let mut received = 0usize;
    for _ in 0..cmd.bursts {
        for _ in 0..cmd.burst {
            sim.send(sender, to, Some(Tid::VOICE), Chunk([0; 1024]))?;
            sim.send(sender, to, Some(Tid::BEST_EFFORT), Chunk([0; 1024]))?;
        }
        sim.advance_with(Duration::from_millis(20), |_, _| received += 1);
    }

    let mut reasons = BTreeMap::new();
    for (reason, tid) in dropped.try_iter() {
        let tid = tid.map_or_else(|| "-".to_owned(), |tid| tid.to_string());
        *reasons.entry((format!("{reason:?}"), tid)).or_insert(0usize) += 1;
    }

    let stats = sim.stats();
    let sender = &stats.interfaces[sender.into_usize()];
    println!("Transmitted: {}", sender.transmitted);
    println!("Received: {received}");
    println!("Dropped (queue full): {}", sender.dropped_size_exceeded);
    println!("Dropped (expired): {}", sender.dropped_delay_exceeded);
    println!("Still queued: {}", sender.queue.len);
    for ((reason, tid), count) in reasons {
        println!("  {reason} tid {tid}: {count}");
    }

    Ok(())
}
