//! CSV summaries of a [`PeerRegistry`].
//!
//! Writers take any [`io::Write`]; [`append_beacon_records`] opens one
//! file per slot, named `{prefix}{slot}{suffix}`, and appends to it.
//! Missing beacon values are written as empty fields.

use crate::peer::{PeerRecord, PeerRegistry};
use csv::{Writer, WriterBuilder};
use std::{
    fs::OpenOptions,
    io::{self, Write},
};
use tracing::debug;

/// column names of the beacon records
pub const BEACON_HEADER: [&str; 2] = ["beaconTime", "beaconRxPower"];

const PEER_HEADER: [&str; 4] = [
    "address",
    "sample_capacity",
    "last_beacon_time",
    "last_beacon_rx_power",
];
const SAMPLE_HEADER: [&str; 4] = ["end_time", "snr", "rx_power", "bandwidth"];

/// write `peer` and, at most, its `sample_limit` most recent samples.
///
/// ```text
/// address,sample_capacity,last_beacon_time,last_beacon_rx_power
/// 02:00:00:00:00:01,4,0.102400,-61.5
/// end_time,snr,rx_power,bandwidth
/// 0.001000,24.5,-69.47,20
/// ```
pub fn write_peer_summary<W: Write>(
    writer: &mut W,
    peer: &PeerRecord,
    sample_limit: Option<usize>,
) -> io::Result<()> {
    let mut csv = csv_writer(writer);

    csv.write_record(PEER_HEADER)?;
    let [beacon_time, beacon_rx_power] = beacon_fields(peer);
    csv.write_record([
        peer.address().to_string(),
        peer.sample_capacity().to_string(),
        beacon_time,
        beacon_rx_power,
    ])?;

    csv.write_record(SAMPLE_HEADER)?;
    let skip = sample_limit.map_or(0, |limit| peer.len().saturating_sub(limit));
    for sample in peer.samples().skip(skip) {
        csv.write_record([
            seconds(sample.end_time.as_secs_f64()),
            sample.snr.to_string(),
            sample.rx_power.to_string(),
            sample.bandwidth.to_string(),
        ])?;
    }

    csv.flush()
}

/// [`write_peer_summary`] for every occupied slot, separated by a blank
/// line
pub fn write_registry_summary<W: Write>(
    writer: &mut W,
    registry: &PeerRegistry,
    sample_limit: Option<usize>,
) -> io::Result<()> {
    for (slot, peer) in registry.iter().enumerate() {
        if slot > 0 {
            writeln!(writer)?;
        }
        write_peer_summary(writer, peer, sample_limit)?;
    }
    Ok(())
}

/// one beacon record per occupied slot, in slot order, with a header
pub fn write_beacon_records<W: Write>(writer: &mut W, registry: &PeerRegistry) -> io::Result<()> {
    let mut csv = csv_writer(writer);
    csv.write_record(BEACON_HEADER)?;
    for peer in registry {
        csv.write_record(beacon_fields(peer))?;
    }
    csv.flush()
}

/// append the beacon record of every occupied slot `i` to the file
/// `{prefix}{i}{suffix}`, creating it with a header if needed
pub fn append_beacon_records(
    registry: &PeerRegistry,
    prefix: &str,
    suffix: &str,
) -> io::Result<()> {
    for (slot, peer) in registry.iter().enumerate() {
        let path = format!("{prefix}{slot}{suffix}");
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut csv = csv_writer(file);
        if is_new {
            csv.write_record(BEACON_HEADER)?;
        }
        csv.write_record(beacon_fields(peer))?;
        csv.flush()?;
        debug!(%path, address = %peer.address(), "beacon record appended");
    }
    Ok(())
}

/// the summaries mix sections of different widths
fn csv_writer<W: Write>(writer: W) -> Writer<W> {
    WriterBuilder::new().flexible(true).from_writer(writer)
}

fn beacon_fields(peer: &PeerRecord) -> [String; 2] {
    [
        peer.last_beacon_time()
            .map(|time| seconds(time.as_secs_f64()))
            .unwrap_or_default(),
        peer.last_beacon_rx_power()
            .map(|power| power.to_string())
            .unwrap_or_default(),
    ]
}

fn seconds(secs: f64) -> String {
    format!("{secs:.6}")
}
