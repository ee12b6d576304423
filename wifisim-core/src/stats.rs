//! Point-in-time snapshots of the MAC state.
//!
//! [`RegistryStats`] is obtained with [`PeerRegistry::stats`] and
//! [`QueueStats`] with [`RateQueue::stats`].
//!
//! [`PeerRegistry::stats`]: crate::peer::PeerRegistry::stats
//! [`RateQueue::stats`]: crate::queue::RateQueue::stats

use crate::{
    address::Mac48Address,
    peer::{PeerRecord, PeerRegistry},
    time::{Delay, SimTime},
};

/// Snapshot of statistics for a single peer slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerStats {
    /// The slot the peer occupies.
    pub slot: usize,
    /// The peer's hardware address.
    pub address: Mac48Address,
    /// Number of samples currently retained.
    pub samples: usize,
    /// Maximum number of samples retained.
    pub sample_capacity: usize,
    /// Mean SNR over the retained samples, in dB.
    pub mean_snr: Option<f64>,
    /// Time of the most recent beacon.
    pub last_beacon_time: Option<SimTime>,
    /// Received power of the most recent beacon, in dBm.
    pub last_beacon_rx_power: Option<f64>,
}

/// Snapshot of a whole registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryStats {
    /// Maximum number of peers.
    pub capacity: usize,
    /// Bytes available to each peer slot.
    pub per_peer_budget: u64,
    /// Occupied slots, in slot order.
    pub peers: Vec<PeerStats>,
}

/// Snapshot of a transmit queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    /// Frames currently held, expired ones not yet evicted included.
    pub len: usize,
    /// Maximum number of frames.
    pub max_size: usize,
    /// Maximum time a frame may wait.
    pub max_delay: Delay,
}

impl PeerStats {
    fn new(slot: usize, peer: &PeerRecord) -> Self {
        Self {
            slot,
            address: peer.address(),
            samples: peer.len(),
            sample_capacity: peer.sample_capacity(),
            mean_snr: peer.mean_snr(),
            last_beacon_time: peer.last_beacon_time(),
            last_beacon_rx_power: peer.last_beacon_rx_power(),
        }
    }
}

impl PeerRegistry {
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            capacity: self.capacity(),
            per_peer_budget: self.per_peer_budget(),
            peers: self
                .iter()
                .enumerate()
                .map(|(slot, peer)| PeerStats::new(slot, peer))
                .collect(),
        }
    }
}
