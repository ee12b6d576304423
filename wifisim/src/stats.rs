//! Observability types for [`Simulation`].
//!
//! Obtain a snapshot via [`Simulation::stats`](crate::Simulation::stats).
//!
//! [`Simulation`]: crate::Simulation

pub use wifisim_core::stats::{PeerStats, QueueStats, RegistryStats};
use wifisim_core::{Mac48Address, NodeIndex, SimTime, predictor::RateDecision};

/// Statistics for a single interface of a [`Simulation`].
///
/// [`Simulation`]: crate::Simulation
#[derive(Debug, Clone)]
pub struct InterfaceStats {
    /// The interface's index on the channel.
    pub index: NodeIndex,
    /// The interface's hardware address.
    pub address: Mac48Address,
    /// Transmit queue occupancy.
    pub queue: QueueStats,
    /// Peers heard by this interface.
    pub registry: RegistryStats,
    /// Latest rate decisions, in slot order.
    pub decisions: Vec<RateDecision>,
    /// Frames dropped because the transmit queue was full.
    pub dropped_size_exceeded: u64,
    /// Frames dropped because they waited too long in the transmit queue.
    pub dropped_delay_exceeded: u64,
    /// Frames put on the air, beacons excluded.
    pub transmitted: u64,
    /// Frames addressed to this interface and received, beacons excluded.
    pub received: u64,
}

/// Point-in-time snapshot of the entire simulation.
#[derive(Debug, Clone)]
pub struct SimStats {
    /// Simulated time of the snapshot.
    pub now: SimTime,
    /// Per-interface statistics, in index order.
    pub interfaces: Vec<InterfaceStats>,
}
