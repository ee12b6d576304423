use super::{PeerRecord, RegistryBudget, RegistryConfig};
use crate::{address::Mac48Address, context::FrameContext, time::SimTime};
use std::collections::TryReserveError;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Memory shortage in {operation}: cannot reserve {slots} peer slots")]
    MemoryShortage {
        operation: &'static str,
        slots: usize,
        #[source]
        source: TryReserveError,
    },
}

/// What [`PeerRegistry::add_or_update`] did with a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// the context was empty or came from a group address
    Ignored,
    /// a new peer was registered in `slot`
    Created { slot: usize },
    /// the peer already lived in `slot`
    Updated { slot: usize },
    /// the peer is unknown and every slot is taken
    CapacityExhausted,
}

impl AddOutcome {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// `true` whenever the sample was stored, a new peer included
    pub fn updated(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Updated { .. })
    }

    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Created { slot } | Self::Updated { slot } => Some(*slot),
            Self::Ignored | Self::CapacityExhausted => None,
        }
    }
}

/// Fixed capacity table of the peers heard by one interface.
///
/// Slots are filled in order of first appearance and never move: the slot
/// index of a peer is stable until [`PeerRegistry::clear`]. Occupied slots
/// always form a prefix of the table.
///
/// ```
/// # use wifisim_core::{FrameContext, Mac48Address, SimTime, Sample};
/// # use wifisim_core::peer::{PeerRegistry, RegistryConfig};
/// let mut registry = PeerRegistry::new(RegistryConfig::with_samples_per_peer(2, 4)).unwrap();
/// let peer = Mac48Address::new([2, 0, 0, 0, 0, 1]);
/// let sample = Sample::new(SimTime::ZERO, 25.0, -70.0, 20.0);
///
/// assert!(registry.add_or_update(&FrameContext::with_sample(peer, sample)).created());
/// assert!(registry.add_or_update(&FrameContext::with_sample(peer, sample)).updated());
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.get(0).map(|p| p.len()), Some(2));
/// ```
#[derive(Debug)]
pub struct PeerRegistry {
    budget: RegistryBudget,
    peers: Vec<PeerRecord>,
}

impl PeerRegistry {
    /// reserve every slot up front.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MemoryShortage`] if the slots cannot be allocated.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let budget = config.budget();

        let mut peers = Vec::new();
        peers
            .try_reserve_exact(budget.max_peers)
            .map_err(|source| RegistryError::MemoryShortage {
                operation: "PeerRegistry::new",
                slots: budget.max_peers,
                source,
            })?;

        debug!(
            max_peers = budget.max_peers,
            per_peer_bytes = budget.per_peer_bytes,
            samples_per_peer = budget.samples_per_peer,
            "peer registry created"
        );

        Ok(Self { budget, peers })
    }

    /// record the telemetry carried by `context` against its source.
    ///
    /// An unknown source takes the first free slot. Contexts without
    /// telemetry, or coming from a group address, never create a peer.
    pub fn add_or_update(&mut self, context: &FrameContext) -> AddOutcome {
        let (Some(address), Some(sample)) = (context.source(), context.sample()) else {
            return AddOutcome::Ignored;
        };
        if address.is_group() {
            return AddOutcome::Ignored;
        }

        if let Some(slot) = self.slot_of(address) {
            self.peers[slot].add_data(*sample);
            trace!(%address, slot, snr = sample.snr, "peer updated");
            return AddOutcome::Updated { slot };
        }

        if self.peers.len() >= self.budget.max_peers {
            debug!(
                %address,
                max_peers = self.budget.max_peers,
                "peer registry full, sample dropped"
            );
            return AddOutcome::CapacityExhausted;
        }

        let slot = self.peers.len();
        let mut peer = PeerRecord::new(address, self.budget.samples_per_peer);
        peer.add_data(*sample);
        self.peers.push(peer);
        debug!(%address, slot, "peer created");

        AddOutcome::Created { slot }
    }

    /// set the last beacon time of every occupied slot
    pub fn update_beacon_time(&mut self, time: SimTime) {
        for peer in self.peers.iter_mut() {
            peer.update_beacon_time(time);
        }
    }

    /// record a beacon heard from `address`.
    ///
    /// Returns `false` if the peer is not registered.
    pub fn record_beacon(&mut self, address: Mac48Address, time: SimTime, rx_power: f64) -> bool {
        let Some(slot) = self.slot_of(address) else {
            return false;
        };
        self.peers[slot].record_beacon(time, rx_power);
        true
    }

    /// empty every slot, keeping the reserved memory
    pub fn clear(&mut self) {
        self.peers.clear();
    }

    pub fn get(&self, slot: usize) -> Option<&PeerRecord> {
        self.peers.get(slot)
    }

    pub fn get_by_address(&self, address: Mac48Address) -> Option<&PeerRecord> {
        self.peers.iter().find(|peer| **peer == address)
    }

    pub fn slot_of(&self, address: Mac48Address) -> Option<usize> {
        self.peers.iter().position(|peer| *peer == address)
    }

    /// occupied slots, in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, PeerRecord> {
        self.peers.iter()
    }

    /// number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.budget.max_peers
    }

    #[inline]
    pub fn per_peer_budget(&self) -> u64 {
        self.budget.per_peer_bytes
    }

    #[inline]
    pub fn sample_capacity(&self) -> usize {
        self.budget.samples_per_peer
    }

    #[inline]
    pub fn budget(&self) -> RegistryBudget {
        self.budget
    }
}

impl<'a> IntoIterator for &'a PeerRegistry {
    type Item = &'a PeerRecord;
    type IntoIter = std::slice::Iter<'a, PeerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
