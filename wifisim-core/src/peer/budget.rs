use crate::defaults::{
    DEFAULT_MAX_PEERS, DEFAULT_REGISTRY_BUDGET, PEER_MEMORY_OVERHEAD, REGISTRY_MEMORY_OVERHEAD,
    SAMPLE_MEMORY_COST,
};

/// Sizing parameters of a [`PeerRegistry`].
///
/// ```
/// # use wifisim_core::peer::RegistryConfig;
/// let config = RegistryConfig::with_samples_per_peer(4, 10);
/// let budget = config.budget();
///
/// assert_eq!(budget.max_peers, 4);
/// assert_eq!(budget.samples_per_peer, 10);
/// ```
///
/// [`PeerRegistry`]: crate::peer::PeerRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    total_budget: u64,
    max_peers: usize,
}

/// The per-peer figures derived from a [`RegistryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryBudget {
    pub max_peers: usize,
    /// bytes available to each peer slot
    pub per_peer_bytes: u64,
    /// number of samples each peer retains
    pub samples_per_peer: usize,
}

/// Share `total_budget` between `max_peers` slots, once the fixed
/// overhead of the registry has been taken out.
///
/// ```
/// # use wifisim_core::peer::per_peer_budget;
/// assert_eq!(per_peer_budget(1_112, 10), 100);
/// assert_eq!(per_peer_budget(100, 10), 0);
/// assert_eq!(per_peer_budget(1_112, 0), 0);
/// ```
pub fn per_peer_budget(total_budget: u64, max_peers: usize) -> u64 {
    if max_peers == 0 {
        return 0;
    }
    total_budget.saturating_sub(REGISTRY_MEMORY_OVERHEAD) / max_peers as u64
}

/// Number of samples a peer slot of `per_peer_bytes` can retain.
pub fn sample_capacity(per_peer_bytes: u64) -> usize {
    let samples = per_peer_bytes.saturating_sub(PEER_MEMORY_OVERHEAD) / SAMPLE_MEMORY_COST;
    usize::try_from(samples).unwrap_or(usize::MAX)
}

impl RegistryConfig {
    pub fn new(total_budget: u64, max_peers: usize) -> Self {
        Self {
            total_budget,
            max_peers,
        }
    }

    /// the smallest configuration retaining `samples_per_peer` samples
    /// for each of `max_peers` peers
    pub fn with_samples_per_peer(max_peers: usize, samples_per_peer: usize) -> Self {
        Self::new(
            Self::required_budget(max_peers, samples_per_peer),
            max_peers,
        )
    }

    /// inverse of [`per_peer_budget`] and [`sample_capacity`]
    pub fn required_budget(max_peers: usize, samples_per_peer: usize) -> u64 {
        let per_peer = PEER_MEMORY_OVERHEAD
            .saturating_add((samples_per_peer as u64).saturating_mul(SAMPLE_MEMORY_COST));
        REGISTRY_MEMORY_OVERHEAD.saturating_add(per_peer.saturating_mul(max_peers as u64))
    }

    #[inline]
    pub fn total_budget(&self) -> u64 {
        self.total_budget
    }

    #[inline]
    pub fn max_peers(&self) -> usize {
        self.max_peers
    }

    pub fn budget(&self) -> RegistryBudget {
        let per_peer_bytes = per_peer_budget(self.total_budget, self.max_peers);

        RegistryBudget {
            max_peers: self.max_peers,
            per_peer_bytes,
            samples_per_peer: sample_capacity(per_peer_bytes),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_BUDGET, DEFAULT_MAX_PEERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_below_overhead_leaves_nothing() {
        let budget = RegistryConfig::new(REGISTRY_MEMORY_OVERHEAD - 1, 4).budget();

        assert_eq!(budget.per_peer_bytes, 0);
        assert_eq!(budget.samples_per_peer, 0);
    }

    #[test]
    fn slot_without_room_for_samples() {
        assert_eq!(sample_capacity(PEER_MEMORY_OVERHEAD), 0);
        assert_eq!(sample_capacity(PEER_MEMORY_OVERHEAD + SAMPLE_MEMORY_COST - 1), 0);
        assert_eq!(sample_capacity(PEER_MEMORY_OVERHEAD + SAMPLE_MEMORY_COST), 1);
    }

    #[test]
    fn required_budget_round_trips() {
        for (peers, samples) in [(1, 1), (2, 8), (32, 100)] {
            let budget = RegistryConfig::with_samples_per_peer(peers, samples).budget();
            assert_eq!(budget.max_peers, peers);
            assert_eq!(budget.samples_per_peer, samples);
        }
    }

    #[test]
    fn default_configuration() {
        let budget = RegistryConfig::default().budget();

        assert_eq!(budget.max_peers, DEFAULT_MAX_PEERS);
        assert_eq!(budget.per_peer_bytes, (64 * 1_024 - 112) / 32);
        assert_eq!(budget.samples_per_peer, (2_044 - 64) / 32);
    }
}
