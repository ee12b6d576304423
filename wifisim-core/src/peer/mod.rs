//! Per-peer telemetry and the bounded registry holding it.

mod budget;
mod registry;

pub use self::{
    budget::{RegistryBudget, RegistryConfig, per_peer_budget, sample_capacity},
    registry::{AddOutcome, PeerRegistry, RegistryError},
};
use crate::{address::Mac48Address, context::Sample, time::SimTime};
use std::collections::{VecDeque, vec_deque};

/// What is known about one neighbouring station.
///
/// Samples live in a ring of fixed capacity: once full, recording a new
/// sample overwrites the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRecord {
    address: Mac48Address,
    sample_capacity: usize,
    samples: VecDeque<Sample>,
    last_beacon_time: Option<SimTime>,
    last_beacon_rx_power: Option<f64>,
}

impl PeerRecord {
    pub fn new(address: Mac48Address, sample_capacity: usize) -> Self {
        Self {
            address,
            sample_capacity,
            samples: VecDeque::new(),
            last_beacon_time: None,
            last_beacon_rx_power: None,
        }
    }

    #[inline]
    pub fn address(&self) -> Mac48Address {
        self.address
    }

    #[inline]
    pub fn sample_capacity(&self) -> usize {
        self.sample_capacity
    }

    pub fn add_data(&mut self, sample: Sample) {
        if self.sample_capacity == 0 {
            return;
        }
        if self.samples.len() == self.sample_capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn update_beacon_time(&mut self, time: SimTime) {
        self.last_beacon_time = Some(time);
    }

    pub fn record_beacon(&mut self, time: SimTime, rx_power: f64) {
        self.last_beacon_time = Some(time);
        self.last_beacon_rx_power = Some(rx_power);
    }

    /// retained samples, oldest first
    pub fn samples(&self) -> vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    #[inline]
    pub fn last_beacon_time(&self) -> Option<SimTime> {
        self.last_beacon_time
    }

    #[inline]
    pub fn last_beacon_rx_power(&self) -> Option<f64> {
        self.last_beacon_rx_power
    }

    pub fn mean_snr(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.snr).sum();
        Some(sum / self.samples.len() as f64)
    }
}

impl PartialEq<Mac48Address> for PeerRecord {
    fn eq(&self, other: &Mac48Address) -> bool {
        self.address == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEER: Mac48Address = Mac48Address::new([2, 0, 0, 0, 0, 1]);

    fn sample(snr: f64) -> Sample {
        Sample::new(SimTime::from_nanos(snr as u64), snr, -60.0, 20.0)
    }

    #[test]
    fn ring_keeps_most_recent_samples() {
        let mut peer = PeerRecord::new(PEER, 3);

        for snr in 1..=5 {
            peer.add_data(sample(snr as f64));
        }

        let snrs: Vec<f64> = peer.samples().map(|s| s.snr).collect();
        assert_eq!(snrs, vec![3.0, 4.0, 5.0]);
        assert_eq!(peer.latest().map(|s| s.snr), Some(5.0));
        assert_eq!(peer.mean_snr(), Some(4.0));
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut peer = PeerRecord::new(PEER, 0);
        peer.add_data(sample(10.0));

        assert!(peer.is_empty());
        assert!(peer.latest().is_none());
        assert!(peer.mean_snr().is_none());
    }

    #[test]
    fn beacon_information() {
        let mut peer = PeerRecord::new(PEER, 1);
        assert_eq!(peer.last_beacon_time(), None);

        peer.update_beacon_time(SimTime::from_nanos(10));
        assert_eq!(peer.last_beacon_time(), Some(SimTime::from_nanos(10)));
        assert_eq!(peer.last_beacon_rx_power(), None);

        peer.record_beacon(SimTime::from_nanos(20), -42.0);
        assert_eq!(peer.last_beacon_time(), Some(SimTime::from_nanos(20)));
        assert_eq!(peer.last_beacon_rx_power(), Some(-42.0));
    }

    #[test]
    fn compares_with_its_address() {
        let peer = PeerRecord::new(PEER, 1);
        assert!(peer == PEER);
        assert!(peer != Mac48Address::BROADCAST);
    }
}
