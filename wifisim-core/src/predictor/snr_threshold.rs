use super::{Mcs, Predictor, RateDecision};
use crate::peer::PeerRecord;

/// Highest scheme whose minimum SNR, plus a safety margin, is met by the
/// latest sample.
#[derive(Debug, Clone, Copy)]
pub struct SnrThreshold {
    margin_db: f64,
    snr: Option<f64>,
}

impl SnrThreshold {
    pub const DEFAULT_MARGIN_DB: f64 = 3.0;

    pub fn new(margin_db: f64) -> Self {
        Self {
            margin_db,
            snr: None,
        }
    }
}

impl Default for SnrThreshold {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARGIN_DB)
    }
}

impl Predictor for SnrThreshold {
    fn name(&self) -> &'static str {
        "snr-threshold"
    }

    fn set_features(&mut self, peer: &PeerRecord) {
        self.snr = peer.latest().map(|sample| sample.snr);
    }

    fn predict(&mut self, _peer: &PeerRecord) -> RateDecision {
        let mcs = self
            .snr
            .map_or(Mcs::MIN, |snr| Mcs::highest_for_snr(snr - self.margin_db));
        RateDecision::measured(mcs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::Mac48Address, context::Sample, time::SimTime};

    fn peer(snrs: &[f64]) -> PeerRecord {
        let mut peer = PeerRecord::new(Mac48Address::new([2, 0, 0, 0, 0, 1]), 8);
        for &snr in snrs {
            peer.add_data(Sample::new(SimTime::ZERO, snr, -60.0, 20.0));
        }
        peer
    }

    #[test]
    fn no_samples_falls_back_to_lowest() {
        let mut predictor = SnrThreshold::default();
        assert_eq!(predictor.adapt(&peer(&[])).mcs, Mcs::MIN);
    }

    #[test]
    fn margin_is_applied_to_latest_sample() {
        let mut predictor = SnrThreshold::new(3.0);

        // 21 - 3 = 18dB
        let decision = predictor.adapt(&peer(&[40.0, 21.0]));

        assert_eq!(decision.mcs, Mcs::new(5).unwrap());
        assert!(!decision.probing);
    }

    #[test]
    fn features_do_not_leak_between_peers() {
        let mut predictor = SnrThreshold::new(0.0);

        assert_eq!(predictor.adapt(&peer(&[30.0])).mcs, Mcs::MAX);
        assert_eq!(predictor.adapt(&peer(&[])).mcs, Mcs::MIN);
    }
}
