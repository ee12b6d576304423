use super::{Mcs, Predictor, RateDecision};
use crate::peer::PeerRecord;

/// Always the same scheme, whatever the measurements.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate {
    mcs: Mcs,
}

impl FixedRate {
    pub fn new(mcs: Mcs) -> Self {
        Self { mcs }
    }
}

impl Predictor for FixedRate {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn set_features(&mut self, _peer: &PeerRecord) {}

    fn predict(&mut self, _peer: &PeerRecord) -> RateDecision {
        RateDecision::measured(self.mcs)
    }
}
