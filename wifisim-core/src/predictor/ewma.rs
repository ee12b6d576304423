use super::{Mcs, Predictor, RateDecision};
use crate::peer::PeerRecord;
use rand_chacha::ChaChaRng;
use rand_core::{Rng, SeedableRng as _};
use thiserror::Error;

/// Exponentially weighted moving average of the retained SNR samples,
/// with occasional probing of the next faster scheme.
pub struct EwmaSnr {
    alpha: f64,
    probe_rate: f64,
    rng: ChaChaRng,
    smoothed: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum EwmaParameterError {
    #[error("Smoothing factor must be in (0, 1], got {0}")]
    Alpha(f64),
    #[error("Probe rate must be in [0, 1], got {0}")]
    ProbeRate(f64),
}

impl EwmaSnr {
    pub const DEFAULT_ALPHA: f64 = 0.25;
    pub const DEFAULT_PROBE_RATE: f64 = 0.1;

    /// # Errors
    ///
    /// if `alpha` is not in `(0, 1]` or `probe_rate` not in `[0, 1]`
    pub fn new(alpha: f64, probe_rate: f64, seed: u64) -> Result<Self, EwmaParameterError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(EwmaParameterError::Alpha(alpha));
        }
        if !(0.0..=1.0).contains(&probe_rate) {
            return Err(EwmaParameterError::ProbeRate(probe_rate));
        }

        Ok(Self::build(alpha, probe_rate, seed))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(Self::DEFAULT_ALPHA, Self::DEFAULT_PROBE_RATE, seed)
    }

    fn build(alpha: f64, probe_rate: f64, seed: u64) -> Self {
        Self {
            alpha,
            probe_rate,
            rng: ChaChaRng::seed_from_u64(seed),
            smoothed: None,
        }
    }

    fn should_probe(&mut self) -> bool {
        let bits = self.rng.next_u64();
        let sample = (bits as f64) * (1.0 / (u64::MAX as f64 + 1.0));
        sample < self.probe_rate
    }
}

impl Predictor for EwmaSnr {
    fn name(&self) -> &'static str {
        "ewma"
    }

    fn set_features(&mut self, peer: &PeerRecord) {
        let alpha = self.alpha;
        self.smoothed = peer.samples().map(|sample| sample.snr).reduce(|average, snr| {
            alpha * snr + (1.0 - alpha) * average
        });
    }

    fn predict(&mut self, _peer: &PeerRecord) -> RateDecision {
        let Some(smoothed) = self.smoothed else {
            return RateDecision::measured(Mcs::MIN);
        };
        let mcs = Mcs::highest_for_snr(smoothed);

        if self.should_probe()
            && let Some(faster) = mcs.next()
        {
            return RateDecision {
                mcs: faster,
                probing: true,
            };
        }

        RateDecision::measured(mcs)
    }
}
