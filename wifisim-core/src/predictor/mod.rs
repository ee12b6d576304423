//! Rate prediction from per-peer telemetry.
//!
//! A [`Predictor`] is fed one [`PeerRecord`] at a time: it first extracts
//! its features with [`Predictor::set_features`], then produces a
//! [`RateDecision`] with [`Predictor::predict`]. The record is only
//! borrowed for the duration of the call; a predictor keeps derived
//! values, never the record.

mod ewma;
mod fixed;
mod mcs;
mod snr_threshold;

pub use self::{
    ewma::{EwmaParameterError, EwmaSnr},
    fixed::FixedRate,
    mcs::{Mcs, McsParseError},
    snr_threshold::SnrThreshold,
};
use crate::peer::{PeerRecord, PeerRegistry};
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::trace;

/// The rate to use towards one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateDecision {
    pub mcs: Mcs,
    /// the scheme is being tried out rather than derived from the
    /// measurements
    pub probing: bool,
}

pub trait Predictor {
    fn name(&self) -> &'static str;

    fn set_features(&mut self, peer: &PeerRecord);

    /// decide from the features of the last [`Predictor::set_features`]
    /// call. Without any measurement the decision is [`Mcs::MIN`].
    fn predict(&mut self, peer: &PeerRecord) -> RateDecision;

    fn adapt(&mut self, peer: &PeerRecord) -> RateDecision {
        self.set_features(peer);
        self.predict(peer)
    }
}

/// Selects one of the predictors shipped with the crate.
///
/// ```
/// # use wifisim_core::predictor::{Mcs, PredictorKind};
/// let kind: PredictorKind = "fixed:4".parse().unwrap();
/// assert_eq!(kind, PredictorKind::Fixed(Mcs::new(4).unwrap()));
/// assert_eq!(kind.to_string(), "fixed:4");
///
/// assert_eq!("ewma".parse(), Ok(PredictorKind::Ewma));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PredictorKind {
    Fixed(Mcs),
    #[default]
    SnrThreshold,
    Ewma,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictorParseError {
    #[error("Unknown predictor `{0}', expecting `fixed:<mcs>', `snr-threshold' or `ewma'")]
    Unknown(String),
    #[error("Invalid fixed rate: {0}")]
    Fixed(#[from] McsParseError),
}

impl RateDecision {
    pub fn measured(mcs: Mcs) -> Self {
        Self {
            mcs,
            probing: false,
        }
    }
}

impl PredictorKind {
    /// build the predictor. `seed` only matters to predictors drawing
    /// random numbers.
    pub fn build(self, seed: u64) -> Box<dyn Predictor> {
        match self {
            Self::Fixed(mcs) => Box::new(FixedRate::new(mcs)),
            Self::SnrThreshold => Box::new(SnrThreshold::default()),
            Self::Ewma => Box::new(EwmaSnr::with_seed(seed)),
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(mcs) => write!(f, "fixed:{}", mcs.index()),
            Self::SnrThreshold => f.write_str("snr-threshold"),
            Self::Ewma => f.write_str("ewma"),
        }
    }
}

impl FromStr for PredictorKind {
    type Err = PredictorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "snr-threshold" => Ok(Self::SnrThreshold),
            "ewma" => Ok(Self::Ewma),
            other => match other.strip_prefix("fixed:") {
                Some(mcs) => Ok(Self::Fixed(mcs.parse()?)),
                None => Err(PredictorParseError::Unknown(s.to_owned())),
            },
        }
    }
}

/// run `predictor` over every occupied slot of `registry`.
///
/// The decision for the peer in slot `i` is at index `i`.
pub fn predict_registry(
    predictor: &mut dyn Predictor,
    registry: &PeerRegistry,
) -> Vec<RateDecision> {
    registry
        .iter()
        .map(|peer| {
            let decision = predictor.adapt(peer);
            trace!(
                predictor = predictor.name(),
                address = %peer.address(),
                mcs = %decision.mcs,
                probing = decision.probing,
                "rate predicted"
            );
            decision
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        address::Mac48Address,
        context::{FrameContext, Sample},
        peer::RegistryConfig,
        time::SimTime,
    };

    #[test]
    fn parse_kinds() {
        assert_eq!("snr-threshold".parse(), Ok(PredictorKind::SnrThreshold));
        assert_eq!(
            "fixed:mcs2".parse(),
            Ok(PredictorKind::Fixed(Mcs::new(2).unwrap()))
        );
        assert_eq!(
            "fixed:9".parse::<PredictorKind>(),
            Err(PredictorParseError::Fixed(McsParseError::OutOfRange(9)))
        );
        assert_eq!(
            "minstrel".parse::<PredictorKind>(),
            Err(PredictorParseError::Unknown("minstrel".to_owned()))
        );
    }

    #[test]
    fn one_decision_per_slot() {
        let mut registry =
            PeerRegistry::new(RegistryConfig::with_samples_per_peer(4, 4)).unwrap();
        for (last, snr) in [(1, 30.0), (2, 3.0)] {
            let peer = Mac48Address::new([2, 0, 0, 0, 0, last]);
            let sample = Sample::new(SimTime::ZERO, snr, -60.0, 20.0);
            registry.add_or_update(&FrameContext::with_sample(peer, sample));
        }
        let mut predictor = PredictorKind::SnrThreshold.build(0);

        let decisions = predict_registry(predictor.as_mut(), &registry);

        assert_eq!(decisions.len(), 2);
        assert!(decisions[0].mcs > decisions[1].mcs);
    }
}
