//! Out-of-band metadata travelling next to a frame.
//!
//! A [`FrameContext`] is never part of the payload. It is copied at every
//! hand-off (queue, channel, receiving interface) and is either *empty*
//! or carries the frame's source address and a telemetry [`Sample`].
//! Accessors return [`Option`]s so an empty context can never be read as
//! if it held valid telemetry.
//!
//! The destination index is only known when the channel fans a frame out
//! to its receivers: [`FrameContext::stamp`] turns a context into a
//! [`StampedContext`], the only type carrying that index.

use crate::{address::Mac48Address, channel::NodeIndex, time::SimTime};

/// One channel-quality measurement attributed to a peer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// time at which the measured frame finished arriving
    pub end_time: SimTime,
    /// signal to noise ratio, in dB
    pub snr: f64,
    /// received power, in dBm
    pub rx_power: f64,
    /// channel width the frame was received on, in MHz
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext(Option<Telemetry>);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Telemetry {
    source: Mac48Address,
    sample: Sample,
}

/// A non-empty [`FrameContext`] that has been addressed to one receiver.
///
/// Exactly one is produced per (sender, receiver) pair and transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedContext {
    telemetry: Telemetry,
    destination: NodeIndex,
}

impl Sample {
    pub fn new(end_time: SimTime, snr: f64, rx_power: f64, bandwidth: f64) -> Self {
        Self {
            end_time,
            snr,
            rx_power,
            bandwidth,
        }
    }
}

impl FrameContext {
    pub const EMPTY: Self = Self(None);

    /// a context for a frame sent by `source`, not measured yet
    pub fn new(source: Mac48Address) -> Self {
        Self::with_sample(source, Sample::default())
    }

    pub fn with_sample(source: Mac48Address, sample: Sample) -> Self {
        Self(Some(Telemetry { source, sample }))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[inline]
    pub fn source(&self) -> Option<Mac48Address> {
        self.0.as_ref().map(|t| t.source)
    }

    #[inline]
    pub fn sample(&self) -> Option<&Sample> {
        self.0.as_ref().map(|t| &t.sample)
    }

    /// replace the carried sample with the values measured on reception.
    ///
    /// An empty context stays empty.
    #[must_use = "function does not modify the current value"]
    pub fn with_measurement(self, sample: Sample) -> Self {
        Self(self.0.map(|t| Telemetry { sample, ..t }))
    }

    /// address this context to the receiver at `destination`.
    ///
    /// Returns `None` for an empty context: nothing survives the hop
    /// and the receiver is reached by index only.
    pub fn stamp(self, destination: NodeIndex) -> Option<StampedContext> {
        self.0.map(|telemetry| StampedContext {
            telemetry,
            destination,
        })
    }
}

impl StampedContext {
    #[inline]
    pub fn destination(&self) -> NodeIndex {
        self.destination
    }

    #[inline]
    pub fn source(&self) -> Mac48Address {
        self.telemetry.source
    }

    /// the context as seen by the receiving interface
    #[inline]
    pub fn context(&self) -> FrameContext {
        FrameContext(Some(self.telemetry))
    }
}
