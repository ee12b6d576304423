use crate::{context::Sample, time::Delay};

/// Default maximum number of frames held by a [`RateQueue`].
///
/// When the queue holds this many frames any new frame is dropped.
///
/// [`RateQueue`]: crate::queue::RateQueue
pub const DEFAULT_QUEUE_MAX_SIZE: usize = 400;

/// Default maximum time a frame may wait in a [`RateQueue`].
///
/// ```
/// # use wifisim_core::defaults::*;
/// assert_eq!(
///     DEFAULT_QUEUE_MAX_DELAY.to_string(),
///     "500ms"
/// );
/// ```
///
/// [`RateQueue`]: crate::queue::RateQueue
pub const DEFAULT_QUEUE_MAX_DELAY: Delay = Delay::from_millis(500);

/// Default memory budget handed to a [`PeerRegistry`], in bytes.
///
/// [`PeerRegistry`]: crate::peer::PeerRegistry
pub const DEFAULT_REGISTRY_BUDGET: u64 = 64 * 1_024;

/// Default maximum number of peers tracked by a [`PeerRegistry`].
///
/// [`PeerRegistry`]: crate::peer::PeerRegistry
pub const DEFAULT_MAX_PEERS: usize = 32;

/// Bytes accounted to the registry itself before the budget is shared
/// between peer slots.
pub const REGISTRY_MEMORY_OVERHEAD: u64 = 112;

/// Bytes accounted to one peer record, samples excluded.
pub const PEER_MEMORY_OVERHEAD: u64 = 64;

/// Bytes accounted to one retained telemetry [`Sample`].
///
/// ```
/// # use wifisim_core::defaults::*;
/// assert_eq!(SAMPLE_MEMORY_COST, 32);
/// ```
pub const SAMPLE_MEMORY_COST: u64 = std::mem::size_of::<Sample>() as u64;

/// Default beacon interval: 100 time units of 1024µs.
///
/// ```
/// # use wifisim_core::defaults::*;
/// assert_eq!(
///     DEFAULT_BEACON_INTERVAL.to_string(),
///     "102ms400us"
/// );
/// ```
pub const DEFAULT_BEACON_INTERVAL: Delay = Delay::from_micros(102_400);

/// Default period between two rate adaptation sweeps.
pub const DEFAULT_ADAPTATION_INTERVAL: Delay = Delay::from_millis(100);

/// Default transmission power, in dBm.
pub const DEFAULT_TX_POWER_DBM: f64 = 16.0206;

/// Default thermal noise floor of a 20MHz receiver with a 7dB noise
/// figure, in dBm.
pub const DEFAULT_NOISE_FLOOR_DBM: f64 = -93.97;

/// Default channel width, in MHz.
pub const DEFAULT_CHANNEL_WIDTH_MHZ: f64 = 20.0;

/// Default channel number every PHY is attached to.
pub const DEFAULT_CHANNEL_NUMBER: u8 = 1;
