use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

/// HT modulation and coding scheme, single spatial stream (`0..=7`).
///
/// ```
/// # use wifisim_core::predictor::Mcs;
/// let mcs = Mcs::highest_for_snr(19.0);
/// assert_eq!(mcs.index(), 5);
/// assert_eq!(mcs.data_rate_bps(20.0), 52_000_000);
/// assert_eq!(mcs.data_rate_bps(40.0), 104_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mcs(u8);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum McsParseError {
    #[error("Invalid MCS `{0}'")]
    Invalid(String),
    #[error("MCS index must be in 0..=7, got {0}")]
    OutOfRange(u8),
}

/// minimum SNR (dB) for a tolerable error rate, per index
const MIN_SNR_DB: [f64; 8] = [2.0, 5.0, 9.0, 11.0, 15.0, 18.0, 20.0, 25.0];

/// data rates at 20MHz, long guard interval
const RATE_20MHZ_KBPS: [u64; 8] = [
    6_500, 13_000, 19_500, 26_000, 39_000, 52_000, 58_500, 65_000,
];

/// legacy preamble and HT-SIG
const PREAMBLE: Duration = Duration::from_micros(36);

impl Mcs {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(7);

    pub const fn new(index: u8) -> Result<Self, McsParseError> {
        if index <= Self::MAX.0 {
            Ok(Self(index))
        } else {
            Err(McsParseError::OutOfRange(index))
        }
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn min_snr(self) -> f64 {
        MIN_SNR_DB[self.0 as usize]
    }

    /// data rate on a channel `bandwidth_mhz` wide. Anything below 20MHz
    /// is accounted as 20MHz.
    pub fn data_rate_bps(self, bandwidth_mhz: f64) -> u64 {
        let scale = (bandwidth_mhz / 20.0).max(1.0);
        (RATE_20MHZ_KBPS[self.0 as usize] as f64 * 1_000.0 * scale) as u64
    }

    /// time on air of a frame of `bytes` bytes
    pub fn transmission_duration(self, bytes: u64, bandwidth_mhz: f64) -> Duration {
        let rate = self.data_rate_bps(bandwidth_mhz);
        let nanos = (bytes.saturating_mul(8) as u128 * 1_000_000_000) / rate as u128;
        PREAMBLE + Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// the fastest scheme decodable at `snr`, or [`Mcs::MIN`] if none is
    pub fn highest_for_snr(snr: f64) -> Self {
        (0..=Self::MAX.0)
            .rev()
            .map(Self)
            .find(|mcs| snr >= mcs.min_snr())
            .unwrap_or(Self::MIN)
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }
}

impl fmt::Display for Mcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MCS{}", self.0)
    }
}

impl FromStr for Mcs {
    type Err = McsParseError;

    /// accepts `3` or `MCS3`, case insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .get(..3)
            .filter(|prefix| prefix.eq_ignore_ascii_case("mcs"))
            .map_or(trimmed, |_| &trimmed[3..]);
        let index: u8 = digits
            .parse()
            .map_err(|_| McsParseError::Invalid(s.to_owned()))?;
        Self::new(index)
    }
}
