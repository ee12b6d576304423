//! Simulated clock values.
//!
//! [`SimTime`] is an absolute point on the simulated clock and [`Delay`]
//! is a configurable interval (queue age bound, beacon period...) that
//! can be written in a human friendly form such as `"102ms400us"`.

use logos::{Lexer, Logos};
use std::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;

/// A point in simulated time, with nanosecond resolution.
///
/// The clock starts at [`SimTime::ZERO`] and only moves forward: the
/// event loop hands out nondecreasing values to every callback.
///
/// ```
/// # use wifisim_core::time::SimTime;
/// # use std::time::Duration;
/// let t = SimTime::ZERO + Duration::from_millis(600);
/// assert_eq!(t.saturating_since(SimTime::ZERO), Duration::from_millis(600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(u64);

/// A duration, precise up to the micro second.
///
/// # Default [`Delay`]
///
/// ```
/// # use wifisim_core::time::Delay;
/// assert_eq!(Delay::default().to_string(), "0ms");
/// ```
///
/// # Parsing
///
/// ```
/// # use wifisim_core::time::Delay;
/// # use std::time::Duration;
/// let delay: Delay = "102ms 400us".parse().unwrap();
/// assert_eq!(delay.into_duration(), Duration::from_micros(102_400));
/// assert_eq!(delay.to_string(), "102ms400us");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Delay(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DelayParseError {
    #[error("Cannot parse an empty duration")]
    Empty,
    #[error("Unexpected input `{0}'")]
    Unexpected(String),
    #[error("Expecting a number, found `{0}'")]
    MissingValue(String),
    #[error("Expecting a unit (ns, us, ms, s, m) after `{0}'")]
    MissingUnit(String),
    #[error("Value `{0}' is too large")]
    OutOfRange(String),
}

impl SimTime {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    #[inline]
    pub const fn from_duration(since_start: Duration) -> Self {
        Self(since_start.as_nanos() as u64)
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// time elapsed since the beginning of the simulation
    #[inline]
    pub fn since_start(self) -> Duration {
        Duration::from_nanos(self.0)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.since_start().as_secs_f64()
    }

    /// Returns the time elapsed between `earlier` and `self`, or
    /// [`Duration::ZERO`] if `earlier` is in the future.
    #[inline]
    pub fn saturating_since(self, earlier: SimTime) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> Self::Output {
        let nanos = u64::try_from(rhs.as_nanos()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(nanos))
    }
}

impl AddAssign<Duration> for SimTime {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{:.6}s", self.as_secs_f64())
    }
}

impl Delay {
    pub const ZERO: Self = Self(0);

    /// create a new delay with the given [`Duration`].
    ///
    /// # truncation
    ///
    /// Nano seconds are truncated:
    ///
    /// ```
    /// # use wifisim_core::time::Delay;
    /// # use std::time::Duration;
    /// let delay = Delay::new(Duration::from_nanos(987_654_321));
    /// assert_eq!(delay.into_duration(), Duration::from_micros(987_654));
    /// ```
    #[inline(always)]
    pub const fn new(duration: Duration) -> Self {
        Self(duration.as_micros() as u64)
    }

    #[inline(always)]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    #[inline(always)]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000))
    }

    #[inline(always)]
    pub fn into_duration(self) -> Duration {
        Duration::from_micros(self.0)
    }
}

impl From<Delay> for Duration {
    fn from(value: Delay) -> Self {
        value.into_duration()
    }
}
impl From<Duration> for Delay {
    fn from(value: Duration) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0ms");
        }

        let secs = self.0 / 1_000_000;
        let millis = (self.0 / 1_000) % 1_000;
        let micros = self.0 % 1_000;

        if secs > 0 {
            write!(f, "{secs}s")?;
        }
        if millis > 0 {
            write!(f, "{millis}ms")?;
        }
        if micros > 0 {
            write!(f, "{micros}us")?;
        }
        Ok(())
    }
}

impl FromStr for Delay {
    type Err = DelayParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Self::new)
    }
}

fn parse_duration(s: &str) -> Result<Duration, DelayParseError> {
    let mut lex: Lexer<'_, Token> = Token::lexer(s);
    let mut total = Duration::ZERO;
    let mut parsed_any = false;

    while let Some(next) = lex.next() {
        let token = next.map_err(|()| DelayParseError::Unexpected(lex.slice().to_owned()))?;
        if token != Token::Value {
            return Err(DelayParseError::MissingValue(lex.slice().to_owned()));
        }
        let value = lex.slice().to_owned();
        let number: u64 = value
            .parse()
            .map_err(|_| DelayParseError::OutOfRange(value.clone()))?;

        let unit = match lex.next() {
            Some(Ok(unit)) => unit,
            Some(Err(())) => return Err(DelayParseError::Unexpected(lex.slice().to_owned())),
            None => return Err(DelayParseError::MissingUnit(value)),
        };
        let part = match unit {
            Token::NanoSeconds => Duration::from_nanos(number),
            Token::MicroSeconds => Duration::from_micros(number),
            Token::MilliSeconds => Duration::from_millis(number),
            Token::Seconds => Duration::from_secs(number),
            Token::Minutes => Duration::from_secs(number.saturating_mul(60)),
            Token::Value => return Err(DelayParseError::MissingUnit(value)),
        };

        total = total.saturating_add(part);
        parsed_any = true;
    }

    if parsed_any {
        Ok(total)
    } else {
        Err(DelayParseError::Empty)
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum Token {
    #[token("ns")]
    NanoSeconds,
    #[regex("us|μs|µs")]
    MicroSeconds,
    #[token("ms")]
    MilliSeconds,
    #[token("s")]
    Seconds,
    #[token("m")]
    Minutes,

    #[regex("[0-9]+")]
    Value,
}
