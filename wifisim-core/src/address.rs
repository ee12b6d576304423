use std::{fmt, str};
use thiserror::Error;

/// A 48-bit IEEE 802 hardware address.
///
/// ```
/// # use wifisim_core::Mac48Address;
/// let address: Mac48Address = "00:0c:29:3e:5b:01".parse().unwrap();
/// assert_eq!(address.to_string(), "00:0c:29:3e:5b:01");
/// assert!(!address.is_broadcast());
/// assert!(Mac48Address::BROADCAST.is_broadcast());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(C)]
pub struct Mac48Address([u8; 6]);

/// Hands out unique, locally administered unicast addresses.
///
/// Addresses start at `02:00:00:00:00:01` and increase by one on every
/// call to [`Mac48Allocator::allocate`].
#[derive(Debug, Clone, Default)]
pub struct Mac48Allocator {
    last: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Expecting 6 octets separated by `:' or `-', found {found}")]
    InvalidLength { found: usize },
    #[error("Invalid octet `{0}'")]
    InvalidOctet(String),
}

impl Mac48Address {
    pub const ZERO: Self = Self([0; 6]);
    pub const BROADCAST: Self = Self([0xff; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    #[inline]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// group (multicast or broadcast) addresses have the lowest bit of
    /// their first octet set.
    #[inline]
    pub fn is_group(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }

    fn from_u64(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        let mut octets = [0; 6];
        octets.copy_from_slice(&bytes[2..]);
        Self(octets)
    }
}

impl Mac48Allocator {
    /// first address allocated, in the locally administered range
    const BASE: u64 = 0x02_00_00_00_00_00;

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the allocated address is unique and would be lost"]
    pub fn allocate(&mut self) -> Mac48Address {
        self.last += 1;
        Mac48Address::from_u64(Self::BASE | (self.last & 0x00_ff_ff_ff_ff_ff))
    }
}

impl From<[u8; 6]> for Mac48Address {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl str::FromStr for Mac48Address {
    type Err = AddressParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(AddressParseError::InvalidLength { found: parts.len() });
        }

        let mut octets = [0; 6];
        for (octet, part) in octets.iter_mut().zip(parts) {
            if part.len() != 2 {
                return Err(AddressParseError::InvalidOctet(part.to_owned()));
            }
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| AddressParseError::InvalidOctet(part.to_owned()))?;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for Mac48Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
impl fmt::UpperHex for Mac48Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}
