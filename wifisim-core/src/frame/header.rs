use crate::address::Mac48Address;
use std::fmt;
use thiserror::Error;

/// Traffic identifier of a QoS data frame (`0..=7`).
///
/// ```
/// # use wifisim_core::frame::Tid;
/// let tid = Tid::new(6).unwrap();
/// assert_eq!(tid.into_u8(), 6);
/// assert!(Tid::new(8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tid(u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Traffic identifier must be in 0..=7, got {0}")]
pub struct TidError(pub u8);

/// Selects which of the header's address fields a lookup applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// receiver address
    Addr1,
    /// transmitter address
    Addr2,
    /// BSSID
    Addr3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Beacon,
    Management,
    Data,
    QosData { tid: Tid },
}

/// The classification part of a frame: who it is for, who sent it and
/// to which traffic class it belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacHeader {
    kind: FrameKind,
    addr1: Mac48Address,
    addr2: Mac48Address,
    addr3: Mac48Address,
    sequence: u16,
}

impl Tid {
    pub const BEST_EFFORT: Self = Self(0);
    pub const BACKGROUND: Self = Self(1);
    pub const VIDEO: Self = Self(5);
    pub const VOICE: Self = Self(6);

    pub const fn new(tid: u8) -> Result<Self, TidError> {
        if tid < 8 { Ok(Self(tid)) } else { Err(TidError(tid)) }
    }

    #[inline]
    pub const fn into_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Tid {
    type Error = TidError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FrameKind {
    /// numeric tag carried in the reception attributes
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Beacon => 0,
            Self::Management => 1,
            Self::Data => 2,
            Self::QosData { .. } => 3,
        }
    }
}

impl MacHeader {
    pub fn new(kind: FrameKind, addr1: Mac48Address, addr2: Mac48Address) -> Self {
        Self {
            kind,
            addr1,
            addr2,
            addr3: Mac48Address::ZERO,
            sequence: 0,
        }
    }

    /// a non QoS data frame from `from` to `to`
    pub fn data(to: Mac48Address, from: Mac48Address) -> Self {
        Self::new(FrameKind::Data, to, from)
    }

    /// a QoS data frame of the given traffic class
    pub fn qos_data(to: Mac48Address, from: Mac48Address, tid: Tid) -> Self {
        Self::new(FrameKind::QosData { tid }, to, from)
    }

    /// a beacon, always sent to the broadcast address
    pub fn beacon(from: Mac48Address) -> Self {
        Self::new(FrameKind::Beacon, Mac48Address::BROADCAST, from).with_addr3(from)
    }

    pub fn with_addr3(mut self, bssid: Mac48Address) -> Self {
        self.addr3 = bssid;
        self
    }

    pub fn with_sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    #[inline]
    pub fn addr1(&self) -> Mac48Address {
        self.addr1
    }

    #[inline]
    pub fn addr2(&self) -> Mac48Address {
        self.addr2
    }

    #[inline]
    pub fn addr3(&self) -> Mac48Address {
        self.addr3
    }

    pub fn address(&self, address_type: AddressType) -> Mac48Address {
        match address_type {
            AddressType::Addr1 => self.addr1,
            AddressType::Addr2 => self.addr2,
            AddressType::Addr3 => self.addr3,
        }
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    #[inline]
    pub fn is_beacon(&self) -> bool {
        matches!(self.kind, FrameKind::Beacon)
    }

    #[inline]
    pub fn is_qos_data(&self) -> bool {
        matches!(self.kind, FrameKind::QosData { .. })
    }

    /// the traffic identifier, only for QoS data frames
    pub fn qos_tid(&self) -> Option<Tid> {
        match self.kind {
            FrameKind::QosData { tid } => Some(tid),
            _ => None,
        }
    }
}
