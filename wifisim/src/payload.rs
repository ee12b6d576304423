use wifisim_core::Data;

/// bytes accounted to the body of a beacon
pub const BEACON_BODY_BYTES: u64 = 64;

/// What a simulated frame carries on the air.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    /// generated by the interface every beacon interval
    Beacon,
    /// submitted with [`Simulation::send`](crate::Simulation::send)
    User(T),
}

impl<T> Payload<T> {
    pub fn user(&self) -> Option<&T> {
        match self {
            Self::Beacon => None,
            Self::User(data) => Some(data),
        }
    }
}

impl<T> Data for Payload<T>
where
    T: Data,
{
    fn bytes_size(&self) -> u64 {
        match self {
            Self::Beacon => BEACON_BODY_BYTES,
            Self::User(data) => data.bytes_size(),
        }
    }
}
