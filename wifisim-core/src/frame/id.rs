use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// a generator for monotonicaly increasing **unique** [`FrameId`]
///
/// Cloning the generator shares the counter, so every interface of a
/// simulation can hand out identifiers without collision.
#[derive(Debug, Clone)]
pub struct FrameIdGenerator(Arc<AtomicU64>);

/// # [`Frame`] Identifier
///
/// Uniquely identifies a frame for as long as it lives in the
/// simulation. It is the identity used by [`RateQueue::remove`].
///
/// [`Frame`]: crate::frame::Frame
/// [`RateQueue::remove`]: crate::queue::RateQueue::remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

impl FrameIdGenerator {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU64::new(1)))
    }

    /// generate a new unique identifier
    pub fn generate(&self) -> FrameId {
        let id = self.0.fetch_add(1, Ordering::Relaxed);

        debug_assert!(
            id != 0,
            "the generator wrapped around after handing out `u64::MAX` identifiers"
        );

        FrameId(id)
    }
}

impl Default for FrameIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameId {
    #[inline]
    pub fn into_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_identifier_is_one() {
        let generator = FrameIdGenerator::new();
        let id = generator.generate();

        assert_eq!(id.into_u64(), 1);
        assert_eq!(id.to_string(), "0x0000000000000001");
    }

    #[test]
    fn clones_share_the_counter() {
        let generator = FrameIdGenerator::new();
        let shared = generator.clone();

        let a = generator.generate();
        let b = shared.generate();
        let c = generator.generate();

        assert!(a < b);
        assert!(b < c);
    }
}
