use crate::{address::Mac48Address, frame::Tid};
use std::collections::HashSet;

/// (receiver, traffic identifier) pairs that may not be transmitted to
/// for now, typically while a block acknowledgment agreement is pending.
#[derive(Debug, Clone, Default)]
pub struct BlockedDestinations {
    blocked: HashSet<(Mac48Address, Tid)>,
}

impl BlockedDestinations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, destination: Mac48Address, tid: Tid) {
        self.blocked.insert((destination, tid));
    }

    pub fn unblock(&mut self, destination: Mac48Address, tid: Tid) {
        self.blocked.remove(&(destination, tid));
    }

    pub fn is_blocked(&self, destination: Mac48Address, tid: Tid) -> bool {
        self.blocked.contains(&(destination, tid))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }
}
