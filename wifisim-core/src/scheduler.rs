use crate::time::SimTime;
use core::cmp::Reverse;
use std::{collections::BinaryHeap, time::Duration};

/// Discrete event queue driving the simulated clock.
///
/// Events come out in time order. Events due at the same instant come out
/// in the order they were scheduled.
pub struct EventQueue<E> {
    map: BinaryHeap<Reverse<OrderedByTime<E>>>,
    next_sequence: u64,
    now: SimTime,
}

struct OrderedByTime<E> {
    time: SimTime,
    sequence: u64,
    event: E,
}

impl<E> OrderedByTime<E> {
    fn key(&self) -> (SimTime, u64) {
        (self.time, self.sequence)
    }
}

impl<E> PartialEq for OrderedByTime<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<E> Eq for OrderedByTime<E> {}

impl<E> PartialOrd for OrderedByTime<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for OrderedByTime<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            map: BinaryHeap::new(),
            next_sequence: 0,
            now: SimTime::ZERO,
        }
    }

    /// time of the last event popped, or the last time the clock was
    /// advanced to
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn time_to_next(&self) -> Option<SimTime> {
        self.map.peek().map(|v| v.0.time)
    }

    /// schedule `event` at `time`.
    ///
    /// A time in the past is moved to [`EventQueue::now`]: the clock
    /// never runs backward.
    pub fn schedule_at(&mut self, time: SimTime, event: E) {
        let time = time.max(self.now);
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.map.push(Reverse(OrderedByTime {
            time,
            sequence,
            event,
        }))
    }

    pub fn schedule_in(&mut self, delay: Duration, event: E) {
        self.schedule_at(self.now + delay, event)
    }

    pub fn pop_next(&mut self) -> Option<(SimTime, E)> {
        let Reverse(entry) = self.map.pop()?;
        self.now = self.now.max(entry.time);
        Some((entry.time, entry.event))
    }

    /// pop the next event only if it is due at or before `limit`
    pub fn pop_until(&mut self, limit: SimTime) -> Option<(SimTime, E)> {
        if self.time_to_next()? <= limit {
            self.pop_next()
        } else {
            None
        }
    }

    /// move the clock forward to `time` without processing anything
    pub fn advance_to(&mut self, time: SimTime) {
        self.now = self.now.max(time);
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(1);

    #[test]
    fn empty() {
        let mut c = EventQueue::<()>::new();

        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.pop_next().is_none());
        assert!(c.time_to_next().is_none());
        assert_eq!(c.now(), SimTime::ZERO);
    }

    #[test]
    fn entry() {
        let mut c = EventQueue::new();
        let due = SimTime::ZERO + DURATION;

        c.schedule_in(DURATION, "tick");

        assert_eq!(c.len(), 1);
        assert_eq!(c.time_to_next(), Some(due));
        assert!(c.pop_until(SimTime::ZERO).is_none());
        assert_eq!(c.pop_until(due + DURATION), Some((due, "tick")));
        assert_eq!(c.now(), due);
        assert!(c.is_empty());
    }

    #[test]
    fn same_time_events_keep_scheduling_order() {
        let mut c = EventQueue::new();
        let at = SimTime::ZERO + DURATION;

        c.schedule_at(at, 1);
        c.schedule_at(at + DURATION, 3);
        c.schedule_at(at, 2);

        let order: Vec<_> = std::iter::from_fn(|| c.pop_next()).map(|(_, e)| e).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn past_events_are_scheduled_now() {
        let mut c = EventQueue::new();
        c.advance_to(SimTime::ZERO + 2 * DURATION);

        c.schedule_at(SimTime::ZERO + DURATION, ());

        assert_eq!(c.time_to_next(), Some(SimTime::ZERO + 2 * DURATION));
    }
}
