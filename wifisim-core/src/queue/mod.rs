//! Bounded FIFO of frames waiting for the medium.
//!
//! Frames are evicted either because the queue is full when they arrive
//! ([`DropReason::SizeExceeded`]) or because they waited too long
//! ([`DropReason::DelayExceeded`]). Every eviction is reported to the
//! subscribed [`DropObserver`]s.
//!
//! The queue has no clock of its own: every operation that may evict a
//! frame takes the current simulated time.

mod blocked;
mod observer;

pub use self::{
    blocked::BlockedDestinations,
    observer::{DropCounter, DropEvent, DropObserver, DropReason},
};
use crate::{
    address::Mac48Address,
    context::FrameContext,
    defaults::{DEFAULT_QUEUE_MAX_DELAY, DEFAULT_QUEUE_MAX_SIZE},
    frame::{AddressType, Frame, FrameId, MacHeader, Tid},
    stats::QueueStats,
    time::{Delay, SimTime},
};
use std::{collections::VecDeque, fmt, sync::Arc};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_size: usize,
    pub max_delay: Delay,
}

/// A frame held by a [`RateQueue`] along with its classification.
pub struct QueueItem<T> {
    frame: Arc<Frame<T>>,
    header: MacHeader,
    enqueued_at: SimTime,
    context: FrameContext,
    /// `false` for frames put back at the head with
    /// [`RateQueue::push_front`]; those precede every ordered entry
    ordered: bool,
}

/// # Per interface transmit queue
///
/// ```
/// # use wifisim_core::{Frame, FrameIdGenerator, MacHeader, Mac48Address, SimTime};
/// # use wifisim_core::queue::{QueueConfig, RateQueue};
/// # use wifisim_core::time::Delay;
/// # use std::{sync::Arc, time::Duration};
/// let ids = FrameIdGenerator::new();
/// let header = MacHeader::data(Mac48Address::BROADCAST, Mac48Address::new([2, 0, 0, 0, 0, 1]));
/// let mut queue = RateQueue::new(QueueConfig {
///     max_size: 10,
///     max_delay: Delay::from_millis(500),
/// });
///
/// let frame = Arc::new(Frame::builder(&ids).data("hello").build().unwrap());
/// assert!(queue.enqueue(SimTime::ZERO, frame, header));
///
/// let late = SimTime::ZERO + Duration::from_millis(600);
/// assert!(queue.dequeue(late).is_none());
/// ```
pub struct RateQueue<T> {
    queue: VecDeque<QueueItem<T>>,
    max_size: usize,
    max_delay: Delay,
    observers: Vec<Box<dyn DropObserver<T>>>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_QUEUE_MAX_SIZE,
            max_delay: DEFAULT_QUEUE_MAX_DELAY,
        }
    }
}

impl<T> QueueItem<T> {
    #[inline]
    pub fn frame(&self) -> &Arc<Frame<T>> {
        &self.frame
    }

    #[inline]
    pub fn header(&self) -> &MacHeader {
        &self.header
    }

    #[inline]
    pub fn enqueued_at(&self) -> SimTime {
        self.enqueued_at
    }

    #[inline]
    pub fn context(&self) -> FrameContext {
        self.context
    }

    pub fn into_parts(self) -> (Arc<Frame<T>>, MacHeader, FrameContext) {
        (self.frame, self.header, self.context)
    }

    fn is_expired(&self, now: SimTime, max_delay: Delay) -> bool {
        self.enqueued_at + max_delay.into_duration() <= now
    }

    fn matches(&self, tid: Tid, address_type: AddressType, address: Mac48Address) -> bool {
        self.header.qos_tid() == Some(tid) && self.header.address(address_type) == address
    }

    /// non QoS frames are never blocked
    fn is_available(&self, blocked: &BlockedDestinations) -> bool {
        match self.header.qos_tid() {
            Some(tid) => !blocked.is_blocked(self.header.addr1(), tid),
            None => true,
        }
    }
}

impl<T> fmt::Debug for QueueItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueItem")
            .field("frame", &self.frame.id())
            .field("header", &self.header)
            .field("enqueued_at", &self.enqueued_at)
            .field("context", &self.context)
            .finish()
    }
}

impl<T> RateQueue<T> {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            max_size: config.max_size,
            max_delay: config.max_delay,
            observers: Vec::new(),
        }
    }

    /// change the capacity. Frames already held are kept even if they
    /// now exceed it.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    pub fn set_max_delay(&mut self, max_delay: Delay) {
        self.max_delay = max_delay;
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub fn max_delay(&self) -> Delay {
        self.max_delay
    }

    /// register an observer for every future drop
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: DropObserver<T> + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// append a frame at the tail, without context.
    ///
    /// See [`RateQueue::enqueue_with_context`].
    pub fn enqueue(&mut self, now: SimTime, frame: Arc<Frame<T>>, header: MacHeader) -> bool {
        self.enqueue_with_context(now, frame, header, FrameContext::EMPTY)
    }

    /// append a frame at the tail.
    ///
    /// Expired frames are evicted first. Returns `false` if the queue is
    /// still full, in which case the new frame is dropped with
    /// [`DropReason::SizeExceeded`].
    pub fn enqueue_with_context(
        &mut self,
        now: SimTime,
        frame: Arc<Frame<T>>,
        header: MacHeader,
        context: FrameContext,
    ) -> bool {
        self.insert(now, frame, header, context, true)
    }

    /// put a frame back at the head, typically for a retransmission.
    ///
    /// The same admission rule as [`RateQueue::enqueue`] applies.
    pub fn push_front(&mut self, now: SimTime, frame: Arc<Frame<T>>, header: MacHeader) -> bool {
        self.insert(now, frame, header, FrameContext::EMPTY, false)
    }

    fn insert(
        &mut self,
        now: SimTime,
        frame: Arc<Frame<T>>,
        header: MacHeader,
        context: FrameContext,
        ordered: bool,
    ) -> bool {
        self.cleanup(now);

        if self.queue.len() >= self.max_size {
            debug!(
                frame = %frame.id(),
                max_size = self.max_size,
                "queue full, frame dropped"
            );
            self.notify(DropEvent::new(now, DropReason::SizeExceeded, frame, header));
            return false;
        }

        let item = QueueItem {
            frame,
            header,
            enqueued_at: now,
            context,
            ordered,
        };
        if ordered {
            self.queue.push_back(item);
        } else {
            self.queue.push_front(item);
        }
        true
    }

    /// evict every frame that waited at least the maximum delay.
    ///
    /// Returns the number of evicted frames. Calling it twice with the
    /// same `now` evicts nothing the second time.
    pub fn cleanup(&mut self, now: SimTime) -> usize {
        let mut evicted = 0;
        let mut index = 0;

        while index < self.queue.len() {
            let item = &self.queue[index];
            if !item.is_expired(now, self.max_delay) {
                if item.ordered {
                    // ordered entries are in enqueue order, the rest is younger
                    break;
                }
                index += 1;
                continue;
            }

            if let Some(item) = self.queue.remove(index) {
                debug!(
                    frame = %item.frame.id(),
                    enqueued_at = %item.enqueued_at,
                    "frame waited too long, dropped"
                );
                self.notify(DropEvent::new(
                    now,
                    DropReason::DelayExceeded,
                    item.frame,
                    item.header,
                ));
                evicted += 1;
            }
        }

        evicted
    }

    pub fn dequeue(&mut self, now: SimTime) -> Option<QueueItem<T>> {
        self.cleanup(now);
        self.queue.pop_front()
    }

    pub fn peek(&mut self, now: SimTime) -> Option<&QueueItem<T>> {
        self.cleanup(now);
        self.queue.front()
    }

    /// remove the first QoS frame of traffic class `tid` whose
    /// `address_type` field equals `address`
    pub fn dequeue_by_tid_and_address(
        &mut self,
        now: SimTime,
        tid: Tid,
        address_type: AddressType,
        address: Mac48Address,
    ) -> Option<QueueItem<T>> {
        self.cleanup(now);
        let index = self
            .queue
            .iter()
            .position(|item| item.matches(tid, address_type, address))?;
        self.queue.remove(index)
    }

    pub fn peek_by_tid_and_address(
        &mut self,
        now: SimTime,
        tid: Tid,
        address_type: AddressType,
        address: Mac48Address,
    ) -> Option<&QueueItem<T>> {
        self.cleanup(now);
        self.queue
            .iter()
            .find(|item| item.matches(tid, address_type, address))
    }

    /// the first frame, QoS or not, whose `address_type` field equals
    /// `address`
    pub fn peek_by_address(
        &mut self,
        now: SimTime,
        address_type: AddressType,
        address: Mac48Address,
    ) -> Option<&QueueItem<T>> {
        self.cleanup(now);
        self.queue
            .iter()
            .find(|item| item.header.address(address_type) == address)
    }

    pub fn count_by_tid_and_address(
        &mut self,
        now: SimTime,
        tid: Tid,
        address_type: AddressType,
        address: Mac48Address,
    ) -> usize {
        self.cleanup(now);
        self.queue
            .iter()
            .filter(|item| item.matches(tid, address_type, address))
            .count()
    }

    /// remove the first frame not addressed to a blocked
    /// (receiver, traffic identifier) pair
    pub fn dequeue_first_available(
        &mut self,
        now: SimTime,
        blocked: &BlockedDestinations,
    ) -> Option<QueueItem<T>> {
        self.cleanup(now);
        let index = self
            .queue
            .iter()
            .position(|item| item.is_available(blocked))?;
        self.queue.remove(index)
    }

    pub fn peek_first_available(
        &mut self,
        now: SimTime,
        blocked: &BlockedDestinations,
    ) -> Option<&QueueItem<T>> {
        self.peek_available(now, blocked, 0)
    }

    /// the available frame coming after `skip` other available frames
    pub fn peek_available(
        &mut self,
        now: SimTime,
        blocked: &BlockedDestinations,
        skip: usize,
    ) -> Option<&QueueItem<T>> {
        self.cleanup(now);
        self.queue
            .iter()
            .filter(|item| item.is_available(blocked))
            .nth(skip)
    }

    /// remove the frame with the given identifier, without notification.
    ///
    /// Returns `false` if no such frame is queued.
    pub fn remove(&mut self, id: FrameId) -> bool {
        let Some(index) = self.queue.iter().position(|item| item.frame.id() == id) else {
            return false;
        };
        self.queue.remove(index);
        true
    }

    /// discard every frame, without notification
    pub fn flush(&mut self) {
        self.queue.clear();
    }

    /// number of frames held, expired ones included
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// evict the expired frames then tell whether anything is left
    pub fn is_empty_at(&mut self, now: SimTime) -> bool {
        self.cleanup(now);
        self.queue.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            len: self.queue.len(),
            max_size: self.max_size,
            max_delay: self.max_delay,
        }
    }

    fn notify(&mut self, event: DropEvent<T>) {
        for observer in self.observers.iter_mut() {
            observer.frame_dropped(&event);
        }
    }
}

impl<T> Default for RateQueue<T> {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameIdGenerator;
    use std::{sync::mpsc, time::Duration};

    const STA: Mac48Address = Mac48Address::new([2, 0, 0, 0, 0, 1]);
    const X: Mac48Address = Mac48Address::new([2, 0, 0, 0, 0, 0x0a]);
    const Y: Mac48Address = Mac48Address::new([2, 0, 0, 0, 0, 0x0b]);

    fn at(millis: u64) -> SimTime {
        SimTime::ZERO + Duration::from_millis(millis)
    }

    fn queue(max_size: usize) -> RateQueue<&'static str> {
        RateQueue::new(QueueConfig {
            max_size,
            max_delay: Delay::from_millis(500),
        })
    }

    struct Frames(FrameIdGenerator);

    impl Frames {
        fn new() -> Self {
            Self(FrameIdGenerator::new())
        }

        fn next(&self, data: &'static str) -> Arc<Frame<&'static str>> {
            Arc::new(Frame::builder(&self.0).data(data).build().unwrap())
        }
    }

    fn qos(to: Mac48Address, tid: Tid) -> MacHeader {
        MacHeader::qos_data(to, STA, tid)
    }

    fn watch(queue: &mut RateQueue<&'static str>) -> mpsc::Receiver<DropEvent<&'static str>> {
        let (sender, receiver) = mpsc::channel();
        queue.subscribe(move |event: &DropEvent<&'static str>| {
            let _ = sender.send(event.clone());
        });
        receiver
    }

    #[test]
    fn size_and_delay_evictions() {
        let frames = Frames::new();
        let mut queue = queue(2);
        let drops = watch(&mut queue);
        let header = MacHeader::data(X, STA);

        assert!(queue.enqueue(at(0), frames.next("F1"), header));
        assert!(queue.enqueue(at(100), frames.next("F2"), header));
        assert!(!queue.enqueue(at(200), frames.next("F3"), header));

        let event = drops.try_recv().expect("F3 should have been dropped");
        assert_eq!(event.reason, DropReason::SizeExceeded);
        assert_eq!(*event.frame.data(), "F3");
        assert_eq!(queue.len(), 2);

        assert!(queue.dequeue(at(600)).is_none());

        let evicted: Vec<_> = drops.try_iter().collect();
        assert_eq!(evicted.len(), 2);
        assert!(evicted.iter().all(|e| e.reason == DropReason::DelayExceeded));
        assert_eq!(*evicted[0].frame.data(), "F1");
        assert_eq!(*evicted[1].frame.data(), "F2");
        assert_eq!(evicted[0].time, at(600));
    }

    #[test]
    fn frame_expires_at_exactly_max_delay() {
        let frames = Frames::new();
        let mut queue = queue(4);

        queue.enqueue(at(0), frames.next("F1"), MacHeader::data(X, STA));

        assert!(queue.peek(at(499)).is_some());
        assert!(queue.peek(at(500)).is_none());
    }

    #[test]
    fn cleanup_is_idempotent() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let header = MacHeader::data(X, STA);

        queue.enqueue(at(0), frames.next("F1"), header);
        queue.enqueue(at(300), frames.next("F2"), header);

        assert_eq!(queue.cleanup(at(600)), 1);
        assert_eq!(queue.cleanup(at(600)), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn fifo_order() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let header = MacHeader::data(X, STA);

        for data in ["A", "B", "C"] {
            queue.enqueue(at(0), frames.next(data), header);
        }

        let order: Vec<_> = std::iter::from_fn(|| queue.dequeue(at(1)))
            .map(|item| *item.frame().data())
            .collect();
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn push_front_goes_first() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let header = MacHeader::data(X, STA);

        queue.enqueue(at(0), frames.next("A"), header);
        queue.push_front(at(10), frames.next("R"), header);

        assert_eq!(queue.peek(at(10)).map(|i| *i.frame().data()), Some("R"));
    }

    #[test]
    fn push_front_entry_does_not_shield_expired_frames() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let header = MacHeader::data(X, STA);

        queue.enqueue(at(0), frames.next("old"), header);
        queue.push_front(at(400), frames.next("retry"), header);

        assert_eq!(queue.cleanup(at(600)), 1);
        assert_eq!(queue.peek(at(600)).map(|i| *i.frame().data()), Some("retry"));
        assert_eq!(queue.cleanup(at(900)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn push_front_respects_capacity() {
        let frames = Frames::new();
        let mut queue = queue(1);
        let drops = watch(&mut queue);
        let header = MacHeader::data(X, STA);

        queue.enqueue(at(0), frames.next("A"), header);

        assert!(!queue.push_front(at(0), frames.next("R"), header));
        assert_eq!(drops.try_recv().map(|e| e.reason), Ok(DropReason::SizeExceeded));
    }

    #[test]
    fn empty_blocked_set_behaves_like_dequeue() {
        let frames = Frames::new();
        let mut a = queue(4);
        let mut b = queue(4);
        let blocked = BlockedDestinations::new();

        for (data, header) in [
            ("A", qos(X, Tid::VOICE)),
            ("B", MacHeader::data(Y, STA)),
            ("C", qos(Y, Tid::BEST_EFFORT)),
        ] {
            let frame = frames.next(data);
            a.enqueue(at(0), Arc::clone(&frame), header);
            b.enqueue(at(0), frame, header);
        }

        loop {
            let left = a.dequeue(at(1)).map(|i| i.frame().id());
            let right = b.dequeue_first_available(at(1), &blocked).map(|i| i.frame().id());
            assert_eq!(left, right);
            if left.is_none() {
                break;
            }
        }
    }

    #[test]
    fn blocked_destination_is_skipped() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let mut blocked = BlockedDestinations::new();
        blocked.block(X, Tid::VOICE);

        queue.enqueue(at(0), frames.next("A"), qos(X, Tid::VOICE));
        queue.enqueue(at(0), frames.next("B"), qos(X, Tid::VIDEO));
        queue.enqueue(at(0), frames.next("C"), MacHeader::data(X, STA));

        assert_eq!(
            queue
                .peek_first_available(at(1), &blocked)
                .map(|i| *i.frame().data()),
            Some("B")
        );
        let item = queue.dequeue_first_available(at(1), &blocked);
        assert_eq!(item.map(|i| *i.frame().data()), Some("B"));
        let item = queue.dequeue_first_available(at(1), &blocked);
        assert_eq!(item.map(|i| *i.frame().data()), Some("C"));
        assert!(queue.dequeue_first_available(at(1), &blocked).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn later_frames_to_a_blocked_destination_stay_queued() {
        let frames = Frames::new();
        let mut queue = queue(4);
        let mut blocked = BlockedDestinations::new();

        queue.enqueue(at(0), frames.next("A"), qos(X, Tid::VOICE));
        queue.enqueue(at(0), frames.next("B"), qos(Y, Tid::VOICE));
        queue.enqueue(at(0), frames.next("C"), qos(X, Tid::VOICE));
        blocked.block(X, Tid::VOICE);

        let item = queue.dequeue_first_available(at(1), &blocked);
        assert_eq!(item.map(|i| *i.frame().data()), Some("B"));
        assert!(queue.dequeue_first_available(at(1), &blocked).is_none());

        assert_eq!(queue.len(), 2);
        let item = queue.dequeue(at(1));
        assert_eq!(item.map(|i| *i.frame().data()), Some("A"));
        let item = queue.dequeue(at(1));
        assert_eq!(item.map(|i| *i.frame().data()), Some("C"));
    }

    #[test]
    fn peek_available_skips_eligible_frames() {
        let frames = Frames::new();
        let mut queue = queue(8);
        let mut blocked = BlockedDestinations::new();
        blocked.block(Y, Tid::VOICE);

        queue.enqueue(at(0), frames.next("A"), qos(X, Tid::VOICE));
        queue.enqueue(at(0), frames.next("B"), qos(Y, Tid::VOICE));
        queue.enqueue(at(0), frames.next("C"), qos(X, Tid::VOICE));

        let data = |item: Option<&QueueItem<&'static str>>| item.map(|i| *i.frame().data());
        assert_eq!(data(queue.peek_available(at(1), &blocked, 0)), Some("A"));
        assert_eq!(data(queue.peek_available(at(1), &blocked, 1)), Some("C"));
        assert_eq!(data(queue.peek_available(at(1), &blocked, 2)), None);
    }

    #[test]
    fn lookups_by_tid_and_address() {
        let frames = Frames::new();
        let mut queue = queue(8);

        queue.enqueue(at(0), frames.next("A"), qos(X, Tid::VOICE));
        queue.enqueue(at(0), frames.next("B"), qos(Y, Tid::VOICE));
        queue.enqueue(at(0), frames.next("C"), qos(X, Tid::VOICE));
        queue.enqueue(at(0), frames.next("D"), MacHeader::data(X, STA));

        let voice_to_x = |queue: &mut RateQueue<_>| {
            queue.count_by_tid_and_address(at(1), Tid::VOICE, AddressType::Addr1, X)
        };
        assert_eq!(voice_to_x(&mut queue), 2);
        assert_eq!(
            queue.count_by_tid_and_address(at(1), Tid::VOICE, AddressType::Addr2, STA),
            3
        );
        assert_eq!(
            queue
                .peek_by_tid_and_address(at(1), Tid::VOICE, AddressType::Addr1, Y)
                .map(|i| *i.frame().data()),
            Some("B")
        );

        let item = queue.dequeue_by_tid_and_address(at(1), Tid::VOICE, AddressType::Addr1, X);
        assert_eq!(item.map(|i| *i.frame().data()), Some("A"));
        assert_eq!(voice_to_x(&mut queue), 1);
        assert!(
            queue
                .dequeue_by_tid_and_address(at(1), Tid::VIDEO, AddressType::Addr1, X)
                .is_none()
        );
    }

    #[test]
    fn peek_by_address_includes_non_qos() {
        let frames = Frames::new();
        let mut queue = queue(8);

        queue.enqueue(at(0), frames.next("A"), MacHeader::data(Y, STA));
        queue.enqueue(at(0), frames.next("B"), qos(X, Tid::VOICE));

        let item = queue.peek_by_address(at(1), AddressType::Addr1, Y);
        assert_eq!(item.map(|i| *i.frame().data()), Some("A"));
        assert!(queue.peek_by_address(at(1), AddressType::Addr1, STA).is_none());
    }

    #[test]
    fn remove_and_flush_do_not_notify() {
        let frames = Frames::new();
        let mut queue = queue(8);
        let drops = watch(&mut queue);
        let header = MacHeader::data(X, STA);

        let frame = frames.next("A");
        let id = frame.id();
        queue.enqueue(at(0), frame, header);
        queue.enqueue(at(0), frames.next("B"), header);

        assert!(queue.remove(id));
        assert!(!queue.remove(id));
        assert_eq!(queue.len(), 1);

        queue.flush();
        assert!(queue.is_empty());
        assert!(drops.try_recv().is_err());
    }

    #[test]
    fn context_follows_the_frame() {
        let frames = Frames::new();
        let mut queue = queue(8);

        queue.enqueue_with_context(
            at(0),
            frames.next("A"),
            MacHeader::data(X, STA),
            FrameContext::new(STA),
        );

        let item = queue.dequeue(at(1)).expect("A should still be queued");
        assert_eq!(item.context().source(), Some(STA));
        assert_eq!(item.enqueued_at(), at(0));
    }

    #[test]
    fn drop_counter_counts_per_reason() {
        let frames = Frames::new();
        let mut queue = queue(1);
        let counter = DropCounter::new();
        queue.subscribe(counter.clone());
        let header = MacHeader::data(X, STA);

        queue.enqueue(at(0), frames.next("A"), header);
        queue.enqueue(at(0), frames.next("B"), header);
        assert!(queue.is_empty_at(at(500)));

        assert_eq!(counter.size_exceeded(), 1);
        assert_eq!(counter.delay_exceeded(), 1);
        assert_eq!(counter.total(), 2);
    }

    #[test]
    fn shrinking_keeps_held_frames() {
        let frames = Frames::new();
        let mut queue = queue(3);
        let header = MacHeader::data(X, STA);

        for data in ["A", "B", "C"] {
            queue.enqueue(at(0), frames.next(data), header);
        }
        queue.set_max_size(1);

        assert_eq!(queue.len(), 3);
        assert!(!queue.enqueue(at(0), frames.next("D"), header));
        assert_eq!(queue.stats().max_size, 1);
    }
}
