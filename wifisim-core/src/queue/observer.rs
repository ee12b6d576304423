use crate::{
    frame::{Frame, MacHeader},
    time::SimTime,
};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// the queue was full when the frame arrived
    SizeExceeded,
    /// the frame waited longer than the queue's maximum delay
    DelayExceeded,
}

/// Notification of a frame leaving a queue without being transmitted.
pub struct DropEvent<T> {
    pub time: SimTime,
    pub reason: DropReason,
    pub frame: Arc<Frame<T>>,
    pub header: MacHeader,
}

/// Receives the [`DropEvent`]s of a [`RateQueue`].
///
/// Any `FnMut(&DropEvent<T>)` closure is an observer:
///
/// ```
/// # use wifisim_core::queue::{DropEvent, RateQueue};
/// # use std::sync::mpsc;
/// let (sender, receiver) = mpsc::channel();
/// let mut queue = RateQueue::<()>::default();
/// queue.subscribe(move |event: &DropEvent<()>| {
///     let _ = sender.send(event.clone());
/// });
/// # drop(receiver);
/// ```
///
/// [`RateQueue`]: crate::queue::RateQueue
pub trait DropObserver<T> {
    fn frame_dropped(&mut self, event: &DropEvent<T>);
}

/// Counts drops per [`DropReason`].
///
/// Clones share the same counters: keep one and hand the other to the
/// queue.
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    size_exceeded: Arc<AtomicU64>,
    delay_exceeded: Arc<AtomicU64>,
}

impl<T> DropEvent<T> {
    pub(crate) fn new(
        time: SimTime,
        reason: DropReason,
        frame: Arc<Frame<T>>,
        header: MacHeader,
    ) -> Self {
        Self {
            time,
            reason,
            frame,
            header,
        }
    }
}

impl<T> Clone for DropEvent<T> {
    fn clone(&self) -> Self {
        Self {
            time: self.time,
            reason: self.reason,
            frame: Arc::clone(&self.frame),
            header: self.header,
        }
    }
}

impl<T> fmt::Debug for DropEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropEvent")
            .field("time", &self.time)
            .field("reason", &self.reason)
            .field("frame", &self.frame.id())
            .field("header", &self.header)
            .finish()
    }
}

impl<T, F> DropObserver<T> for F
where
    F: FnMut(&DropEvent<T>),
{
    fn frame_dropped(&mut self, event: &DropEvent<T>) {
        self(event)
    }
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size_exceeded(&self) -> u64 {
        self.size_exceeded.load(Ordering::Relaxed)
    }

    pub fn delay_exceeded(&self) -> u64 {
        self.delay_exceeded.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.size_exceeded() + self.delay_exceeded()
    }
}

impl<T> DropObserver<T> for DropCounter {
    fn frame_dropped(&mut self, event: &DropEvent<T>) {
        let counter = match event.reason {
            DropReason::SizeExceeded => &self.size_exceeded,
            DropReason::DelayExceeded => &self.delay_exceeded,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
