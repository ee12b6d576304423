use super::NodeIndex;
use crate::{
    context::{FrameContext, StampedContext},
    frame::{Frame, MacHeader},
    scheduler::EventQueue,
};
use std::{fmt, sync::Arc, time::Duration};

/// How a receiver is reached by one transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hop {
    /// the frame carried no context, only the receiver's index is known
    Index(NodeIndex),
    /// the sender's context, copied and addressed to this receiver
    Context(StampedContext),
}

/// Attributes attached by the channel to every delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RxAttributes {
    /// power at the receiver, in dBm
    pub rx_power_dbm: f64,
    /// see [`FrameKind::type_tag`](crate::frame::FrameKind::type_tag)
    pub frame_type: u8,
    /// time on air
    pub duration: Duration,
}

/// One frame arriving at one receiver.
pub struct Delivery<T> {
    pub hop: Hop,
    pub frame: Arc<Frame<T>>,
    pub header: MacHeader,
    pub attributes: RxAttributes,
}

/// Where the channel hands its deliveries.
pub trait DeliveryScheduler<T> {
    /// make `delivery` happen `delay` from now
    fn schedule_delivery(&mut self, delay: Duration, delivery: Delivery<T>);
}

impl Hop {
    pub fn new(context: FrameContext, destination: NodeIndex) -> Self {
        match context.stamp(destination) {
            Some(stamped) => Self::Context(stamped),
            None => Self::Index(destination),
        }
    }

    pub fn destination(&self) -> NodeIndex {
        match self {
            Self::Index(index) => *index,
            Self::Context(stamped) => stamped.destination(),
        }
    }

    /// the context as seen by the receiver, empty for [`Hop::Index`]
    pub fn context(&self) -> FrameContext {
        match self {
            Self::Index(_) => FrameContext::EMPTY,
            Self::Context(stamped) => stamped.context(),
        }
    }
}

impl<T> Clone for Delivery<T> {
    fn clone(&self) -> Self {
        Self {
            hop: self.hop,
            frame: Arc::clone(&self.frame),
            header: self.header,
            attributes: self.attributes,
        }
    }
}

impl<T> fmt::Debug for Delivery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("hop", &self.hop)
            .field("frame", &self.frame.id())
            .field("header", &self.header)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl<T> DeliveryScheduler<T> for Vec<(Duration, Delivery<T>)> {
    fn schedule_delivery(&mut self, delay: Duration, delivery: Delivery<T>) {
        self.push((delay, delivery));
    }
}

impl<T, E> DeliveryScheduler<T> for EventQueue<E>
where
    E: From<Delivery<T>>,
{
    fn schedule_delivery(&mut self, delay: Duration, delivery: Delivery<T>) {
        self.schedule_in(delay, E::from(delivery));
    }
}
