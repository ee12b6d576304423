//! The shared medium.
//!
//! Every PHY attached to a [`WifiChannel`] receives the transmissions of
//! every other PHY tuned to the same channel number. Each receiver gets
//! its own copy of the sender's [`FrameContext`], addressed to it.

mod delivery;
mod propagation;

pub use self::{
    delivery::{Delivery, DeliveryScheduler, Hop, RxAttributes},
    propagation::{ConstantSpeedLogDistance, Position, PropagationModel},
};
use crate::{
    context::FrameContext,
    defaults::DEFAULT_CHANNEL_NUMBER,
    frame::{Frame, MacHeader},
};
use std::{fmt, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, trace};

/// Index of a PHY on its [`WifiChannel`], in attachment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("No PHY attached at index {0}")]
    UnknownPhy(NodeIndex),
}

/// Transmission parameters chosen by the sender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TxParameters {
    pub tx_power_dbm: f64,
    /// time on air
    pub duration: Duration,
}

struct Phy {
    position: Position,
    channel_number: u8,
}

pub struct WifiChannel {
    phys: Vec<Phy>,
    model: Box<dyn PropagationModel>,
    /// calls to [`WifiChannel::send`] that reached the medium
    transmissions: u64,
}

impl NodeIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn into_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn into_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl WifiChannel {
    pub fn new<M>(model: M) -> Self
    where
        M: PropagationModel + 'static,
    {
        Self {
            phys: Vec::new(),
            model: Box::new(model),
            transmissions: 0,
        }
    }

    /// attach a PHY on the default channel number
    pub fn attach(&mut self, position: Position) -> NodeIndex {
        self.attach_on(position, DEFAULT_CHANNEL_NUMBER)
    }

    pub fn attach_on(&mut self, position: Position, channel_number: u8) -> NodeIndex {
        let index = NodeIndex(self.phys.len() as u32);
        self.phys.push(Phy {
            position,
            channel_number,
        });
        index
    }

    pub fn set_position(
        &mut self,
        index: NodeIndex,
        position: Position,
    ) -> Result<(), ChannelError> {
        self.phy_mut(index)?.position = position;
        Ok(())
    }

    pub fn position(&self, index: NodeIndex) -> Option<Position> {
        self.phys.get(index.into_usize()).map(|phy| phy.position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phys.is_empty()
    }

    /// fan a transmission out to every other PHY on the sender's channel
    /// number.
    ///
    /// Receivers are reached in index order. A non empty `context` is
    /// copied and stamped with each receiver's index; an empty one leaves
    /// the receivers with their index only. Returns the number of
    /// scheduled deliveries.
    pub fn send<T, S>(
        &mut self,
        sender: NodeIndex,
        frame: &Arc<Frame<T>>,
        header: MacHeader,
        tx: TxParameters,
        context: FrameContext,
        scheduler: &mut S,
    ) -> Result<usize, ChannelError>
    where
        S: DeliveryScheduler<T>,
    {
        let source = self
            .phys
            .get(sender.into_usize())
            .ok_or(ChannelError::UnknownPhy(sender))?;
        let frame_type = header.kind().type_tag();
        let mut scheduled = 0;

        for (index, phy) in self.phys.iter().enumerate() {
            let destination = NodeIndex(index as u32);
            if destination == sender || phy.channel_number != source.channel_number {
                continue;
            }

            let delay = self.model.delay(&source.position, &phy.position);
            let rx_power_dbm = self
                .model
                .rx_power(tx.tx_power_dbm, &source.position, &phy.position);
            trace!(
                %sender,
                %destination,
                frame = %frame.id(),
                rx_power_dbm,
                delay = ?delay,
                "frame propagated"
            );

            scheduler.schedule_delivery(
                delay,
                Delivery {
                    hop: Hop::new(context, destination),
                    frame: Arc::clone(frame),
                    header,
                    attributes: RxAttributes {
                        rx_power_dbm,
                        frame_type,
                        duration: tx.duration,
                    },
                },
            );
            scheduled += 1;
        }

        self.transmissions += 1;
        debug!(
            %sender,
            frame = %frame.id(),
            kind = ?header.kind(),
            receivers = scheduled,
            "channel transmission"
        );

        Ok(scheduled)
    }

    /// number of transmissions put on the medium so far, whatever the
    /// number of receivers
    #[inline]
    pub fn transmissions(&self) -> u64 {
        self.transmissions
    }

    fn phy_mut(&mut self, index: NodeIndex) -> Result<&mut Phy, ChannelError> {
        self.phys
            .get_mut(index.into_usize())
            .ok_or(ChannelError::UnknownPhy(index))
    }
}

impl Default for WifiChannel {
    fn default() -> Self {
        Self::new(ConstantSpeedLogDistance::default())
    }
}
