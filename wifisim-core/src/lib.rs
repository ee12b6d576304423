/*!
# Wireless MAC simulation core

Building blocks of a simulated 802.11 MAC layer:

* [`FrameContext`]: out-of-band telemetry following a frame from the
  sender's queue, through the [`channel`], to every receiver;
* [`peer::PeerRegistry`]: bounded, memory-budgeted table of the peers an
  interface has heard, each with a ring of recent [`Sample`]s;
* [`queue::RateQueue`]: the per interface transmit FIFO, with size and
  delay based eviction and blocked destinations;
* [`predictor::Predictor`]: turns a peer's telemetry into a rate decision.

Nothing here owns a clock: operations depending on time take the current
[`SimTime`], usually read from a [`scheduler::EventQueue`].
*/

pub mod address;
pub mod channel;
pub mod context;
pub mod data;
pub mod defaults;
pub mod frame;
pub mod peer;
pub mod predictor;
pub mod queue;
pub mod report;
pub mod scheduler;
pub mod stats;
pub mod time;

pub use self::{
    address::{Mac48Address, Mac48Allocator},
    channel::NodeIndex,
    context::{FrameContext, Sample, StampedContext},
    data::Data,
    frame::{Frame, FrameBuilder, FrameId, FrameIdGenerator, MacHeader, Tid},
    time::{Delay, SimTime},
};
