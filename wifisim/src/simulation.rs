use crate::{
    interface::{InterfaceConfig, Received, WifiInterface},
    payload::Payload,
    stats::SimStats,
};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, trace, warn};
use wifisim_core::{
    Data, Delay, Frame, FrameId, FrameIdGenerator, Mac48Address, Mac48Allocator, MacHeader,
    NodeIndex, SimTime, Tid,
    channel::{ChannelError, Delivery, Position, WifiChannel},
    defaults::DEFAULT_CHANNEL_NUMBER,
    peer::{RegistryConfig, RegistryError},
    predictor::PredictorKind,
    queue::DropObserver,
    scheduler::EventQueue,
};

/// What the simulation does at a given time.
#[derive(Debug)]
pub enum Event<T> {
    /// the interface may put its next frame on the air
    Transmit(NodeIndex),
    /// a frame reaches a receiver
    Deliver(Delivery<Payload<T>>),
    Beacon(NodeIndex),
    Adapt(NodeIndex),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to create the peer registry")]
    Registry(#[from] RegistryError),
    #[error("Address {0} is a group address")]
    GroupAddress(Mac48Address),
    #[error("Address {0} is already used by interface {1}")]
    DuplicateAddress(Mac48Address, NodeIndex),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("No interface at index {0}")]
    UnknownInterface(NodeIndex),
    #[error("Failed to build frame")]
    FailedToBuildFrame(#[source] anyhow::Error),
}

/// # Discrete event wireless simulation
///
/// Interfaces share one [`WifiChannel`]. Time only moves forward with
/// [`Simulation::advance_with`], which processes every event due in the
/// step and hands the frames addressed to an interface to the caller.
///
/// ```
/// use wifisim::{Simulation, Position};
/// use std::time::Duration;
///
/// let mut sim: Simulation<&'static str> = Simulation::new();
/// let ap = sim.new_interface().access_point().build().unwrap();
/// let sta = sim
///     .new_interface()
///     .set_position(Position::new(10.0, 0.0, 0.0))
///     .build()
///     .unwrap();
///
/// let ap_address = sim.interface(ap).unwrap().address();
/// sim.send(sta, ap_address, None, "hello").unwrap();
///
/// let mut received = Vec::new();
/// sim.advance_with(Duration::from_millis(10), |node, frame| {
///     received.push((node, frame.data().copied()))
/// });
/// assert_eq!(received, vec![(ap, Some("hello"))]);
/// ```
pub struct Simulation<T> {
    channel: WifiChannel,
    events: EventQueue<Event<T>>,
    interfaces: Vec<WifiInterface<T>>,
    frame_ids: FrameIdGenerator,
    addresses: Mac48Allocator,
    /// base seed of the interfaces' predictors
    seed: u64,
}

/// Builder for configuring a new interface.
///
/// Obtained via [`Simulation::new_interface`].
///
/// ## Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | Address | next from `02:00:00:00:00:01` |
/// | Position | origin |
/// | Queue | 400 frames, 500ms |
/// | Registry | 64 KiB, 32 peers |
/// | Predictor | `snr-threshold` |
/// | Beacons | none |
/// | Adaptation | every 100ms |
/// | Telemetry | on |
pub struct InterfaceBuilder<'a, T> {
    address: Option<Mac48Address>,
    position: Position,
    channel_number: u8,
    config: InterfaceConfig,

    simulation: &'a mut Simulation<T>,
}

impl<T> From<Delivery<Payload<T>>> for Event<T> {
    fn from(delivery: Delivery<Payload<T>>) -> Self {
        Self::Deliver(delivery)
    }
}

impl<T> InterfaceBuilder<'_, T>
where
    T: Data,
{
    pub fn set_address(mut self, address: Mac48Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn set_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// only interfaces on the same channel number hear each other
    pub fn set_channel_number(mut self, channel_number: u8) -> Self {
        self.channel_number = channel_number;
        self
    }

    pub fn set_config(mut self, config: InterfaceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_queue_max_size(mut self, max_size: usize) -> Self {
        self.config.queue.max_size = max_size;
        self
    }

    pub fn set_queue_max_delay(mut self, max_delay: Delay) -> Self {
        self.config.queue.max_delay = max_delay;
        self
    }

    pub fn set_registry(mut self, registry: RegistryConfig) -> Self {
        self.config.registry = registry;
        self
    }

    pub fn set_predictor(mut self, predictor: PredictorKind) -> Self {
        self.config.predictor = predictor;
        self
    }

    /// send a beacon every `interval`. A zero interval disables beacons.
    pub fn set_beacon_interval(mut self, interval: Delay) -> Self {
        self.config.beacon_interval = Some(interval).filter(|d| *d != Delay::ZERO);
        self
    }

    /// beacon at the default interval
    pub fn access_point(mut self) -> Self {
        self.config.beacon_interval = InterfaceConfig::access_point().beacon_interval;
        self
    }

    /// adapt rates every `interval`. A zero interval disables adaptation.
    pub fn set_adaptation_interval(mut self, interval: Delay) -> Self {
        self.config.adaptation_interval = Some(interval).filter(|d| *d != Delay::ZERO);
        self
    }

    pub fn set_tx_power(mut self, tx_power_dbm: f64) -> Self {
        self.config.tx_power_dbm = tx_power_dbm;
        self
    }

    pub fn set_noise_floor(mut self, noise_floor_dbm: f64) -> Self {
        self.config.noise_floor_dbm = noise_floor_dbm;
        self
    }

    pub fn set_channel_width(mut self, channel_width_mhz: f64) -> Self {
        self.config.channel_width_mhz = channel_width_mhz;
        self
    }

    pub fn set_telemetry(mut self, telemetry: bool) -> Self {
        self.config.telemetry = telemetry;
        self
    }

    /// Finalise the interface and attach it to the channel.
    ///
    /// # Errors
    ///
    /// * [`BuildError::Registry`] if the peer registry cannot be allocated;
    /// * [`BuildError::GroupAddress`] or [`BuildError::DuplicateAddress`]
    ///   for an address that cannot identify this interface.
    pub fn build(self) -> Result<NodeIndex, BuildError> {
        let Self {
            address,
            position,
            channel_number,
            mut config,
            simulation,
        } = self;

        config.beacon_interval = config.beacon_interval.filter(|d| *d != Delay::ZERO);
        config.adaptation_interval = config.adaptation_interval.filter(|d| *d != Delay::ZERO);

        let address = match address {
            Some(address) => address,
            None => simulation.addresses.allocate(),
        };
        if address.is_group() {
            return Err(BuildError::GroupAddress(address));
        }
        if let Some(other) = simulation.interfaces.iter().find(|i| i.address() == address) {
            return Err(BuildError::DuplicateAddress(address, other.index()));
        }

        let index = NodeIndex::new(simulation.interfaces.len() as u32);
        let seed = simulation.seed.wrapping_add(index.into_u32() as u64);
        let interface = WifiInterface::new(index, address, config, seed)?;

        let attached = simulation.channel.attach_on(position, channel_number);
        debug_assert_eq!(attached, index);
        simulation.interfaces.push(interface);

        if config.beacon_interval.is_some() {
            let now = simulation.events.now();
            simulation.events.schedule_at(now, Event::Beacon(index));
        }
        if let Some(interval) = config.adaptation_interval {
            simulation
                .events
                .schedule_in(interval.into_duration(), Event::Adapt(index));
        }

        debug!(%index, %address, %position, channel_number, "interface attached");

        Ok(index)
    }
}

impl<T> Simulation<T>
where
    T: Data,
{
    /// Create an empty simulation on a default [`WifiChannel`].
    pub fn new() -> Self {
        Self::with_channel(WifiChannel::default())
    }

    pub fn with_channel(channel: WifiChannel) -> Self {
        Self {
            channel,
            events: EventQueue::new(),
            interfaces: Vec::new(),
            frame_ids: FrameIdGenerator::new(),
            addresses: Mac48Allocator::new(),
            seed: 0,
        }
    }

    /// Seed of the predictors of the interfaces created afterwards.
    ///
    /// Interface `i` uses `seed + i`. The default seed is `0`.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn frame_id_generator(&self) -> &FrameIdGenerator {
        &self.frame_ids
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.events.now()
    }

    pub fn new_interface(&mut self) -> InterfaceBuilder<'_, T> {
        InterfaceBuilder {
            address: None,
            position: Position::default(),
            channel_number: DEFAULT_CHANNEL_NUMBER,
            config: InterfaceConfig::default(),
            simulation: self,
        }
    }

    pub fn interface(&self, index: NodeIndex) -> Option<&WifiInterface<T>> {
        self.interfaces.get(index.into_usize())
    }

    pub fn interfaces(&self) -> impl ExactSizeIterator<Item = &WifiInterface<T>> {
        self.interfaces.iter()
    }

    pub fn set_position(
        &mut self,
        index: NodeIndex,
        position: Position,
    ) -> Result<(), ChannelError> {
        self.channel.set_position(index, position)
    }

    /// Queue `data` on interface `from`, for `to`.
    ///
    /// With a `tid` the frame is a QoS data frame of that traffic class.
    /// A frame refused by a full queue is not an error: it is reported as
    /// a drop to the queue's observers.
    pub fn send(
        &mut self,
        from: NodeIndex,
        to: Mac48Address,
        tid: Option<Tid>,
        data: T,
    ) -> Result<FrameId, SendError> {
        let now = self.events.now();
        let interface = self
            .interfaces
            .get_mut(from.into_usize())
            .ok_or(SendError::UnknownInterface(from))?;

        let frame = Frame::builder(&self.frame_ids)
            .data(Payload::User(data))
            .build()
            .map_err(SendError::FailedToBuildFrame)?;
        let id = frame.id();
        let header = match tid {
            Some(tid) => MacHeader::qos_data(to, interface.address(), tid),
            None => MacHeader::data(to, interface.address()),
        };

        if interface.enqueue(now, Arc::new(frame), header) {
            trace!(%from, %to, frame = %id, "frame queued");
            self.wake(from);
        }

        Ok(id)
    }

    /// Forbid QoS frames for (`destination`, `tid`) to leave interface
    /// `node`.
    pub fn block(
        &mut self,
        node: NodeIndex,
        destination: Mac48Address,
        tid: Tid,
    ) -> Result<(), SendError> {
        self.interface_mut(node)?.block(destination, tid);
        Ok(())
    }

    pub fn unblock(
        &mut self,
        node: NodeIndex,
        destination: Mac48Address,
        tid: Tid,
    ) -> Result<(), SendError> {
        self.interface_mut(node)?.unblock(destination, tid);
        self.wake(node);
        Ok(())
    }

    /// register an observer of the frames dropped by `node`'s queue
    pub fn subscribe_drops<O>(&mut self, node: NodeIndex, observer: O) -> Result<(), SendError>
    where
        O: DropObserver<Payload<T>> + 'static,
    {
        self.interface_mut(node)?.subscribe(observer);
        Ok(())
    }

    /// Advance the simulation by `duration`.
    ///
    /// Every event due before the end of the step is processed in time
    /// order. `handle` is called for every frame received by an interface
    /// it is addressed to, beacons excluded.
    pub fn advance_with<H>(&mut self, duration: Duration, mut handle: H)
    where
        H: FnMut(NodeIndex, Received<T>),
    {
        let target = self.events.now() + duration;

        while let Some((time, event)) = self.events.pop_until(target) {
            self.dispatch(time, event, &mut handle);
        }

        self.events.advance_to(target);
    }

    /// [`Simulation::advance_with`] up to `time`
    pub fn run_until<H>(&mut self, time: SimTime, handle: H)
    where
        H: FnMut(NodeIndex, Received<T>),
    {
        let duration = time.saturating_since(self.events.now());
        self.advance_with(duration, handle)
    }

    /// Returns a point-in-time snapshot of every interface.
    pub fn stats(&self) -> SimStats {
        SimStats {
            now: self.events.now(),
            interfaces: self.interfaces.iter().map(WifiInterface::stats).collect(),
        }
    }

    fn dispatch<H>(&mut self, now: SimTime, event: Event<T>, handle: &mut H)
    where
        H: FnMut(NodeIndex, Received<T>),
    {
        match event {
            Event::Transmit(index) => self.transmit(now, index),
            Event::Deliver(delivery) => {
                let index = delivery.hop.destination();
                let Some(interface) = self.interfaces.get_mut(index.into_usize()) else {
                    warn!(%index, "delivery to an unknown interface");
                    return;
                };
                if let Some(received) = interface.receive(now, delivery) {
                    handle(index, received);
                }
            }
            Event::Beacon(index) => self.beacon(now, index),
            Event::Adapt(index) => {
                let Some(interface) = self.interfaces.get_mut(index.into_usize()) else {
                    return;
                };
                interface.adapt();
                if let Some(interval) = interface.config().adaptation_interval {
                    self.events
                        .schedule_in(interval.into_duration(), Event::Adapt(index));
                }
            }
        }
    }

    fn transmit(&mut self, now: SimTime, index: NodeIndex) {
        let Some(interface) = self.interfaces.get_mut(index.into_usize()) else {
            return;
        };
        let Some(item) = interface.next_transmission(now) else {
            interface.set_busy(false);
            return;
        };

        let (frame, header, context) = item.into_parts();
        let tx = interface.tx_parameters(&header, frame.bytes_size());

        match self
            .channel
            .send(index, &frame, header, tx, context, &mut self.events)
        {
            Ok(receivers) => trace!(%index, frame = %frame.id(), receivers, "frame sent"),
            Err(error) => warn!(%index, %error, "transmission failed"),
        }

        // the medium is ours until the end of the transmission
        self.events.schedule_in(tx.duration, Event::Transmit(index));
    }

    fn beacon(&mut self, now: SimTime, index: NodeIndex) {
        let Some(interface) = self.interfaces.get_mut(index.into_usize()) else {
            return;
        };
        let interval = interface.config().beacon_interval;

        match interface.beacon(now, &self.frame_ids) {
            Ok((frame, header, context)) => {
                let tx = interface.tx_parameters(&header, frame.bytes_size());
                if let Err(error) =
                    self.channel
                        .send(index, &frame, header, tx, context, &mut self.events)
                {
                    warn!(%index, %error, "beacon transmission failed");
                }
            }
            Err(error) => warn!(%index, %error, "failed to build beacon"),
        }

        if let Some(interval) = interval {
            self.events
                .schedule_in(interval.into_duration(), Event::Beacon(index));
        }
    }

    /// schedule a transmission opportunity for an idle interface
    fn wake(&mut self, index: NodeIndex) {
        let now = self.events.now();
        if let Some(interface) = self.interfaces.get_mut(index.into_usize())
            && !interface.is_busy()
        {
            interface.set_busy(true);
            self.events.schedule_at(now, Event::Transmit(index));
        }
    }

    fn interface_mut(&mut self, index: NodeIndex) -> Result<&mut WifiInterface<T>, SendError> {
        self.interfaces
            .get_mut(index.into_usize())
            .ok_or(SendError::UnknownInterface(index))
    }
}

impl<T> Default for Simulation<T>
where
    T: Data,
{
    fn default() -> Self {
        Self::new()
    }
}
