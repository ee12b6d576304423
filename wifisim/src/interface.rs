use crate::{payload::Payload, stats::InterfaceStats};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, trace};
use wifisim_core::{
    Delay, Frame, FrameContext, FrameIdGenerator, Mac48Address, MacHeader, NodeIndex, Sample,
    SimTime, Tid,
    channel::{Delivery, TxParameters},
    defaults::{
        DEFAULT_ADAPTATION_INTERVAL, DEFAULT_BEACON_INTERVAL, DEFAULT_CHANNEL_WIDTH_MHZ,
        DEFAULT_NOISE_FLOOR_DBM, DEFAULT_TX_POWER_DBM,
    },
    peer::{PeerRegistry, RegistryConfig, RegistryError},
    predictor::{Mcs, Predictor, PredictorKind, RateDecision, predict_registry},
    queue::{BlockedDestinations, DropCounter, DropObserver, QueueConfig, QueueItem, RateQueue},
};

/// Everything configurable on a [`WifiInterface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceConfig {
    pub queue: QueueConfig,
    pub registry: RegistryConfig,
    pub predictor: PredictorKind,
    /// `None` for an interface that never sends beacons
    pub beacon_interval: Option<Delay>,
    /// `None` to keep every rate at [`Mcs::MIN`]
    pub adaptation_interval: Option<Delay>,
    pub tx_power_dbm: f64,
    pub noise_floor_dbm: f64,
    pub channel_width_mhz: f64,
    /// attach a [`FrameContext`] to every frame sent. Receivers of frames
    /// without context cannot attribute their measurements.
    pub telemetry: bool,
}

/// A frame addressed to an interface, as handed to the application.
#[derive(Debug)]
pub struct Received<T> {
    /// end of the reception
    pub time: SimTime,
    pub frame: Arc<Frame<Payload<T>>>,
    pub header: MacHeader,
    pub context: FrameContext,
    pub rx_power_dbm: f64,
}

/// One station: its transmit queue, the peers it heard and the rates it
/// picked for them.
pub struct WifiInterface<T> {
    index: NodeIndex,
    address: Mac48Address,
    config: InterfaceConfig,

    registry: PeerRegistry,
    queue: RateQueue<Payload<T>>,
    blocked: BlockedDestinations,
    predictor: Box<dyn Predictor>,
    /// decision for the peer in slot `i` at index `i`
    decisions: Vec<RateDecision>,

    drops: DropCounter,
    busy: bool,
    sequence: u16,
    transmitted: u64,
    received: u64,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            registry: RegistryConfig::default(),
            predictor: PredictorKind::default(),
            beacon_interval: None,
            adaptation_interval: Some(DEFAULT_ADAPTATION_INTERVAL),
            tx_power_dbm: DEFAULT_TX_POWER_DBM,
            noise_floor_dbm: DEFAULT_NOISE_FLOOR_DBM,
            channel_width_mhz: DEFAULT_CHANNEL_WIDTH_MHZ,
            telemetry: true,
        }
    }
}

impl InterfaceConfig {
    /// an access point: beacons every [`DEFAULT_BEACON_INTERVAL`]
    pub fn access_point() -> Self {
        Self {
            beacon_interval: Some(DEFAULT_BEACON_INTERVAL),
            ..Self::default()
        }
    }
}

impl<T> Received<T> {
    /// the application data, `None` for a beacon
    pub fn data(&self) -> Option<&T> {
        self.frame.data().user()
    }

    #[inline]
    pub fn from(&self) -> Mac48Address {
        self.header.addr2()
    }
}

impl<T> WifiInterface<T>
where
    T: wifisim_core::Data,
{
    pub(crate) fn new(
        index: NodeIndex,
        address: Mac48Address,
        config: InterfaceConfig,
        seed: u64,
    ) -> Result<Self, RegistryError> {
        let registry = PeerRegistry::new(config.registry)?;
        let mut queue = RateQueue::new(config.queue);
        let drops = DropCounter::new();
        queue.subscribe(drops.clone());

        Ok(Self {
            index,
            address,
            config,
            registry,
            queue,
            blocked: BlockedDestinations::new(),
            predictor: config.predictor.build(seed),
            decisions: Vec::new(),
            drops,
            busy: false,
            sequence: 0,
            transmitted: 0,
            received: 0,
        })
    }

    pub(crate) fn enqueue(
        &mut self,
        now: SimTime,
        frame: Arc<Frame<Payload<T>>>,
        header: MacHeader,
    ) -> bool {
        let header = header.with_sequence(self.next_sequence());
        let context = self.outgoing_context();
        self.queue.enqueue_with_context(now, frame, header, context)
    }

    pub(crate) fn next_transmission(&mut self, now: SimTime) -> Option<QueueItem<Payload<T>>> {
        let item = self.queue.dequeue_first_available(now, &self.blocked)?;
        self.transmitted += 1;
        Some(item)
    }

    /// build the next beacon and stamp every known peer with its time
    pub(crate) fn beacon(
        &mut self,
        now: SimTime,
        frame_ids: &FrameIdGenerator,
    ) -> Result<(Arc<Frame<Payload<T>>>, MacHeader, FrameContext)> {
        let frame = Frame::builder(frame_ids).data(Payload::Beacon).build()?;
        let header = MacHeader::beacon(self.address).with_sequence(self.next_sequence());

        self.registry.update_beacon_time(now);
        trace!(index = %self.index, frame = %frame.id(), "beacon");

        Ok((Arc::new(frame), header, self.outgoing_context()))
    }

    /// measure an incoming frame and attribute the measurement to its
    /// sender, if the context allows it.
    ///
    /// Returns the frame if it is addressed to this interface.
    pub(crate) fn receive(
        &mut self,
        now: SimTime,
        delivery: Delivery<Payload<T>>,
    ) -> Option<Received<T>> {
        let Delivery {
            hop,
            frame,
            header,
            attributes,
        } = delivery;
        debug_assert_eq!(hop.destination(), self.index);

        let end_time = now + attributes.duration;
        let sample = Sample::new(
            end_time,
            attributes.rx_power_dbm - self.config.noise_floor_dbm,
            attributes.rx_power_dbm,
            self.config.channel_width_mhz,
        );
        let context = hop.context().with_measurement(sample);
        let outcome = self.registry.add_or_update(&context);
        trace!(
            index = %self.index,
            frame = %frame.id(),
            from = %header.addr2(),
            snr = sample.snr,
            ?outcome,
            "frame measured"
        );

        if header.is_beacon() {
            self.registry
                .record_beacon(header.addr2(), end_time, attributes.rx_power_dbm);
            return None;
        }

        let to = header.addr1();
        if to != self.address && !to.is_group() {
            return None;
        }

        self.received += 1;
        Some(Received {
            time: end_time,
            frame,
            header,
            context,
            rx_power_dbm: attributes.rx_power_dbm,
        })
    }

    /// run the predictor over every known peer
    pub(crate) fn adapt(&mut self) {
        self.decisions = predict_registry(self.predictor.as_mut(), &self.registry);
        debug!(
            index = %self.index,
            predictor = self.predictor.name(),
            peers = self.decisions.len(),
            "rates adapted"
        );
    }

    /// the rate to use towards `destination`. Group addresses and
    /// unknown peers get [`Mcs::MIN`].
    pub fn rate_for(&self, destination: Mac48Address) -> RateDecision {
        if destination.is_group() {
            return RateDecision::measured(Mcs::MIN);
        }
        self.registry
            .slot_of(destination)
            .and_then(|slot| self.decisions.get(slot).copied())
            .unwrap_or_default()
    }

    pub(crate) fn tx_parameters(&self, header: &MacHeader, bytes_size: u64) -> TxParameters {
        let mcs = self.rate_for(header.addr1()).mcs;
        TxParameters {
            tx_power_dbm: self.config.tx_power_dbm,
            duration: mcs.transmission_duration(bytes_size, self.config.channel_width_mhz),
        }
    }
}

impl<T> WifiInterface<T> {
    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    #[inline]
    pub fn address(&self) -> Mac48Address {
        self.address
    }

    #[inline]
    pub fn config(&self) -> &InterfaceConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    #[inline]
    pub fn queue(&self) -> &RateQueue<Payload<T>> {
        &self.queue
    }

    #[inline]
    pub fn blocked(&self) -> &BlockedDestinations {
        &self.blocked
    }

    /// the latest decisions, in slot order
    #[inline]
    pub fn decisions(&self) -> &[RateDecision] {
        &self.decisions
    }

    #[inline]
    pub fn drops(&self) -> &DropCounter {
        &self.drops
    }

    pub(crate) fn subscribe<O>(&mut self, observer: O)
    where
        O: DropObserver<Payload<T>> + 'static,
    {
        self.queue.subscribe(observer);
    }

    pub(crate) fn block(&mut self, destination: Mac48Address, tid: Tid) {
        self.blocked.block(destination, tid);
    }

    pub(crate) fn unblock(&mut self, destination: Mac48Address, tid: Tid) {
        self.blocked.unblock(destination, tid);
    }

    #[inline]
    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    #[inline]
    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn stats(&self) -> InterfaceStats {
        InterfaceStats {
            index: self.index,
            address: self.address,
            queue: self.queue.stats(),
            registry: self.registry.stats(),
            decisions: self.decisions.clone(),
            dropped_size_exceeded: self.drops.size_exceeded(),
            dropped_delay_exceeded: self.drops.delay_exceeded(),
            transmitted: self.transmitted,
            received: self.received,
        }
    }

    fn next_sequence(&mut self) -> u16 {
        let sequence = self.sequence;
        // 12 bits on the air
        self.sequence = (self.sequence + 1) & 0x0fff;
        sequence
    }

    fn outgoing_context(&self) -> FrameContext {
        if self.config.telemetry {
            FrameContext::new(self.address)
        } else {
            FrameContext::EMPTY
        }
    }
}
