use std::sync::Arc;
use wifisim_core::{
    Frame, FrameContext, FrameIdGenerator, Mac48Allocator, MacHeader, Sample, SimTime,
    channel::{Delivery, Position, TxParameters, WifiChannel},
    defaults::{DEFAULT_CHANNEL_WIDTH_MHZ, DEFAULT_NOISE_FLOOR_DBM, DEFAULT_TX_POWER_DBM},
    peer::{PeerRegistry, RegistryConfig},
    predictor::{Mcs, PredictorKind, predict_registry},
    scheduler::EventQueue,
};

fn main() -> anyhow::Result<()> {
    let mut channel = WifiChannel::default();
    let mut addresses = Mac48Allocator::new();
    let mut events = EventQueue::<Delivery<&'static str>>::new();
    let frame_ids = FrameIdGenerator::new();

    let sender = channel.attach(Position::new(0.0, 0.0, 0.0));
    let receiver = channel.attach(Position::new(25.0, 0.0, 0.0));
    let (from, to) = (addresses.allocate(), addresses.allocate());

    let mut registry = PeerRegistry::new(RegistryConfig::default())?;
    let mut predictor = PredictorKind::default().build(0);

    let frame = Arc::new(Frame::builder(&frame_ids).data("Hello World!").build()?);
    let header = MacHeader::data(to, from);
    let tx = TxParameters {
        tx_power_dbm: DEFAULT_TX_POWER_DBM,
        duration: Mcs::MIN.transmission_duration(frame.bytes_size(), DEFAULT_CHANNEL_WIDTH_MHZ),
    };

    // the context carries the sender's address along the hop
    let context = FrameContext::new(from);
    channel.send(sender, &frame, header, tx, context, &mut events)?;

    while let Some((time, delivery)) = events.pop_next() {
        assert_eq!(delivery.hop.destination(), receiver);
        let rx_power = delivery.attributes.rx_power_dbm;
        let sample = Sample::new(
            time + delivery.attributes.duration,
            rx_power - DEFAULT_NOISE_FLOOR_DBM,
            rx_power,
            DEFAULT_CHANNEL_WIDTH_MHZ,
        );
        let outcome = registry.add_or_update(&delivery.hop.context().with_measurement(sample));

        println!(
            "[{id}]{from}->{to} at {time}: {msg} ({rx_power:.2}dBm, {outcome:?})",
            id = delivery.frame.id(),
            from = delivery.header.addr2(),
            to = delivery.header.addr1(),
            msg = delivery.frame.data(),
        );
    }

    for decision in predict_registry(predictor.as_mut(), &registry) {
        println!("{} picks {} for {from}", predictor.name(), decision.mcs);
    }

    // frames are only heard after the propagation delay
    assert!(events.now() > SimTime::ZERO);

    Ok(())
}
