/*!
# Wireless MAC Simulator

Interfaces attached to one shared channel, each with a transmit queue, a
registry of the peers it heard and a rate predictor fed by that registry.
See [`Simulation`].
*/

mod interface;
mod payload;
mod simulation;
pub mod stats;

// convenient re-export of `wifisim_core` core objects
pub use wifisim_core::{
    Data, Delay, FrameContext, FrameId, Mac48Address, MacHeader, NodeIndex, Sample, SimTime, Tid,
    channel::Position,
    peer::{PeerRecord, PeerRegistry, RegistryConfig},
    predictor::{Mcs, PredictorKind, RateDecision},
    queue::{DropEvent, DropReason, QueueConfig},
};

pub use self::{
    interface::{InterfaceConfig, Received, WifiInterface},
    payload::{BEACON_BODY_BYTES, Payload},
    simulation::{BuildError, Event, InterfaceBuilder, SendError, Simulation},
    stats::{InterfaceStats, SimStats},
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::mpsc, time::Duration};
    use wifisim_core::{defaults::DEFAULT_NOISE_FLOOR_DBM, peer::RegistryError};

    type Sim = Simulation<&'static str>;

    fn at(meters: f64) -> Position {
        Position::new(meters, 0.0, 0.0)
    }

    fn address(sim: &Sim, index: NodeIndex) -> Mac48Address {
        sim.interface(index)
            .map(WifiInterface::address)
            .expect("the interface should exist")
    }

    /// an access point at the origin and a station 10m away
    fn ap_and_station(telemetry: bool) -> (Sim, NodeIndex, NodeIndex) {
        let mut sim = Sim::new();
        let ap = sim
            .new_interface()
            .access_point()
            .set_telemetry(telemetry)
            .build()
            .unwrap();
        let sta = sim
            .new_interface()
            .set_position(at(10.0))
            .set_telemetry(telemetry)
            .build()
            .unwrap();
        (sim, ap, sta)
    }

    #[test]
    fn unicast_is_delivered_and_measured() {
        let (mut sim, ap, sta) = ap_and_station(true);
        let ap_address = address(&sim, ap);
        let sta_address = address(&sim, sta);

        let id = sim.send(sta, ap_address, None, "hello").unwrap();

        let mut received = Vec::new();
        sim.advance_with(Duration::from_millis(10), |node, frame| {
            received.push((node, frame))
        });

        assert_eq!(received.len(), 1);
        let (node, frame) = &received[0];
        assert_eq!(*node, ap);
        assert_eq!(frame.frame.id(), id);
        assert_eq!(frame.from(), sta_address);
        assert_eq!(frame.data(), Some(&"hello"));

        let registry = sim.interface(ap).unwrap().registry();
        let Some(peer) = registry.get_by_address(sta_address) else {
            panic!("the access point should know the station")
        };
        let Some(sample) = peer.latest() else {
            panic!("the station should have one sample")
        };
        assert_eq!(sample.snr, sample.rx_power - DEFAULT_NOISE_FLOOR_DBM);
        assert_eq!(frame.context.sample(), Some(sample));
    }

    #[test]
    fn without_telemetry_nothing_is_attributed() {
        let (mut sim, ap, sta) = ap_and_station(false);
        let ap_address = address(&sim, ap);

        sim.send(sta, ap_address, None, "hello").unwrap();
        let mut count = 0;
        sim.advance_with(Duration::from_millis(500), |_, frame| {
            assert!(frame.context.is_empty());
            count += 1;
        });

        assert_eq!(count, 1);
        assert!(sim.interface(ap).unwrap().registry().is_empty());
        assert!(sim.interface(sta).unwrap().registry().is_empty());
    }

    #[test]
    fn beacons_reach_stations() {
        let (mut sim, ap, sta) = ap_and_station(true);
        let ap_address = address(&sim, ap);
        let sta_address = address(&sim, sta);

        // one exchange so the access point knows the station
        sim.send(sta, ap_address, None, "associate").unwrap();
        sim.advance_with(Duration::from_millis(250), |_, _| {});

        let station = sim.interface(sta).unwrap();
        let Some(peer) = station.registry().get_by_address(ap_address) else {
            panic!("the station should have heard the beacons")
        };
        assert!(peer.last_beacon_rx_power().is_some());
        assert!(peer.len() >= 2);

        let Some(peer) = sim.interface(ap).unwrap().registry().get_by_address(sta_address) else {
            panic!("the access point should know the station")
        };
        // stamped by the beacons sent after the association
        assert!(peer.last_beacon_time().is_some());
        assert!(peer.last_beacon_rx_power().is_none());
    }

    #[test]
    fn rates_adapt_to_the_link() {
        let (mut sim, ap, sta) = ap_and_station(true);
        let sta_address = address(&sim, sta);

        sim.send(sta, address(&sim, ap), None, "hello").unwrap();
        sim.advance_with(Duration::from_millis(150), |_, _| {});

        let interface = sim.interface(ap).unwrap();
        assert_eq!(interface.decisions().len(), 1);
        // -60.66dBm at 10m, 33dB of SNR
        assert_eq!(interface.rate_for(sta_address).mcs, Mcs::new(7).unwrap());
        assert_eq!(
            interface.rate_for(Mac48Address::BROADCAST).mcs,
            Mcs::new(0).unwrap()
        );
    }

    #[test]
    fn full_queue_drops_newest() {
        let mut sim = Sim::new();
        let a = sim.new_interface().set_queue_max_size(1).build().unwrap();
        let b = sim.new_interface().build().unwrap();
        let to = address(&sim, b);

        let (sender, drops) = mpsc::channel();
        sim.subscribe_drops(a, move |event: &DropEvent<Payload<&'static str>>| {
            let _ = sender.send((event.reason, event.frame.data().user().copied()));
        })
        .unwrap();

        sim.send(a, to, None, "first").unwrap();
        sim.send(a, to, None, "second").unwrap();

        assert_eq!(
            drops.try_recv(),
            Ok((DropReason::SizeExceeded, Some("second")))
        );

        let mut received = Vec::new();
        sim.advance_with(Duration::from_millis(5), |_, frame| {
            received.push(frame.data().copied())
        });
        assert_eq!(received, vec![Some("first")]);
        assert_eq!(sim.stats().interfaces[0].dropped_size_exceeded, 1);
    }

    #[test]
    fn blocked_frames_expire() {
        let mut sim = Sim::new();
        let a = sim.new_interface().build().unwrap();
        let b = sim.new_interface().build().unwrap();
        let to = address(&sim, b);

        sim.block(a, to, Tid::VOICE).unwrap();
        sim.send(a, to, Some(Tid::VOICE), "voice").unwrap();
        sim.send(a, to, Some(Tid::VIDEO), "video").unwrap();

        let mut received = Vec::new();
        sim.advance_with(Duration::from_millis(600), |_, frame| {
            received.push(frame.data().copied())
        });

        assert_eq!(received, vec![Some("video")]);
        let stats = sim.stats();
        assert_eq!(stats.now, SimTime::ZERO + Duration::from_millis(600));
        assert_eq!(stats.interfaces[0].dropped_delay_exceeded, 0);

        // the queue only notices on its next operation
        sim.unblock(a, to, Tid::VOICE).unwrap();
        sim.advance_with(Duration::from_millis(1), |_, frame| {
            received.push(frame.data().copied())
        });
        assert_eq!(received, vec![Some("video")]);
        assert_eq!(sim.stats().interfaces[0].dropped_delay_exceeded, 1);
    }

    #[test]
    fn unblocked_frames_leave() {
        let mut sim = Sim::new();
        let a = sim.new_interface().build().unwrap();
        let b = sim.new_interface().build().unwrap();
        let to = address(&sim, b);

        sim.block(a, to, Tid::VOICE).unwrap();
        sim.send(a, to, Some(Tid::VOICE), "voice").unwrap();
        sim.advance_with(Duration::from_millis(100), |_, _| panic!("nothing should leave"));

        sim.unblock(a, to, Tid::VOICE).unwrap();
        let mut received = Vec::new();
        sim.advance_with(Duration::from_millis(1), |_, frame| {
            received.push(frame.data().copied())
        });
        assert_eq!(received, vec![Some("voice")]);
    }

    #[test]
    fn broadcast_reaches_everyone() {
        let mut sim = Sim::new();
        let a = sim.new_interface().build().unwrap();
        let b = sim.new_interface().set_position(at(5.0)).build().unwrap();
        let c = sim.new_interface().set_position(at(15.0)).build().unwrap();

        sim.send(a, Mac48Address::BROADCAST, None, "all").unwrap();
        let mut nodes = Vec::new();
        sim.advance_with(Duration::from_millis(1), |node, _| nodes.push(node));

        assert_eq!(nodes, vec![b, c]);
        for node in [b, c] {
            let registry = sim.interface(node).unwrap().registry();
            assert_eq!(registry.len(), 1);
            assert!(registry.get_by_address(Mac48Address::BROADCAST).is_none());
        }
    }

    #[test]
    fn other_channel_numbers_hear_nothing() {
        let mut sim = Sim::new();
        let a = sim.new_interface().build().unwrap();
        let b = sim.new_interface().set_channel_number(6).build().unwrap();
        let to = address(&sim, b);

        sim.send(a, to, None, "lost").unwrap();
        sim.advance_with(Duration::from_millis(1), |_, _| panic!("b is on another channel"));

        assert_eq!(sim.stats().interfaces[0].transmitted, 1);
        assert_eq!(sim.stats().interfaces[1].received, 0);
    }

    #[test]
    fn registry_capacity_is_respected() {
        let mut sim = Sim::new();
        let ap = sim
            .new_interface()
            .set_registry(RegistryConfig::with_samples_per_peer(2, 4))
            .build()
            .unwrap();
        let ap_address = address(&sim, ap);
        let stations: Vec<_> = (1..=3)
            .map(|i| sim.new_interface().set_position(at(i as f64)).build().unwrap())
            .collect();

        for &sta in &stations {
            sim.send(sta, ap_address, None, "hello").unwrap();
        }
        sim.advance_with(Duration::from_millis(5), |_, _| {});

        let registry = sim.interface(ap).unwrap().registry();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn run_until_moves_the_clock() {
        let mut sim = Sim::new();
        sim.new_interface().access_point().build().unwrap();

        let until = SimTime::ZERO + Duration::from_secs(1);
        sim.run_until(until, |_, _| {});

        assert_eq!(sim.now(), until);
    }

    #[test]
    fn build_errors() {
        let mut sim = Sim::new();
        let a = sim.new_interface().build().unwrap();
        let taken = address(&sim, a);

        assert!(matches!(
            sim.new_interface().set_address(taken).build(),
            Err(BuildError::DuplicateAddress(address, index)) if address == taken && index == a
        ));
        assert!(matches!(
            sim.new_interface().set_address(Mac48Address::BROADCAST).build(),
            Err(BuildError::GroupAddress(_))
        ));
        assert!(matches!(
            sim.new_interface()
                .set_registry(RegistryConfig::new(u64::MAX, usize::MAX))
                .build(),
            Err(BuildError::Registry(RegistryError::MemoryShortage { .. }))
        ));
        assert_eq!(sim.interfaces().len(), 1);
    }

    #[test]
    fn unknown_interface() {
        let mut sim = Sim::new();

        assert!(matches!(
            sim.send(NodeIndex::new(3), Mac48Address::BROADCAST, None, "x"),
            Err(SendError::UnknownInterface(index)) if index == NodeIndex::new(3)
        ));
    }
}
