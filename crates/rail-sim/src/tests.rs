//! Integration tests for rail-sim.

use rail_core::{SimConfig, SimTime, TrainId, Vehicle, VehicleId, VehicleKind, VehicleSpec};
use rail_network::{Network, NetworkBuilder, TrainLine};

use crate::{EventRecord, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 72 km/h is exactly 20 m/s, which keeps kinematic durations whole.
fn diesel(id: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleSpec::Diesel { max_speed_kmh: 72, fuel_l_per_h: 200 })
}

fn sleeper(id: u32) -> Vehicle {
    Vehicle::new(VehicleId(id), VehicleSpec::Sleeping { beds: 40 })
}

fn line(
    number:      u32,
    origin:      &str,
    destination: &str,
    departure:   (i64, i64),
    arrival:     (i64, i64),
    demand:      Vec<VehicleKind>,
) -> TrainLine {
    TrainLine {
        number:        TrainId(number),
        origin:        origin.into(),
        destination:   destination.into(),
        departure:     SimTime::from_hm(departure.0, departure.1),
        arrival:       SimTime::from_hm(arrival.0, arrival.1),
        demand,
        max_speed_kmh: 160,
    }
}

/// A late-evening train with no demand.  Its events keep the queue non-empty
/// while the trains under test run, so they are dispatched eagerly.
fn sentinel() -> TrainLine {
    line(99, "Beta", "Alpha", (20, 0), (22, 0), vec![])
}

/// Alpha and Beta, 120 km apart.
fn network(parked: Vec<(&str, Vehicle)>, lines: Vec<TrainLine>) -> Network {
    let mut b = NetworkBuilder::new();
    b.station("Alpha");
    b.station("Beta");
    for (station, vehicle) in parked {
        let id = b.station(station);
        b.add_vehicle(id, vehicle);
    }
    b.add_distance("Alpha", "Beta", 120);
    for l in lines {
        b.add_line(l);
    }
    b.build().unwrap()
}

/// Train 1: Alpha 08:00 → Beta 10:00 demanding one diesel, which Alpha has.
fn clean_network() -> Network {
    network(
        vec![("Alpha", diesel(1))],
        vec![
            line(1, "Alpha", "Beta", (8, 0), (10, 0), vec![VehicleKind::DieselLocomotive]),
            sentinel(),
        ],
    )
}

fn records<O: SimObserver>(sim: &Sim<O>, number: u32) -> Vec<&EventRecord> {
    sim.life_cycle_by_train(TrainId(number)).records
}

fn hm(h: i64, m: i64) -> SimTime {
    SimTime::from_hm(h, m)
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use super::*;
    use crate::{Event, EventKind, EventQueue};

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(Event::new(EventKind::Ready, hm(9, 0), TrainId(1)));
        q.push(Event::new(EventKind::Running, hm(7, 0), TrainId(2)));
        q.push(Event::new(EventKind::Arrived, hm(8, 0), TrainId(3)));
        assert_eq!(q.len(), 3);
        assert_eq!(q.peek_time(), Some(hm(7, 0)));
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).map(|e| e.train.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut q = EventQueue::new();
        for n in [5, 3, 9] {
            q.push(Event::new(EventKind::Ready, hm(8, 0), TrainId(n)));
        }
        let order: Vec<_> = q.iter().map(|e| e.train.0).collect();
        assert_eq!(order, vec![5, 3, 9]);
        assert_eq!(q.pop().unwrap().train, TrainId(5));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn empty_queue() {
        let mut q = EventQueue::new();
        assert_eq!(q.peek_time(), None);
        assert!(q.pop().is_none());
        assert_eq!(q.len(), 0);
    }
}

// ── KinematicModel ────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematics_tests {
    use super::*;
    use crate::KinematicModel;
    use rail_network::Train;

    #[test]
    fn duration_adds_ramp_time_to_cruise_time() {
        // 120 km at 20 m/s = 6000 s cruise, plus v/2a + v/2d = 50 + 50 s.
        let model = KinematicModel::default();
        assert_eq!(model.potential_duration_secs(120, 72), 6_100);
    }

    #[test]
    fn rates_are_configurable() {
        let model = KinematicModel::new(0.5, 0.5);
        assert_eq!(model.potential_duration_secs(120, 72), 6_040);
    }

    #[test]
    fn zero_speed_yields_zero() {
        assert_eq!(KinematicModel::default().potential_duration_secs(120, 0), 0);
    }

    #[test]
    fn average_speed() {
        assert_eq!(KinematicModel::average_speed_kmh(120, 6_000), 72);
        assert_eq!(KinematicModel::average_speed_kmh(120, 7_200), 60);
        assert_eq!(KinematicModel::average_speed_kmh(120, 0), 0);
        assert_eq!(KinematicModel::average_speed_kmh(120, -60), 0);
    }

    #[test]
    fn locomotive_caps_line_speed() {
        let mut train = Train::new(line(1, "Alpha", "Beta", (8, 0), (10, 0), vec![]));
        assert_eq!(KinematicModel::effective_speed_kmh(&train), 160);
        train.connected.push(diesel(1));
        assert_eq!(KinematicModel::effective_speed_kmh(&train), 72);

        let mut slow = Train::new(TrainLine { max_speed_kmh: 60, ..line(2, "Alpha", "Beta", (8, 0), (10, 0), vec![]) });
        slow.connected.push(diesel(2));
        assert_eq!(KinematicModel::effective_speed_kmh(&slow), 60);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{EventKind, SimError};
    use rail_network::TrainStatus;

    #[test]
    fn seeds_one_event_per_train_before_departure() {
        let sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        let pending: Vec<_> = sim.pending().map(|e| (e.train.0, e.kind, e.time)).collect();
        assert_eq!(
            pending,
            vec![
                (1, EventKind::NotAssembled, hm(7, 30)),
                (99, EventKind::NotAssembled, hm(19, 30)),
            ]
        );
        assert!(sim.network().trains().iter().all(|t| t.status == TrainStatus::NotAssembled));
        assert!(sim.execution_log().is_empty());
        assert_eq!(sim.clock().current, SimTime::MIDNIGHT);
    }

    #[test]
    fn early_departure_seeds_before_midnight() {
        let net = network(vec![], vec![line(1, "Alpha", "Beta", (0, 10), (1, 0), vec![])]);
        let sim = SimBuilder::new(SimConfig::default(), net).build().unwrap();
        assert_eq!(sim.peek_next_time().unwrap(), SimTime(-20 * 60));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { stop_time: hm(6, 0), start_time: hm(8, 0), ..SimConfig::default() };
        let result = SimBuilder::new(config, clean_network()).build();
        assert!(matches!(result, Err(SimError::Core(_))));

        let config = SimConfig { interval_secs: 0, ..SimConfig::default() };
        assert!(SimBuilder::new(config, clean_network()).build().is_err());
    }
}

// ── Lifecycle scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;
    use crate::EventKind;
    use rail_core::StationId;
    use rail_network::{TrainStatus, VehicleLocation};

    #[test]
    fn clean_assembly_departs_on_time() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();

        assert!(sim.next_event().unwrap());
        let first = &sim.execution_log()[0];
        assert_eq!(first.kind, EventKind::NotAssembled);
        assert_eq!(first.time, hm(7, 30));
        assert_eq!(first.snapshot.status, TrainStatus::Assembled);
        assert_eq!(first.snapshot.connected, vec![VehicleId(1)]);
        assert!(first.snapshot.demanded.is_empty());

        let next = sim.pending().next().copied().unwrap();
        assert_eq!(next.kind, EventKind::Ready);
        assert_eq!(next.time, hm(7, 50));

        assert!(sim.next_event().unwrap());
        assert_eq!(sim.execution_log()[1].snapshot.status, TrainStatus::Ready);
        assert_eq!(sim.clock().current, hm(7, 50));
    }

    #[test]
    fn clean_run_completes_the_lifecycle() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        assert!(!sim.finish().unwrap());
        assert!(sim.is_done());

        let steps: Vec<_> = records(&sim, 1).iter().map(|r| (r.kind, r.time)).collect();
        assert_eq!(
            steps,
            vec![
                (EventKind::NotAssembled, hm(7, 30)),
                (EventKind::Ready, hm(7, 50)),
                (EventKind::Running, hm(8, 0)),
                (EventKind::Arrived, hm(10, 0)),
                (EventKind::Finished, hm(10, 20)),
            ]
        );
        let speeds: Vec<_> = records(&sim, 1).iter().map(|r| r.snapshot.average_speed_kmh).collect();
        assert_eq!(speeds, vec![0, 0, 60, 0, 0]);

        let train = sim.network().train(TrainId(1)).unwrap();
        assert_eq!(train.status, TrainStatus::Finished);
        assert!(train.connected.is_empty());
        let beta = sim.network().station_id("Beta").unwrap();
        assert_eq!(sim.network().locate_vehicle(VehicleId(1)).unwrap(), VehicleLocation::Parked(beta));
        assert_eq!(sim.delays().departure_secs, 0);
        assert_eq!(sim.delays().arrival_secs, 0);
    }

    #[test]
    fn last_pending_event_is_dropped_unless_under_way() {
        // With nothing left behind it, the sentinel's NotAssembled step is
        // dropped at the horizon check.
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        sim.finish().unwrap();
        assert!(records(&sim, 99).is_empty());
        assert_eq!(
            sim.network().train(TrainId(99)).unwrap().status,
            TrainStatus::NotAssembled
        );
    }

    /// Train 2 (Alpha 08:00 → Beta 10:00) needs a sleeper; the only one is
    /// at Beta and comes over on train 3 (Beta 07:00 → Alpha 08:00).
    fn retry_network() -> Network {
        network(
            vec![("Beta", sleeper(5))],
            vec![
                line(2, "Alpha", "Beta", (8, 0), (10, 0), vec![VehicleKind::SleepingCar]),
                line(3, "Beta", "Alpha", (7, 0), (8, 0), vec![VehicleKind::SleepingCar]),
                sentinel(),
            ],
        )
    }

    #[test]
    fn assembly_retries_every_ten_minutes_until_vehicle_returns() {
        let mut sim = SimBuilder::new(SimConfig::default(), retry_network()).build().unwrap();
        sim.finish().unwrap();

        let t2 = records(&sim, 2);
        let kinds: Vec<_> = t2.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::NotAssembled,
                EventKind::Incomplete,
                EventKind::Incomplete,
                EventKind::Incomplete,
                EventKind::Incomplete,
                EventKind::Incomplete,
                EventKind::Ready,
                EventKind::Running,
                EventKind::Arrived,
                EventKind::Finished,
            ]
        );

        let retry_times: Vec<_> = t2[1..6].iter().map(|r| r.time).collect();
        assert_eq!(retry_times, vec![hm(7, 40), hm(7, 50), hm(8, 0), hm(8, 10), hm(8, 20)]);

        let planned: Vec<_> = t2[..6].iter().map(|r| r.snapshot.planned_departure).collect();
        assert_eq!(
            planned,
            vec![hm(8, 10), hm(8, 20), hm(8, 30), hm(8, 40), hm(8, 50), hm(8, 50)]
        );
        assert!(t2[..5].iter().all(|r| r.snapshot.status == TrainStatus::Incomplete));
        assert!(t2[..5].iter().all(|r| r.snapshot.connected.is_empty()));
        assert_eq!(t2[5].snapshot.status, TrainStatus::Assembled);
        assert_eq!(t2[5].snapshot.connected, vec![VehicleId(5)]);

        // Without a locomotive the line limit applies, so the potential
        // arrival stays ahead of 10:00 and each failed retry books 10:10.
        assert_eq!(t2[0].snapshot.expected_arrival, hm(10, 0));
        assert!(t2[1..5].iter().all(|r| r.snapshot.expected_arrival == hm(10, 10)));
        assert_eq!(t2[5].snapshot.expected_arrival, hm(10, 0));

        // Train 3 was disassembled at Alpha immediately before the retry.
        let t3_finish = sim.execution_log().iter().position(|r| r.train == TrainId(3) && r.kind == EventKind::Finished).unwrap();
        let t2_success = sim.execution_log().iter().position(|r| std::ptr::eq(r, t2[5])).unwrap();
        assert_eq!(t3_finish + 1, t2_success);

        assert_eq!(t2[7].time, hm(8, 50));
        assert_eq!(sim.delays().departure_secs, 50 * 60);
        assert_eq!(sim.delays().arrival_secs, 0);
    }

    /// Train 2 (Alpha 08:00 → Beta 09:00) needs a diesel and a sleeper.
    /// Alpha only has the diesel; the sleeper arrives on train 3 at 07:30.
    fn partial_network() -> Network {
        network(
            vec![("Alpha", diesel(1)), ("Beta", sleeper(5))],
            vec![
                line(
                    2,
                    "Alpha",
                    "Beta",
                    (8, 0),
                    (9, 0),
                    vec![VehicleKind::DieselLocomotive, VehicleKind::SleepingCar],
                ),
                line(3, "Beta", "Alpha", (7, 0), (7, 30), vec![VehicleKind::SleepingCar]),
                sentinel(),
            ],
        )
    }

    #[test]
    fn partial_assembly_is_kept_across_retries() {
        let mut sim = SimBuilder::new(SimConfig::default(), partial_network()).build().unwrap();
        sim.finish().unwrap();
        let t2 = records(&sim, 2);

        assert_eq!(t2[0].kind, EventKind::NotAssembled);
        assert_eq!(t2[0].snapshot.status, TrainStatus::Incomplete);
        assert_eq!(t2[0].snapshot.connected, vec![VehicleId(1)]);
        assert_eq!(t2[0].snapshot.demanded, vec![VehicleKind::SleepingCar]);

        // Retry at 07:40 fails again but keeps the diesel.  Potential arrival
        // is 08:10 + 6100 s = 09:51:40, plus the 10 minute retry penalty.
        assert_eq!(t2[1].kind, EventKind::Incomplete);
        assert_eq!(t2[1].snapshot.status, TrainStatus::Incomplete);
        assert_eq!(t2[1].snapshot.connected, vec![VehicleId(1)]);
        assert_eq!(t2[1].snapshot.expected_arrival, hm(10, 1) + 40);
        assert_eq!(t2[1].snapshot.planned_departure, hm(8, 20));

        // Retry at 07:50 succeeds: 08:20 + 6100 s.
        assert_eq!(t2[2].time, hm(7, 50));
        assert_eq!(t2[2].snapshot.status, TrainStatus::Assembled);
        assert_eq!(t2[2].snapshot.connected, vec![VehicleId(1), VehicleId(5)]);
        assert!(t2[2].snapshot.demanded.is_empty());
        assert_eq!(t2[2].snapshot.expected_arrival, hm(10, 1) + 40);

        let running = t2.iter().find(|r| r.kind == EventKind::Running).unwrap();
        assert_eq!(running.time, hm(8, 20));
        assert_eq!(running.snapshot.average_speed_kmh, 71);
        let arrived = t2.iter().find(|r| r.kind == EventKind::Arrived).unwrap();
        assert_eq!(arrived.time, hm(10, 1) + 40);

        assert_eq!(sim.delays().departure_secs, 20 * 60);
        assert_eq!(sim.delays().arrival_secs, 61 * 60 + 40);
    }

    #[test]
    fn statistics_after_the_day() {
        let mut sim = SimBuilder::new(SimConfig::default(), partial_network()).build().unwrap();
        sim.finish().unwrap();

        let numbers = |trains: Vec<&rail_network::Train>| -> Vec<u32> {
            trains.iter().map(|t| t.number().0).collect()
        };
        let net = sim.network();
        assert_eq!(numbers(net.delayed_trains()), vec![2]);
        assert_eq!(numbers(net.on_time_trains()), vec![3]);
        assert!(net.stuck_trains().is_empty());

        let mut sim = SimBuilder::new(SimConfig::default(), retry_network()).build().unwrap();
        sim.finish().unwrap();
        let net = sim.network();
        assert_eq!(numbers(net.on_time_trains()), vec![2, 3]);
        assert!(net.delayed_trains().is_empty());
    }

    #[test]
    fn unmet_demand_leaves_train_stuck() {
        let net = network(
            vec![("Alpha", diesel(1))],
            vec![
                line(4, "Alpha", "Beta", (8, 0), (10, 0), vec![VehicleKind::ElectricLocomotive]),
                sentinel(),
            ],
        );
        let mut sim = SimBuilder::new(SimConfig::default(), net).build().unwrap();
        sim.finish().unwrap();

        let stuck: Vec<_> = sim.network().stuck_trains().iter().map(|t| t.number().0).collect();
        assert_eq!(stuck, vec![4]);
        assert_eq!(sim.network().train(TrainId(4)).unwrap().status, TrainStatus::Incomplete);
        assert!(sim.network().delayed_trains().iter().all(|t| t.number() != TrainId(4)));
    }

    #[test]
    fn start_distribution_is_taken_at_build() {
        let mut sim = SimBuilder::new(SimConfig::default(), partial_network()).build().unwrap();
        let at_build = vec![(StationId(0), 1), (StationId(1), 1)];
        assert_eq!(sim.start_distribution(), at_build.as_slice());

        sim.finish().unwrap();
        assert_eq!(sim.start_distribution(), at_build.as_slice());
        assert_eq!(sim.network().vehicle_distribution(), vec![(StationId(0), 0), (StationId(1), 2)]);
    }

    #[test]
    fn vehicle_life_cycle_follows_the_sleeper() {
        let mut sim = SimBuilder::new(SimConfig::default(), partial_network()).build().unwrap();
        sim.finish().unwrap();

        let cycle = sim.life_cycle_by_vehicle(VehicleId(5));
        assert!(cycle.found());
        let trains: Vec<_> = cycle.records.iter().map(|r| r.train.0).collect();
        assert_eq!(trains, vec![3, 3, 3, 3, 2, 2, 2, 2]);
        assert!(cycle.records.iter().all(|r| r.kind != EventKind::Finished));

        assert!(!sim.life_cycle_by_vehicle(VehicleId(404)).found());
    }

    #[test]
    fn train_life_cycle_round_trip() {
        let mut sim = SimBuilder::new(SimConfig::default(), retry_network()).build().unwrap();
        sim.finish().unwrap();

        let log = sim.execution_log();
        let mut total = 0;
        for number in [2, 3, 99] {
            let cycle = sim.life_cycle_by_train(TrainId(number));
            let expected: Vec<&EventRecord> = log.iter().filter(|r| r.train.0 == number).collect();
            assert_eq!(cycle.records, expected);
            total += cycle.records.len();
        }
        assert_eq!(total, log.len());
        assert!(!sim.life_cycle_by_train(TrainId(12345)).found());
    }
}

// ── Dispatch rule ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use crate::{Event, EventKind, EventQueue, SimError};
    use rail_network::TrainStatus;

    fn throttled_sim() -> Sim {
        let config = SimConfig { stop_time: hm(12, 0), ..SimConfig::default() };
        let mut sim = SimBuilder::new(config, clean_network()).build().unwrap();
        sim.queue = EventQueue::new();
        sim
    }

    #[test]
    fn running_past_horizon_executes_and_moves_time() {
        let mut sim = throttled_sim();
        let t = hm(12, 0) + 1;
        sim.schedule(Event::new(EventKind::Running, t, TrainId(1)));

        assert!(sim.run_next().unwrap());
        assert_eq!(sim.execution_log().len(), 1);
        assert_eq!(sim.execution_log()[0].kind, EventKind::Running);
        assert_eq!(sim.clock().current, t);
        assert_eq!(sim.network().train(TrainId(1)).unwrap().status, TrainStatus::Running);
        assert_eq!(sim.pending().next().unwrap().kind, EventKind::Arrived);
    }

    #[test]
    fn ready_past_horizon_is_discarded() {
        let mut sim = throttled_sim();
        sim.schedule(Event::new(EventKind::Ready, hm(12, 0) + 1, TrainId(1)));

        assert!(sim.run_next().unwrap());
        assert!(sim.execution_log().is_empty());
        assert!(sim.is_done());
        assert_eq!(sim.clock().current, SimTime::MIDNIGHT);
        assert_eq!(sim.network().train(TrainId(1)).unwrap().status, TrainStatus::NotAssembled);
    }

    #[test]
    fn ready_runs_when_more_work_is_due_before_horizon() {
        let mut sim = throttled_sim();
        sim.schedule(Event::new(EventKind::Ready, hm(9, 0), TrainId(1)));
        sim.schedule(Event::new(EventKind::Ready, hm(11, 0), TrainId(99)));

        assert!(sim.run_next().unwrap());
        assert_eq!(sim.execution_log().len(), 1);
        // Eager execution leaves the current time alone.
        assert_eq!(sim.clock().current, SimTime::MIDNIGHT);
    }

    #[test]
    fn ready_dropped_when_next_event_is_past_horizon() {
        let mut sim = throttled_sim();
        sim.schedule(Event::new(EventKind::Ready, hm(11, 0), TrainId(1)));
        sim.schedule(Event::new(EventKind::Ready, hm(13, 0), TrainId(99)));

        assert!(sim.run_next().unwrap());
        assert!(sim.execution_log().is_empty());
        assert_eq!(sim.pending_count(), 1);
    }

    #[test]
    fn empty_queue_signals_completion() {
        let mut sim = throttled_sim();
        assert!(!sim.run_next().unwrap());
        assert!(matches!(sim.peek_next_time(), Err(SimError::EmptyQueue)));
        assert!(matches!(sim.next_event(), Err(SimError::EmptyQueue)));
    }

    #[test]
    fn run_until_only_takes_events_strictly_before_now() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        sim.set_start_time(hm(7, 30)).unwrap();
        assert!(sim.run_until().unwrap());
        assert!(sim.execution_log().is_empty());

        assert!(sim.advance_interval().unwrap());
        assert_eq!(sim.clock().current, hm(7, 40));
        assert_eq!(sim.execution_log().len(), 1);
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;
    use crate::{DelayTotals, EventKind, SimError};
    use rail_network::TrainStatus;

    #[test]
    fn interval_stepping_runs_the_day() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        let mut steps = 0;
        while sim.advance_interval().unwrap() {
            steps += 1;
            assert!(steps < 1_000, "interval stepping did not terminate");
        }
        assert_eq!(sim.network().train(TrainId(1)).unwrap().status, TrainStatus::Finished);
        assert_eq!(records(&sim, 1).len(), 5);
    }

    #[test]
    fn next_event_jumps_to_due_time() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        sim.next_event().unwrap();
        assert_eq!(sim.clock().current, hm(7, 30));
        assert_eq!(sim.execution_log().len(), 1);
    }

    #[test]
    fn time_setters_validate() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network()).build().unwrap();
        sim.set_start_time(hm(6, 0)).unwrap();
        assert_eq!(sim.clock().current, hm(6, 0));
        assert_eq!(sim.clock().start, hm(6, 0));

        assert!(matches!(sim.set_stop_time(hm(5, 0)), Err(SimError::Config(_))));
        sim.set_stop_time(hm(22, 0)).unwrap();
        assert_eq!(sim.config.stop_time, hm(22, 0));
        assert!(matches!(sim.set_start_time(hm(23, 0)), Err(SimError::Config(_))));

        assert!(matches!(sim.set_interval(0), Err(SimError::Config(_))));
        sim.set_interval(1_800).unwrap();
        sim.advance_interval().unwrap();
        assert_eq!(sim.clock().current, hm(6, 30));
    }

    #[derive(Default)]
    struct Recorder {
        seen:  Vec<(u32, EventKind, SimTime)>,
        moved: Vec<SimTime>,
        ends:  usize,
        final_delays: Option<DelayTotals>,
    }

    impl SimObserver for Recorder {
        fn on_event(&mut self, record: &EventRecord, network: &Network) {
            assert!(network.train(record.train).is_ok());
            self.seen.push((record.train.0, record.kind, record.time));
        }
        fn on_time_advanced(&mut self, now: SimTime) {
            self.moved.push(now);
        }
        fn on_sim_end(&mut self, _now: SimTime, delays: &DelayTotals) {
            self.ends += 1;
            self.final_delays = Some(*delays);
        }
    }

    #[test]
    fn stepping_by_events_reports_the_end_once() {
        let mut sim = SimBuilder::new(SimConfig::default(), clean_network())
            .observer(Recorder::default())
            .build()
            .unwrap();
        let mut steps = 0;
        let err = loop {
            match sim.next_event() {
                Ok(_) => steps += 1,
                Err(e) => break e,
            }
            assert!(steps < 1_000, "event stepping did not terminate");
        };
        assert!(matches!(err, SimError::EmptyQueue));
        assert!(sim.is_done());
        assert_eq!(sim.observer().ends, 1);

        assert!(matches!(sim.next_event(), Err(SimError::EmptyQueue)));
        assert_eq!(sim.observer().ends, 1);
        assert_eq!(sim.network().train(TrainId(1)).unwrap().status, TrainStatus::Finished);
    }

    #[test]
    fn observer_skips_events_before_start_time() {
        let config = SimConfig { start_time: hm(7, 45), ..SimConfig::default() };
        let mut sim = SimBuilder::new(config, clean_network())
            .observer(Recorder::default())
            .build()
            .unwrap();
        sim.finish().unwrap();
        assert!(!sim.run_next().unwrap());

        let log_len = sim.execution_log().len();
        let recorder = sim.into_observer();
        assert_eq!(recorder.seen.len(), log_len - 1);
        assert_eq!(recorder.seen[0], (1, EventKind::Ready, hm(7, 50)));
        assert!(recorder.seen.iter().all(|&(_, _, t)| t >= hm(7, 45)));
        assert_eq!(recorder.moved, vec![SimConfig::default().stop_time]);
        assert_eq!(recorder.ends, 1);
        assert_eq!(recorder.final_delays, Some(DelayTotals::default()));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;
    use rail_network::TrainStatus;

    const STATIONS: [&str; 3] = ["S0", "S1", "S2"];

    #[derive(Clone, Debug)]
    struct LineSeed {
        origin:      usize,
        hop:         usize,
        depart_min:  i64,
        run_min:     i64,
        speed_kmh:   u32,
        demand:      Vec<u8>,
    }

    fn line_seed() -> impl Strategy<Value = LineSeed> {
        (0..3usize, 1..3usize, 60..1_200i64, 30..240i64, 40..200u32, prop::collection::vec(0..6u8, 0..4))
            .prop_map(|(origin, hop, depart_min, run_min, speed_kmh, demand)| LineSeed {
                origin,
                hop,
                depart_min,
                run_min,
                speed_kmh,
                demand,
            })
    }

    fn to_line(number: u32, seed: &LineSeed) -> TrainLine {
        TrainLine {
            number:        TrainId(number),
            origin:        STATIONS[seed.origin].into(),
            destination:   STATIONS[(seed.origin + seed.hop) % 3].into(),
            departure:     SimTime(seed.depart_min * 60),
            arrival:       SimTime((seed.depart_min + seed.run_min) * 60),
            demand:        seed.demand.iter().map(|&c| VehicleKind::from_code(c).unwrap()).collect(),
            max_speed_kmh: seed.speed_kmh,
        }
    }

    fn vehicle(id: u32, code: u8, speed_kmh: u32) -> Vehicle {
        let kind = VehicleKind::from_code(code).unwrap();
        Vehicle::new(VehicleId(id), VehicleSpec::from_params(kind, speed_kmh, 1))
    }

    fn base_builder(km: [u32; 3]) -> NetworkBuilder {
        let mut b = NetworkBuilder::new();
        for name in STATIONS {
            b.station(name);
        }
        b.add_distance("S0", "S1", km[0]);
        b.add_distance("S1", "S2", km[1]);
        b.add_distance("S0", "S2", km[2]);
        b
    }

    proptest! {
        #[test]
        fn conservation_partition_and_monotonic_delays(
            parked in prop::collection::vec((0..3usize, 0..6u8, 40..200u32), 0..12),
            seeds in prop::collection::vec(line_seed(), 1..6),
            km in [10..300u32, 10..300u32, 10..300u32],
        ) {
            let mut b = base_builder(km);
            for (i, &(station, code, speed)) in parked.iter().enumerate() {
                let id = b.station(STATIONS[station]);
                b.add_vehicle(id, vehicle(i as u32 + 1, code, speed));
            }
            for (i, seed) in seeds.iter().enumerate() {
                b.add_line(to_line(i as u32 + 1, seed));
            }
            let mut sim = SimBuilder::new(SimConfig::default(), b.build().unwrap()).build().unwrap();
            let total = sim.network().vehicle_total();

            let mut last = sim.delays();
            let mut steps = 0;
            while sim.run_next().unwrap() {
                steps += 1;
                prop_assert!(steps < 10_000);

                let net = sim.network();
                prop_assert_eq!(net.vehicles_parked() + net.vehicles_connected(), total);
                for train in net.trains() {
                    if train.status != TrainStatus::Finished {
                        prop_assert!(train.demand_is_partitioned(), "train {} lost demand", train.number());
                    }
                }

                let now = sim.delays();
                prop_assert!(now.departure_secs >= last.departure_secs);
                prop_assert!(now.arrival_secs >= last.arrival_secs);
                last = now;
            }
        }

        #[test]
        fn well_stocked_trains_all_finish(
            seeds in prop::collection::vec(line_seed(), 1..6),
            km in [10..300u32, 10..300u32, 10..300u32],
        ) {
            let mut b = base_builder(km);
            let mut next_id = 1;
            for seed in &seeds {
                let origin = b.station(STATIONS[seed.origin]);
                for &code in &seed.demand {
                    b.add_vehicle(origin, vehicle(next_id, code, 100));
                    next_id += 1;
                }
            }
            for (i, seed) in seeds.iter().enumerate() {
                b.add_line(to_line(i as u32 + 1, seed));
            }
            // Departs the next day so it is still pending when the others finish.
            b.add_line(TrainLine {
                number:        TrainId(999),
                origin:        "S0".into(),
                destination:   "S1".into(),
                departure:     SimTime::from_hm(40, 0),
                arrival:       SimTime::from_hm(41, 0),
                demand:        vec![],
                max_speed_kmh: 100,
            });

            let config = SimConfig { stop_time: SimTime::from_hm(48, 0), ..SimConfig::default() };
            let mut sim = SimBuilder::new(config, b.build().unwrap()).build().unwrap();
            prop_assert!(!sim.finish().unwrap());

            for train in sim.network().trains().iter().filter(|t| t.number() != TrainId(999)) {
                prop_assert_eq!(train.status, TrainStatus::Finished);
                prop_assert_eq!(train.departure_slip(), 0);
            }
            prop_assert_eq!(sim.network().vehicles_parked(), sim.network().vehicle_total());
        }
    }
}
