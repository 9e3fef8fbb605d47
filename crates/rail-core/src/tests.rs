//! Unit tests for rail-core primitives.

#[cfg(test)]
mod ids {
    use crate::{StationId, TrainId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = StationId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StationId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(TrainId(1) < TrainId(2));
        assert!(VehicleId(100) > VehicleId(99));
    }

    #[test]
    fn display() {
        assert_eq!(TrainId(7).to_string(), "TrainId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{format_delay, minutes, SimClock, SimConfig, SimTime, Verbosity};

    #[test]
    fn time_arithmetic() {
        let t = SimTime::from_hm(8, 0);
        assert_eq!(t + minutes(20), SimTime::from_hm(8, 20));
        assert_eq!(t - minutes(30), SimTime::from_hm(7, 30));
        assert_eq!(SimTime::from_hm(9, 0) - t, 3_600);
        assert_eq!(SimTime::from_hm(9, 0).since(t), 3_600);
    }

    #[test]
    fn display_is_hh_mm() {
        assert_eq!(SimTime::from_hm(7, 5).to_string(), "07:05");
        assert_eq!(SimTime(59).to_string(), "00:00");
    }

    #[test]
    fn display_wraps_across_midnight() {
        // 00:10 departure → assembly 30 min earlier, the previous evening.
        assert_eq!((SimTime::from_hm(0, 10) - minutes(30)).to_string(), "23:40");
        assert_eq!(SimTime::from_hm(25, 15).to_string(), "01:15");
    }

    #[test]
    fn parse_clock_time() {
        assert_eq!("06:45".parse::<SimTime>().unwrap(), SimTime::from_hm(6, 45));
        assert_eq!(" 23:59 ".parse::<SimTime>().unwrap(), SimTime::from_hm(23, 59));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("6.45".parse::<SimTime>().is_err());
        assert!("24:00".parse::<SimTime>().is_err());
        assert!("12:60".parse::<SimTime>().is_err());
        assert!("ab:cd".parse::<SimTime>().is_err());
    }

    #[test]
    fn delay_formatting() {
        assert_eq!(format_delay(minutes(20)), "00:20");
        assert_eq!(format_delay(minutes(125)), "02:05");
        assert_eq!(format_delay(101 * 3_600), "101:00");
        assert_eq!(format_delay(-minutes(10)), "-00:10");
    }

    #[test]
    fn clock_advance_and_horizon() {
        let mut clock = SimClock::new(SimTime::MIDNIGHT, SimTime::from_hm(1, 0));
        assert_eq!(clock.current, SimTime::MIDNIGHT);
        assert!(!clock.past_horizon());
        clock.advance(minutes(60));
        assert!(clock.past_horizon());
    }

    #[test]
    fn default_config_covers_one_day() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.start_time, SimTime::MIDNIGHT);
        assert_eq!(cfg.stop_time, SimTime::from_hm(23, 59));
        assert_eq!(cfg.interval_secs, 600);
        assert_eq!(cfg.verbosity, Verbosity::Low);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.make_clock().current, cfg.start_time);
    }

    #[test]
    fn config_validation() {
        let inverted = SimConfig {
            start_time: SimTime::from_hm(10, 0),
            stop_time:  SimTime::from_hm(9, 0),
            ..SimConfig::default()
        };
        assert!(inverted.validate().is_err());

        let zero_step = SimConfig { interval_secs: 0, ..SimConfig::default() };
        assert!(zero_step.validate().is_err());
    }
}

#[cfg(test)]
mod vehicle {
    use crate::{Vehicle, VehicleId, VehicleKind, VehicleSpec};

    #[test]
    fn kind_codes_roundtrip() {
        for kind in VehicleKind::ALL {
            assert_eq!(VehicleKind::from_code(kind.code()).unwrap(), kind);
        }
        assert!(VehicleKind::from_code(6).is_err());
    }

    #[test]
    fn only_engines_are_locomotives() {
        let locos: Vec<_> = VehicleKind::ALL.into_iter().filter(|k| k.is_locomotive()).collect();
        assert_eq!(locos, vec![VehicleKind::ElectricLocomotive, VehicleKind::DieselLocomotive]);
    }

    #[test]
    fn spec_from_params_matches_kind() {
        for kind in VehicleKind::ALL {
            assert_eq!(VehicleSpec::from_params(kind, 1, 1).kind(), kind);
        }
    }

    #[test]
    fn locomotives_report_max_speed() {
        let diesel = Vehicle::new(VehicleId(1), VehicleSpec::Diesel { max_speed_kmh: 160, fuel_l_per_h: 300 });
        let coach = Vehicle::new(VehicleId(2), VehicleSpec::Coach { seats: 60, internet: true });
        assert_eq!(diesel.max_speed_kmh(), Some(160));
        assert_eq!(coach.max_speed_kmh(), None);
    }

    #[test]
    fn details_line() {
        let coach = Vehicle::new(VehicleId(3), VehicleSpec::from_params(VehicleKind::CoachCar, 64, 0));
        assert_eq!(coach.to_string(), "Id: 3 Coach car Number of seats: 64 Has internet: No");

        let electric = Vehicle::new(VehicleId(9), VehicleSpec::Electric { max_speed_kmh: 200, power_kw: 5_600 });
        assert_eq!(
            electric.to_string(),
            "Id: 9 Electrical engine Max speed (km/h): 200 Max power (kW): 5600"
        );
    }
}
