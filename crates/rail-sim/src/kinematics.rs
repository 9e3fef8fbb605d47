//! Trip-duration model.
//!
//! A trip is three phases: uniform acceleration from standstill to the
//! effective top speed, cruising at that speed, and uniform deceleration to a
//! stop.  With top speed `v`, acceleration `a`, deceleration `d` and route
//! length `D`:
//!
//! ```text
//! d_acc  = v² / 2a
//! d_dec  = v² / 2d
//! d_full = D − d_acc − d_dec
//! t      = (2·d_acc + 2·d_dec + d_full) / v
//! ```
//!
//! The ramps are covered at half the top speed, hence the doubled terms.
//! Routes too short to reach top speed are not special-cased: `d_full` goes
//! negative and the formula still yields a (slightly optimistic) duration.

use rail_network::Train;

/// Fixed-rate acceleration and deceleration model.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicModel {
    pub acceleration_m_s2: f64,
    pub deceleration_m_s2: f64,
}

impl Default for KinematicModel {
    fn default() -> Self {
        Self { acceleration_m_s2: 0.2, deceleration_m_s2: 0.2 }
    }
}

impl KinematicModel {
    pub fn new(acceleration_m_s2: f64, deceleration_m_s2: f64) -> Self {
        Self { acceleration_m_s2, deceleration_m_s2 }
    }

    /// Top speed `train` may run at: the line limit, capped by the slowest
    /// connected locomotive.
    pub fn effective_speed_kmh(train: &Train) -> u32 {
        let line = train.line().max_speed_kmh;
        train.locomotive_max_speed().map_or(line, |loco| line.min(loco))
    }

    /// Whole seconds needed to cover `distance_km` with top speed
    /// `max_speed_kmh`.  Zero if the speed is zero.
    pub fn potential_duration_secs(&self, distance_km: u32, max_speed_kmh: u32) -> i64 {
        if max_speed_kmh == 0 {
            return 0;
        }
        let v = f64::from(max_speed_kmh) / 3.6;
        let distance_m = f64::from(distance_km) * 1_000.0;
        let d_acc = v * v / (2.0 * self.acceleration_m_s2);
        let d_dec = v * v / (2.0 * self.deceleration_m_s2);
        let d_full = distance_m - d_acc - d_dec;
        ((2.0 * d_acc + 2.0 * d_dec + d_full) / v).round() as i64
    }

    /// Mean speed over `distance_km` covered in `duration_secs`, rounded to
    /// whole km/h.  Zero for a non-positive duration.
    pub fn average_speed_kmh(distance_km: u32, duration_secs: i64) -> u32 {
        if duration_secs <= 0 {
            return 0;
        }
        (f64::from(distance_km) * 3_600.0 / duration_secs as f64).round() as u32
    }
}
