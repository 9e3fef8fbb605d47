//! Rolling stock: the six vehicle kinds and their attribute records.
//!
//! A vehicle is a tagged variant.  The kind tag is what trains demand and
//! what station pools are searched by; the attributes only matter for speed
//! capping (locomotives) and for human-readable details.

use std::fmt;

use crate::{CoreError, CoreResult, VehicleId};

// ── VehicleKind ───────────────────────────────────────────────────────────────

/// The type tag a train demands.  Discriminants are the numeric codes used in
/// network definition files.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleKind {
    CoachCar           = 0,
    SleepingCar        = 1,
    OpenFreightCar     = 2,
    CoveredFreightCar  = 3,
    ElectricLocomotive = 4,
    DieselLocomotive   = 5,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 6] = [
        VehicleKind::CoachCar,
        VehicleKind::SleepingCar,
        VehicleKind::OpenFreightCar,
        VehicleKind::CoveredFreightCar,
        VehicleKind::ElectricLocomotive,
        VehicleKind::DieselLocomotive,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`][Self::code].
    pub fn from_code(code: u8) -> CoreResult<VehicleKind> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| CoreError::Parse(format!("unknown vehicle kind code {code}")))
    }

    #[inline]
    pub fn is_locomotive(self) -> bool {
        matches!(self, VehicleKind::ElectricLocomotive | VehicleKind::DieselLocomotive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::CoachCar           => "Coach car",
            VehicleKind::SleepingCar        => "Sleeping car",
            VehicleKind::OpenFreightCar     => "Open car",
            VehicleKind::CoveredFreightCar  => "Covered car",
            VehicleKind::ElectricLocomotive => "Electrical engine",
            VehicleKind::DieselLocomotive   => "Diesel engine",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleSpec ───────────────────────────────────────────────────────────────

/// Kind-specific attributes.  The variant *is* the kind.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleSpec {
    Coach          { seats: u32, internet: bool },
    Sleeping       { beds: u32 },
    OpenFreight    { capacity_tonnes: u32, floor_area_m2: u32 },
    CoveredFreight { volume_m3: u32 },
    Electric       { max_speed_kmh: u32, power_kw: u32 },
    Diesel         { max_speed_kmh: u32, fuel_l_per_h: u32 },
}

impl VehicleSpec {
    /// Build a spec from the two positional parameters used in station files.
    /// Kinds with a single attribute ignore `p1`.
    pub fn from_params(kind: VehicleKind, p0: u32, p1: u32) -> VehicleSpec {
        match kind {
            VehicleKind::CoachCar           => VehicleSpec::Coach { seats: p0, internet: p1 != 0 },
            VehicleKind::SleepingCar        => VehicleSpec::Sleeping { beds: p0 },
            VehicleKind::OpenFreightCar     => VehicleSpec::OpenFreight { capacity_tonnes: p0, floor_area_m2: p1 },
            VehicleKind::CoveredFreightCar  => VehicleSpec::CoveredFreight { volume_m3: p0 },
            VehicleKind::ElectricLocomotive => VehicleSpec::Electric { max_speed_kmh: p0, power_kw: p1 },
            VehicleKind::DieselLocomotive   => VehicleSpec::Diesel { max_speed_kmh: p0, fuel_l_per_h: p1 },
        }
    }

    pub fn kind(&self) -> VehicleKind {
        match self {
            VehicleSpec::Coach { .. }          => VehicleKind::CoachCar,
            VehicleSpec::Sleeping { .. }       => VehicleKind::SleepingCar,
            VehicleSpec::OpenFreight { .. }    => VehicleKind::OpenFreightCar,
            VehicleSpec::CoveredFreight { .. } => VehicleKind::CoveredFreightCar,
            VehicleSpec::Electric { .. }       => VehicleKind::ElectricLocomotive,
            VehicleSpec::Diesel { .. }         => VehicleKind::DieselLocomotive,
        }
    }

    /// Rated top speed; `None` for carriages.
    pub fn max_speed_kmh(&self) -> Option<u32> {
        match *self {
            VehicleSpec::Electric { max_speed_kmh, .. }
            | VehicleSpec::Diesel { max_speed_kmh, .. } => Some(max_speed_kmh),
            _ => None,
        }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One physical vehicle.  Owned by exactly one station pool or one train.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:   VehicleId,
    pub spec: VehicleSpec,
}

impl Vehicle {
    pub fn new(id: VehicleId, spec: VehicleSpec) -> Self {
        Self { id, spec }
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.spec.kind()
    }

    #[inline]
    pub fn max_speed_kmh(&self) -> Option<u32> {
        self.spec.max_speed_kmh()
    }
}

/// Single-line details, e.g. `Id: 12 Diesel engine Max speed (km/h): 160 Fuel
/// consumption (l/h): 300`.
impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id: {} {}", self.id.0, self.kind())?;
        match self.spec {
            VehicleSpec::Coach { seats, internet } => write!(
                f,
                " Number of seats: {seats} Has internet: {}",
                if internet { "Yes" } else { "No" }
            ),
            VehicleSpec::Sleeping { beds } => write!(f, " Number of beds: {beds}"),
            VehicleSpec::OpenFreight { capacity_tonnes, floor_area_m2 } => write!(
                f,
                " Weight capacity (ton): {capacity_tonnes} Floor area (m2): {floor_area_m2}"
            ),
            VehicleSpec::CoveredFreight { volume_m3 } => {
                write!(f, " Volume capacity (m3): {volume_m3}")
            }
            VehicleSpec::Electric { max_speed_kmh, power_kw } => write!(
                f,
                " Max speed (km/h): {max_speed_kmh} Max power (kW): {power_kw}"
            ),
            VehicleSpec::Diesel { max_speed_kmh, fuel_l_per_h } => write!(
                f,
                " Max speed (km/h): {max_speed_kmh} Fuel consumption (l/h): {fuel_l_per_h}"
            ),
        }
    }
}
