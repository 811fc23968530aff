use std::cmp::Ordering;

use hifitime::Unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cfg::KeplerOpts,
    error::Error,
    prelude::{
        Constellation, Duration, Epoch, GpsTime, LeapSecondTable, SatelliteState, Vector3, SV,
    },
};

mod kepler;
mod propagation;
mod selection;

pub use kepler::solve_kepler;
pub use selection::{group_by_sv, select_gps};

/// GPS broadcast (LNAV) ephemeris frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsEphemeris {
    /// [SV]
    pub sv: SV,

    /// Time of Ephemeris
    pub toe: GpsTime,

    /// Time of Clock
    pub toc: GpsTime,

    /// Clock bias (in seconds)
    pub af0: f64,

    /// Clock drift (s.s⁻¹)
    pub af1: f64,

    /// Clock drift rate (s.s⁻²)
    pub af2: f64,

    /// Square root of the semi-major axis (in sqrt(m))
    pub sqrt_a: f64,

    /// Eccentricity
    pub eccentricity: f64,

    /// Mean anomaly at ToE (in radians)
    pub m0_rad: f64,

    /// Mean motion correction (in radians/s)
    pub dn_rad_s: f64,

    /// Inclination at ToE (in radians)
    pub i0_rad: f64,

    /// Inclination rate (in radians/s)
    pub idot_rad_s: f64,

    /// Longitude of the ascending node at weekly epoch (in radians)
    pub omega0_rad: f64,

    /// Argument of perigee (in radians)
    pub omega_rad: f64,

    /// Rate of right ascension (in radians/s)
    pub omega_dot_rad_s: f64,

    /// Sine / Cosine (in radians)
    pub cus_cuc_rad: (f64, f64),

    /// Sine / Cosine (in radians)
    pub cis_cic_rad: (f64, f64),

    /// Sine / Cosine (in meters)
    pub crs_crc_m: (f64, f64),

    /// 0 means healthy
    pub health: u32,

    /// Issue of Data, Ephemeris
    pub iode: f64,

    /// Issue of Data, Clock
    pub iodc: f64,

    /// Total group delay (in seconds)
    pub tgd_s: f64,

    /// User range accuracy (in meters)
    pub accuracy_m: f64,

    pub l2_codes: f64,

    pub l2p_flag: f64,

    /// Transmission time of message (seconds of week)
    pub transmission_tow_s: f64,

    /// Curve fit interval (in hours), 0 when not broadcast
    pub fit_interval_h: f64,

    /// Validity window around ToE
    pub max_dtoe: Duration,

    /// File this frame was read from
    pub source: Option<String>,
}

impl Default for GpsEphemeris {
    fn default() -> Self {
        Self {
            sv: SV::new(Constellation::GPS, 1),
            toe: GpsTime::default(),
            toc: GpsTime::default(),
            af0: 0.0,
            af1: 0.0,
            af2: 0.0,
            sqrt_a: 0.0,
            eccentricity: 0.0,
            m0_rad: 0.0,
            dn_rad_s: 0.0,
            i0_rad: 0.0,
            idot_rad_s: 0.0,
            omega0_rad: 0.0,
            omega_rad: 0.0,
            omega_dot_rad_s: 0.0,
            cus_cuc_rad: (0.0, 0.0),
            cis_cic_rad: (0.0, 0.0),
            crs_crc_m: (0.0, 0.0),
            health: 0,
            iode: 0.0,
            iodc: 0.0,
            tgd_s: 0.0,
            accuracy_m: 0.0,
            l2_codes: 0.0,
            l2p_flag: 0.0,
            transmission_tow_s: 0.0,
            fit_interval_h: 0.0,
            max_dtoe: 2.0 * Unit::Hour,
            source: None,
        }
    }
}

/// GLONASS broadcast ephemeris: a state vector, not Keplerian elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlonassEphemeris {
    /// [SV] (slot number)
    pub sv: SV,

    /// Reference epoch, in [TimeScale::UTC](crate::prelude::TimeScale)
    pub epoch: Epoch,

    /// Clock bias -TauN (in seconds)
    pub clock_bias_s: f64,

    /// Relative frequency bias GammaN
    pub rel_freq_bias: f64,

    /// Message frame time (seconds of UTC week)
    pub frame_time_s: f64,

    /// ECEF position (in km)
    pub position_km: Vector3<f64>,

    /// ECEF velocity (in km/s)
    pub velocity_km_s: Vector3<f64>,

    /// ECEF luni-solar acceleration (in km/s²)
    pub acceleration_km_s2: Vector3<f64>,

    /// 0 means healthy
    pub health: u32,

    /// Frequency channel offset (-7..+13)
    pub channel: i8,

    /// Age of information (in days)
    pub age_days: f64,

    /// File this frame was read from
    pub source: Option<String>,
}

impl GlonassEphemeris {
    /// Reference epoch expressed as [GpsTime]
    pub fn epoch_gpst(&self, table: &LeapSecondTable) -> Result<GpsTime, Error> {
        GpsTime::from_utc(self.epoch, table)
    }
}

/// One broadcast ephemeris record. GPS frames hold Keplerian elements,
/// GLONASS frames hold a state vector: both are structurally unrelated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EphemerisRecord {
    Gps(GpsEphemeris),
    Glonass(GlonassEphemeris),
}

impl EphemerisRecord {
    pub fn sv(&self) -> SV {
        match self {
            Self::Gps(eph) => eph.sv,
            Self::Glonass(eph) => eph.sv,
        }
    }

    /// Returns true if the control segment did not flag this record
    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Gps(eph) => eph.health == 0,
            Self::Glonass(eph) => eph.health == 0,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Gps(eph) => eph.source.as_deref(),
            Self::Glonass(eph) => eph.source.as_deref(),
        }
    }

    pub fn as_gps(&self) -> Option<&GpsEphemeris> {
        match self {
            Self::Gps(eph) => Some(eph),
            Self::Glonass(_) => None,
        }
    }

    pub fn as_glonass(&self) -> Option<&GlonassEphemeris> {
        match self {
            Self::Gps(_) => None,
            Self::Glonass(eph) => Some(eph),
        }
    }

    /// Resolves the [SatelliteState] at `t`.
    /// GLONASS records need numerical integration which is not available:
    /// they always return [Error::UnsupportedPropagation].
    pub fn resolve_state(&self, t: GpsTime, opts: &KeplerOpts) -> Result<SatelliteState, Error> {
        match self {
            Self::Gps(eph) => eph.resolve_state(t, opts),
            Self::Glonass(eph) => Err(Error::UnsupportedPropagation(eph.sv)),
        }
    }

    /// Chronological order of reference epochs (ToE for GPS)
    pub(crate) fn cmp_epoch(&self, rhs: &Self) -> Ordering {
        match (self, rhs) {
            (Self::Gps(a), Self::Gps(b)) => a.toe.partial_cmp(&b.toe).unwrap_or(Ordering::Equal),
            (Self::Glonass(a), Self::Glonass(b)) => {
                a.epoch.partial_cmp(&b.epoch).unwrap_or(Ordering::Equal)
            },
            (Self::Gps(_), Self::Glonass(_)) => Ordering::Less,
            (Self::Glonass(_), Self::Gps(_)) => Ordering::Greater,
        }
    }
}

impl std::fmt::Display for GpsEphemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} GPS ephemeris", self.sv)?;
        writeln!(f, "  ToE: {} (week {} tow {})", self.toe, self.toe.week, self.toe.tow)?;
        writeln!(f, "  ToC: {}", self.toc)?;
        writeln!(f, "  Healthy: {} ({})", self.health == 0, self.health)?;
        writeln!(f, "  Max dToE: {}", self.max_dtoe)?;
        writeln!(f, "  Source: {}", self.source.as_deref().unwrap_or("unknown"))?;
        writeln!(f, "  Af0: {:.12e}", self.af0)?;
        writeln!(f, "  Af1: {:.12e}", self.af1)?;
        writeln!(f, "  Af2: {:.12e}", self.af2)?;
        writeln!(f, "  SqrtA: {:.6}", self.sqrt_a)?;
        writeln!(f, "  Eccentricity: {:.12e}", self.eccentricity)?;
        writeln!(f, "  M0: {:.12e}", self.m0_rad)?;
        writeln!(f, "  DeltaN: {:.12e}", self.dn_rad_s)?;
        writeln!(f, "  I0: {:.12e}", self.i0_rad)?;
        writeln!(f, "  IDOT: {:.12e}", self.idot_rad_s)?;
        writeln!(f, "  Omega0: {:.12e}", self.omega0_rad)?;
        writeln!(f, "  Omega: {:.12e}", self.omega_rad)?;
        writeln!(f, "  OmegaDot: {:.12e}", self.omega_dot_rad_s)?;
        writeln!(f, "  Cus: {:.12e} Cuc: {:.12e}", self.cus_cuc_rad.0, self.cus_cuc_rad.1)?;
        writeln!(f, "  Cis: {:.12e} Cic: {:.12e}", self.cis_cic_rad.0, self.cis_cic_rad.1)?;
        writeln!(f, "  Crs: {:.6} Crc: {:.6}", self.crs_crc_m.0, self.crs_crc_m.1)?;
        writeln!(f, "  IODE: {} IODC: {}", self.iode, self.iodc)?;
        write!(f, "  TGD: {:.12e}", self.tgd_s)
    }
}

impl std::fmt::Display for GlonassEphemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} GLONASS ephemeris", self.sv)?;
        writeln!(f, "  Epoch: {}", self.epoch)?;
        writeln!(f, "  Clock Bias: {:.12e}", self.clock_bias_s)?;
        writeln!(f, "  Relative Frequency Bias: {:.12e}", self.rel_freq_bias)?;
        writeln!(f, "  Message Frame Time: {:.6}", self.frame_time_s)?;
        for (axis, i) in [("X", 0), ("Y", 1), ("Z", 2)] {
            writeln!(
                f,
                "  {} (km): {:.3} vel: {:.6} acc: {:.9}",
                axis, self.position_km[i], self.velocity_km_s[i], self.acceleration_km_s2[i]
            )?;
        }
        writeln!(f, "  Health: {}", self.health)?;
        writeln!(f, "  Frequency Channel Offset: {}", self.channel)?;
        write!(f, "  Information Age: {:.6}", self.age_days)
    }
}

impl std::fmt::Display for EphemerisRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Gps(eph) => eph.fmt(f),
            Self::Glonass(eph) => eph.fmt(f),
        }
    }
}
