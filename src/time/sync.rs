use crate::{
    error::Error,
    prelude::{Duration, Epoch},
    time::{GpsTime, LeapSecondTable},
};

/// [TimeSync] maps readings of a monotonic clock onto [GpsTime],
/// from a single reference pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeSync {
    /// Monotonic clock reading at the reference instant
    pub ref_mono: Duration,
    /// GPS time at the reference instant
    pub ref_gpst: GpsTime,
}

impl TimeSync {
    pub fn new(ref_mono: Duration, ref_gpst: GpsTime) -> Self {
        Self { ref_mono, ref_gpst }
    }

    /// Synchronizes on a UTC instant, taken as the origin of the monotonic clock.
    pub fn from_utc(utc: Epoch, table: &LeapSecondTable) -> Result<Self, Error> {
        Ok(Self::new(Duration::ZERO, GpsTime::from_utc(utc, table)?))
    }

    /// Monotonic reading to [GpsTime]
    pub fn mono_to_gpst(&self, mono: Duration) -> GpsTime {
        self.ref_gpst + (mono - self.ref_mono)
    }

    /// [GpsTime] to monotonic reading
    pub fn gpst_to_mono(&self, t: GpsTime) -> Duration {
        self.ref_mono + Duration::from_seconds(t - self.ref_gpst)
    }
}

impl std::fmt::Display for TimeSync {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "mono={} gpst={}", self.ref_mono, self.ref_gpst)
    }
}
