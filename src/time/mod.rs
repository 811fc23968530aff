//! GPS time algebra
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use hifitime::Unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DAYS_PER_GLONASS_CYCLE, MOSCOW_UTC_OFFSET_HOURS, SECONDS_PER_WEEK},
    error::Error,
    prelude::{Duration, Epoch, TimeScale},
};

mod leap;
mod sync;

pub use leap::{LeapBoundary, LeapSecondTable, GPS_LEAP_SECONDS};
pub use sync::TimeSync;

const NANOS_PER_WEEK: i128 = 604_800 * 1_000_000_000;

/// Naive calendar clock. TAI never inserts leap seconds, so gregorian
/// TAI fields behave like a plain proleptic calendar: this is used to
/// express GPST (and UTC) calendar dates as a continuous count.
pub(crate) fn calendar(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
) -> Result<Epoch, Error> {
    Epoch::maybe_from_gregorian_tai(year, month, day, hour, minute, second, nanos)
        .map_err(|_| Error::InvalidDate)
}

/// Calendar fields of this naive calendar instant, interpreted as UTC.
fn utc_from_calendar(t: Epoch) -> Result<Epoch, Error> {
    let (y, m, d, hh, mm, ss, ns) = t.to_gregorian_tai();
    Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, ss, ns).map_err(|_| Error::InvalidDate)
}

/// Naive calendar instant carrying the UTC calendar fields of `utc`.
fn calendar_from_utc(utc: Epoch) -> Result<Epoch, Error> {
    let (y, m, d, hh, mm, ss, ns) = utc.to_gregorian_utc();
    calendar(y, m, d, hh, mm, ss, ns)
}

fn gps_origin() -> Epoch {
    Epoch::from_gregorian_tai_at_midnight(1980, 1, 6)
}

/// [GpsTime] is the canonical instant: a week counter since 1980-01-06
/// and the seconds elapsed within that week.
///
/// Comparisons are always made on the signed difference in seconds,
/// so two un-normalized representations of the same instant compare equal.
#[derive(Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsTime {
    /// GPS week counter (no rollover)
    pub week: i32,
    /// Seconds of week
    pub tow: f64,
}

impl GpsTime {
    /// Builds a new [GpsTime], `tow` is normalized into the week.
    pub fn new(week: i32, tow: f64) -> Self {
        Self { week, tow: 0.0 } + tow
    }

    /// Converts a GPST calendar date to [GpsTime]. No leap seconds are involved.
    pub fn from_gpst_gregorian(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Result<Self, Error> {
        let t = calendar(year, month, day, hour, minute, second, nanos)?;
        Ok(Self::from_calendar(t))
    }

    fn from_calendar(t: Epoch) -> Self {
        let elapsed = (t - gps_origin()).total_nanoseconds();
        let week = elapsed.div_euclid(NANOS_PER_WEEK);
        let nanos = elapsed.rem_euclid(NANOS_PER_WEEK);
        Self {
            week: week as i32,
            tow: nanos as f64 / 1.0E9,
        }
    }

    fn to_calendar(&self) -> Epoch {
        let nanos = i128::from(self.week) * NANOS_PER_WEEK + (self.tow * 1.0E9).round() as i128;
        gps_origin() + Duration::from_total_nanoseconds(nanos)
    }

    /// Converts a UTC instant to [GpsTime], using the leap seconds known to `table`.
    pub fn from_utc(utc: Epoch, table: &LeapSecondTable) -> Result<Self, Error> {
        let leap = table.offset_seconds(utc)?;
        let t = calendar_from_utc(utc)?;
        Ok(Self::from_calendar(t) + f64::from(leap))
    }

    /// Converts this instant to UTC, using the leap seconds known to `table`.
    /// Instants that fall within an inserted leap second cannot be represented
    /// and resolve to the following second.
    pub fn to_utc(&self, table: &LeapSecondTable) -> Result<Epoch, Error> {
        let gpst = self.to_calendar();

        // first guess: the offset that applies at the GPST calendar date
        let guess = utc_from_calendar(gpst)?;
        let leap = table.offset_seconds(guess)?;

        let utc = utc_from_calendar(gpst - i64::from(leap) * Unit::Second)?;
        let settled = table.offset_seconds(utc)?;
        if settled == leap {
            return Ok(utc);
        }

        utc_from_calendar(gpst - i64::from(settled) * Unit::Second)
    }

    /// Converts a GLONASS epoch to [GpsTime]. GLONASS counts days within
    /// four year cycles started on 1992-01-01, in Moscow time (UTC+3h).
    /// `day` is 1-based.
    pub fn from_glonass(
        cycle: i32,
        day: i32,
        seconds_of_day: f64,
        table: &LeapSecondTable,
    ) -> Result<Self, Error> {
        let days = i64::from(cycle) * DAYS_PER_GLONASS_CYCLE + i64::from(day) - 1;
        let t = Epoch::from_gregorian_tai_at_midnight(1992, 1, 1) + days * Unit::Day
            - MOSCOW_UTC_OFFSET_HOURS * Unit::Hour
            + Duration::from_seconds(seconds_of_day);
        let utc = utc_from_calendar(t)?;
        Self::from_utc(utc, table)
    }

    /// Converts a [TimeScale::GPST] (or any other timescale) [Epoch] to [GpsTime].
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (week, nanos) = epoch.to_time_scale(TimeScale::GPST).to_time_of_week();
        Self::new(week as i32, nanos as f64 / 1.0E9)
    }

    /// Expresses this instant as an [Epoch] in [TimeScale::GPST].
    /// Un-normalized representations are normalized first.
    pub fn to_epoch(&self) -> Result<Epoch, Error> {
        let t = *self + 0.0;
        if t.week < 0 {
            return Err(Error::TimeUnderflow);
        }
        let nanos = (t.tow * 1.0E9).round() as u64;
        Ok(Epoch::from_time_of_week(t.week as u32, nanos, TimeScale::GPST))
    }
}

impl Sub for GpsTime {
    type Output = f64;
    /// Signed difference in seconds
    fn sub(self, rhs: Self) -> f64 {
        (f64::from(self.week) - f64::from(rhs.week)) * SECONDS_PER_WEEK + (self.tow - rhs.tow)
    }
}

impl Add<f64> for GpsTime {
    type Output = Self;
    fn add(self, dt: f64) -> Self {
        let total = self.tow + dt;
        let mut tow = total.rem_euclid(SECONDS_PER_WEEK);
        let weeks = ((total - tow) / SECONDS_PER_WEEK).round();
        let mut week = i64::from(self.week).saturating_add(weeks as i64);

        // rem_euclid may round up to the modulus itself
        if tow >= SECONDS_PER_WEEK {
            tow -= SECONDS_PER_WEEK;
            week = week.saturating_add(1);
        }

        // the week counter saturates
        let week = week.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;

        Self { week, tow }
    }
}

impl Sub<f64> for GpsTime {
    type Output = Self;
    fn sub(self, dt: f64) -> Self {
        self + (-dt)
    }
}

impl Add<Duration> for GpsTime {
    type Output = Self;
    fn add(self, dt: Duration) -> Self {
        self + dt.to_seconds()
    }
}

impl Sub<Duration> for GpsTime {
    type Output = Self;
    fn sub(self, dt: Duration) -> Self {
        self - dt.to_seconds()
    }
}

impl AddAssign<f64> for GpsTime {
    fn add_assign(&mut self, dt: f64) {
        *self = *self + dt;
    }
}

impl SubAssign<f64> for GpsTime {
    fn sub_assign(&mut self, dt: f64) {
        *self = *self - dt;
    }
}

impl PartialEq for GpsTime {
    fn eq(&self, other: &Self) -> bool {
        *self - *other == 0.0
    }
}

impl PartialOrd for GpsTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (*self - *other).partial_cmp(&0.0)
    }
}

impl std::fmt::Display for GpsTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.to_epoch() {
            Ok(epoch) => write!(f, "{}", epoch),
            Err(_) => write!(f, "week {} tow {:.9}", self.week, self.tow),
        }
    }
}
