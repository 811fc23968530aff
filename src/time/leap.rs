use log::debug;

use crate::{
    cfg::{LeapExtrapolation, LeapSecondsOpts},
    error::Error,
    prelude::Epoch,
};

/// UTC calendar date from which `seconds` of GPST-UTC offset apply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LeapBoundary {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub seconds: i32,
}

impl LeapBoundary {
    const fn new(year: i32, month: u8, day: u8, seconds: i32) -> Self {
        Self {
            year,
            month,
            day,
            seconds,
        }
    }

    fn utc(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year, self.month, self.day)
    }
}

/// GPST-UTC offsets. Nothing is known before the first boundary.
pub const GPS_LEAP_SECONDS: &[LeapBoundary] = &[
    LeapBoundary::new(2006, 1, 1, 14),
    LeapBoundary::new(2009, 1, 1, 15),
    LeapBoundary::new(2012, 7, 1, 16),
    LeapBoundary::new(2015, 7, 1, 17),
    LeapBoundary::new(2017, 1, 1, 18),
];

/// [LeapSecondTable] resolves the GPST-UTC offset for a UTC instant.
/// The boundaries are immutable and shared, only the extrapolation
/// policy past the table horizon is configurable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LeapSecondTable {
    boundaries: &'static [LeapBoundary],
    extrapolation: LeapExtrapolation,
    horizon: Epoch,
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::new(&LeapSecondsOpts::default())
    }
}

impl LeapSecondTable {
    /// Builds the GPS table with the desired policy
    pub fn new(opts: &LeapSecondsOpts) -> Self {
        Self {
            boundaries: GPS_LEAP_SECONDS,
            extrapolation: opts.extrapolation,
            horizon: opts.horizon,
        }
    }

    /// Copies and returns [LeapSecondTable] with custom boundaries,
    /// which must be sorted chronologically.
    pub fn with_boundaries(&self, boundaries: &'static [LeapBoundary]) -> Self {
        let mut s = *self;
        s.boundaries = boundaries;
        s
    }

    /// Copies and returns [LeapSecondTable] with a new extrapolation policy
    pub fn with_extrapolation(&self, extrapolation: LeapExtrapolation) -> Self {
        let mut s = *self;
        s.extrapolation = extrapolation;
        s
    }

    /// Returns the GPST-UTC offset (in seconds) that applies at this UTC instant.
    pub fn offset_seconds(&self, utc: Epoch) -> Result<i32, Error> {
        let boundary = self
            .boundaries
            .iter()
            .rev()
            .find(|b| utc >= b.utc())
            .ok_or(Error::UnknownLeapSeconds(utc))?;

        if utc >= self.horizon {
            match self.extrapolation {
                LeapExtrapolation::Reject => return Err(Error::OutdatedLeapSeconds(utc)),
                LeapExtrapolation::Hold => {
                    debug!("{} - past leap second horizon, assuming {}s", utc, boundary.seconds);
                },
            }
        }

        Ok(boundary.seconds)
    }
}
