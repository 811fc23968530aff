#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod constants;
mod ephemeris;
mod error;
mod rinex;
mod state;
mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, KeplerOpts, LeapExtrapolation, LeapSecondsOpts};
    pub use crate::constants::*;
    pub use crate::ephemeris::{
        group_by_sv, select_gps, solve_kepler, EphemerisRecord, GlonassEphemeris, GpsEphemeris,
    };
    pub use crate::error::Error;
    pub use crate::rinex::{DeltaUtc, NavHeader, NavKind, NavigationFile, Parser};
    pub use crate::state::SatelliteState;
    pub use crate::time::{GpsTime, LeapBoundary, LeapSecondTable, TimeSync, GPS_LEAP_SECONDS};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
