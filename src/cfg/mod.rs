#[cfg(feature = "serde")]
use serde::Deserialize;

use hifitime::Unit;

use crate::prelude::{Duration, Epoch};

/// What to assume past the last verified instant of the leap second table.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum LeapExtrapolation {
    /// Keep applying the last known offset.
    #[default]
    Hold,
    /// Refuse conversions past the horizon.
    Reject,
}

fn default_kepler_tolerance() -> f64 {
    1.0E-14
}

fn default_kepler_iterations() -> usize {
    30
}

fn default_max_dtoe() -> Duration {
    2.0 * Unit::Hour
}

fn default_leap_horizon() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2026, 1, 1)
}

/// Kepler equation solver options
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct KeplerOpts {
    /// Iteration stops once the eccentric anomaly update is below this (rad)
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_tolerance"))]
    pub tolerance: f64,
    /// Iteration cap, past which the solver gives up
    #[cfg_attr(feature = "serde", serde(default = "default_kepler_iterations"))]
    pub max_iterations: usize,
}

impl Default for KeplerOpts {
    fn default() -> Self {
        Self {
            tolerance: default_kepler_tolerance(),
            max_iterations: default_kepler_iterations(),
        }
    }
}

/// GPST-UTC leap second handling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct LeapSecondsOpts {
    #[cfg_attr(feature = "serde", serde(default))]
    pub extrapolation: LeapExtrapolation,
    /// Last instant the built-in table is known to be correct.
    #[cfg_attr(feature = "serde", serde(default = "default_leap_horizon"))]
    pub horizon: Epoch,
}

impl Default for LeapSecondsOpts {
    fn default() -> Self {
        Self {
            extrapolation: LeapExtrapolation::default(),
            horizon: default_leap_horizon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kepler: KeplerOpts,
    /// Validity window stamped on every parsed GPS ephemeris.
    /// Queries further than this from ToE are rejected by ephemeris selection.
    #[cfg_attr(feature = "serde", serde(default = "default_max_dtoe"))]
    pub max_dtoe: Duration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub leap_seconds: LeapSecondsOpts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kepler: KeplerOpts::default(),
            max_dtoe: default_max_dtoe(),
            leap_seconds: LeapSecondsOpts::default(),
        }
    }
}

impl Config {
    /// Returns a copy of this [Config] with the specified Kepler iteration cap
    pub fn with_kepler_iterations(&self, max_iterations: usize) -> Self {
        let mut s = self.clone();
        s.kepler.max_iterations = max_iterations;
        s
    }

    /// Returns a copy of this [Config] with the specified leap second policy
    pub fn with_leap_extrapolation(&self, extrapolation: LeapExtrapolation) -> Self {
        let mut s = self.clone();
        s.leap_seconds.extrapolation = extrapolation;
        s
    }
}
