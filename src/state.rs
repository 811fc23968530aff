#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{constants::SPEED_OF_LIGHT_M_S, prelude::Vector3};

/// Satellite state resolved from ephemeris at a given instant.
/// Position and velocity are expressed in the ECEF frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteState {
    /// ECEF position (in meters)
    pub position_m: Vector3<f64>,
    /// ECEF velocity (in m/s)
    pub velocity_m_s: Vector3<f64>,
    /// Clock bias, relativistic correction included (in seconds)
    pub clock_bias_s: f64,
    /// Clock drift (s.s⁻¹)
    pub clock_drift_s_s: f64,
}

impl SatelliteState {
    /// Clock bias expressed as a range (in meters)
    pub fn clock_bias_m(&self) -> f64 {
        self.clock_bias_s * SPEED_OF_LIGHT_M_S
    }

    /// Distance to the Earth center (in meters)
    pub fn radius_m(&self) -> f64 {
        self.position_m.norm()
    }
}

impl std::fmt::Display for SatelliteState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "x={:.3}m y={:.3}m z={:.3}m vx={:.6}m/s vy={:.6}m/s vz={:.6}m/s dt={:.12e}s",
            self.position_m[0],
            self.position_m[1],
            self.position_m[2],
            self.velocity_m_s[0],
            self.velocity_m_s[1],
            self.velocity_m_s[2],
            self.clock_bias_s,
        )
    }
}
