mod propagation;
mod time;


pub use data::*;

use log::LevelFilter;
use std::sync::Once;

use crate::prelude::{Constellation, GpsEphemeris, GpsTime, SV};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Nominal GPS orbit radius (in meters)
pub const GPS_SEMI_MAJOR_AXIS_M: f64 = 26_559_710.0;

/// Circular equatorial [GpsEphemeris], whose ascending node is aligned
/// with the ECEF X axis at ToE.
pub fn circular_ephemeris(prn: u8, toe: GpsTime) -> GpsEphemeris {
    GpsEphemeris {
        sv: SV::new(Constellation::GPS, prn),
        toe,
        toc: toe,
        sqrt_a: GPS_SEMI_MAJOR_AXIS_M.sqrt(),
        omega0_rad: crate::constants::EARTH_ANGULAR_VEL_RAD * toe.tow,
        ..Default::default()
    }
}
