use std::f64::consts::FRAC_PI_2;

use crate::{
    constants::{EARTH_ANGULAR_VEL_RAD, EARTH_GRAVITATION_MU_M3_S2, RELATIVISTIC_F},
    prelude::{
        solve_kepler, Constellation, EphemerisRecord, Error, GlonassEphemeris, GpsTime,
        KeplerOpts, NavigationFile, SV,
    },
    tests::{circular_ephemeris, init_logger, GPS_NAV_V2, GPS_SEMI_MAJOR_AXIS_M},
};

#[test]
fn circular_equatorial_orbit() {
    init_logger();

    let toe = GpsTime::new(2000, 1_000.0);
    let eph = circular_ephemeris(1, toe);

    let state = eph.resolve_state(toe, &KeplerOpts::default()).unwrap();

    let a = GPS_SEMI_MAJOR_AXIS_M;
    let n = (EARTH_GRAVITATION_MU_M3_S2 / a.powi(3)).sqrt();

    assert!((state.position_m[0] - a).abs() < 1.0E-6, "{}", state);
    assert!(state.position_m[1].abs() < 1.0E-6, "{}", state);
    assert!(state.position_m[2].abs() < 1.0E-6, "{}", state);

    // inertial motion, seen from the rotating frame
    let vy = a * n - EARTH_ANGULAR_VEL_RAD * a;
    assert!(state.velocity_m_s[0].abs() < 1.0E-6, "{}", state);
    assert!((state.velocity_m_s[1] - vy).abs() < 1.0E-6, "{}", state);
    assert!(state.velocity_m_s[2].abs() < 1.0E-6, "{}", state);

    assert_eq!(state.clock_bias_s, 0.0);
    assert_eq!(state.clock_drift_s_s, 0.0);
    assert!((state.radius_m() - a).abs() < 1.0E-6);
}

#[test]
fn polar_orbit_apex() {
    let toe = GpsTime::new(2000, 0.0);

    let mut eph = circular_ephemeris(2, toe);
    eph.i0_rad = FRAC_PI_2;
    eph.m0_rad = FRAC_PI_2;

    let state = eph.resolve_state(toe, &KeplerOpts::default()).unwrap();
    let a = GPS_SEMI_MAJOR_AXIS_M;

    assert!(state.position_m[0].abs() < 1.0E-6, "{}", state);
    assert!(state.position_m[1].abs() < 1.0E-6, "{}", state);
    assert!((state.position_m[2] - a).abs() < 1.0E-6, "{}", state);
}

#[test]
fn orbit_radius_is_preserved() {
    let toe = GpsTime::new(2100, 302_400.0);
    let eph = circular_ephemeris(3, toe);
    let opts = KeplerOpts::default();

    for dt in [-7_200.0, -600.0, 0.0, 30.0, 3_600.0, 86_400.0] {
        let state = eph.resolve_state(toe + dt, &opts).unwrap();
        assert!(
            (state.radius_m() - GPS_SEMI_MAJOR_AXIS_M).abs() < 1.0E-6,
            "dt={} {}",
            dt,
            state
        );
    }
}

#[test]
fn clock_polynomial() {
    let toe = GpsTime::new(2000, 0.0);

    let mut eph = circular_ephemeris(4, toe);
    eph.af0 = 1.0E-4;
    eph.af1 = 1.0E-11;
    eph.af2 = 1.0E-18;

    let t = toe + 3_600.0;
    let dt = 3_600.0_f64;

    let state = eph.resolve_state(t, &KeplerOpts::default()).unwrap();

    let bias = 1.0E-4 + dt * (1.0E-11 + dt * 1.0E-18);
    let drift = 1.0E-11 + 2.0 * dt * 1.0E-18;

    assert!((state.clock_bias_s - bias).abs() < 1.0E-18);
    assert!((state.clock_drift_s_s - drift).abs() < 1.0E-24);
    assert_eq!(eph.clock_correction(t), (state.clock_bias_s, state.clock_drift_s_s));
}

#[test]
fn relativistic_correction() {
    let toe = GpsTime::new(2000, 0.0);
    let opts = KeplerOpts::default();

    let mut eph = circular_ephemeris(5, toe);
    eph.eccentricity = 0.01;
    eph.m0_rad = 1.0;
    eph.af0 = 1.0E-4;

    let state = eph.resolve_state(toe, &opts).unwrap();

    let e_k = solve_kepler(1.0, 0.01, &opts).unwrap();
    let expected = 1.0E-4 + RELATIVISTIC_F * 0.01 * eph.sqrt_a * e_k.sin();

    assert!((state.clock_bias_s - expected).abs() < 1.0E-15);
    assert!(state.clock_bias_s < 1.0E-4);
}

#[test]
fn broadcast_ephemeris_at_toe() {
    init_logger();

    let nav: NavigationFile = GPS_NAV_V2.parse().unwrap();
    let eph = nav.gps_ephemerides().next().unwrap();

    let state = eph.resolve_state(eph.toe, &KeplerOpts::default()).unwrap();

    // PRN 6 example of the RINEX 2.10 format document (1999-09-02 17:51:44 GPST).
    // Reference state evaluated at ToE with the ICD-GPS-200 user algorithm
    // (Table 20-IV), in an independent double precision implementation.
    let expected = [-4_237_540.536_484, -18_156_232.315_475, 18_685_002.295_117];
    for i in 0..3 {
        assert!(
            (state.position_m[i] - expected[i]).abs() < 1.0E-3,
            "axis {}: {}",
            i,
            state
        );
    }

    assert!((state.clock_bias_s - -8.397_037_183E-4).abs() < 1.0E-9);

    // ECEF speed of a GPS satellite
    let speed = state.velocity_m_s.norm();
    assert!(speed > 2_500.0 && speed < 4_500.0, "{}", speed);
}

#[test]
fn velocity_matches_finite_differences() {
    let nav: NavigationFile = GPS_NAV_V2.parse().unwrap();
    let eph = nav.gps_ephemerides().next().unwrap();
    let opts = KeplerOpts::default();

    let t = eph.toe + 600.0;
    let state = eph.resolve_state(t, &opts).unwrap();
    let before = eph.resolve_state(t - 0.5, &opts).unwrap();
    let after = eph.resolve_state(t + 0.5, &opts).unwrap();

    let velocity = after.position_m - before.position_m;
    for i in 0..3 {
        assert!(
            (state.velocity_m_s[i] - velocity[i]).abs() < 1.0E-2,
            "axis {}: {} vs {}",
            i,
            state.velocity_m_s[i],
            velocity[i]
        );
    }
}

#[test]
fn unhealthy_ephemeris() {
    let toe = GpsTime::new(2000, 0.0);
    let opts = KeplerOpts::default();

    for health in [1, 0x3f, u32::MAX] {
        let mut eph = circular_ephemeris(6, toe);
        eph.health = health;

        assert_eq!(
            eph.resolve_state(toe, &opts),
            Err(Error::UnhealthyEphemeris(eph.sv))
        );

        let record = EphemerisRecord::Gps(eph);
        assert!(!record.is_healthy());
        assert!(record.resolve_state(toe, &opts).is_err());
    }
}

#[test]
fn glonass_is_not_propagated() {
    let sv = SV::new(Constellation::Glonass, 1);
    let record = EphemerisRecord::Glonass(GlonassEphemeris {
        sv,
        epoch: Default::default(),
        clock_bias_s: 0.0,
        rel_freq_bias: 0.0,
        frame_time_s: 0.0,
        position_km: Default::default(),
        velocity_km_s: Default::default(),
        acceleration_km_s2: Default::default(),
        health: 0,
        channel: 1,
        age_days: 0.0,
        source: None,
    });

    assert_eq!(
        record.resolve_state(GpsTime::new(2324, 0.0), &KeplerOpts::default()),
        Err(Error::UnsupportedPropagation(sv))
    );
}

#[test]
fn validity_window() {
    let toe = GpsTime::new(2000, 0.0);
    let eph = circular_ephemeris(7, toe);

    assert!(eph.is_valid(toe));
    assert!(eph.is_valid(toe + 7_200.0));
    assert!(eph.is_valid(toe - 7_200.0));
    assert!(!eph.is_valid(toe + 7_201.0));

    // propagation itself is not bounded
    assert!(eph
        .resolve_state(toe + 86_400.0, &KeplerOpts::default())
        .is_ok());
}
