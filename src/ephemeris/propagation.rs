use log::{debug, error};
use nalgebra::{Rotation3, Vector3};

use crate::{
    cfg::KeplerOpts,
    constants::{EARTH_ANGULAR_VEL_RAD, EARTH_GRAVITATION_MU_M3_S2, RELATIVISTIC_F},
    ephemeris::{solve_kepler, GpsEphemeris},
    error::Error,
    prelude::{GpsTime, SatelliteState},
};

impl GpsEphemeris {
    /// Returns True if this [GpsEphemeris] frame is still valid at `t`
    pub fn is_valid(&self, t: GpsTime) -> bool {
        (t - self.toe).abs() <= self.max_dtoe.to_seconds()
    }

    /// Semi-major axis (in meters)
    pub fn semi_major_axis_m(&self) -> f64 {
        self.sqrt_a.powi(2)
    }

    /// Clock polynomial evaluated at `t`: (bias (s), drift (s.s⁻¹)).
    /// Does not include the relativistic correction.
    pub fn clock_correction(&self, t: GpsTime) -> (f64, f64) {
        let dt = t - self.toc;
        let bias = self.af0 + dt * (self.af1 + dt * self.af2);
        let drift = self.af1 + 2.0 * dt * self.af2;
        (bias, drift)
    }

    /// Resolves Kepler equations from [GpsEphemeris] (ICD-GPS-200 user algorithm).
    ///
    /// The validity window is not enforced here, see [GpsEphemeris::is_valid].
    pub fn resolve_state(&self, t: GpsTime, opts: &KeplerOpts) -> Result<SatelliteState, Error> {
        if self.health != 0 {
            error!("{}({}) - unhealthy ephemeris (health={})", t, self.sv, self.health);
            return Err(Error::UnhealthyEphemeris(self.sv));
        }

        let (mut clock_bias_s, clock_drift_s_s) = self.clock_correction(t);

        let e = self.eccentricity;
        let e_2 = e.powi(2);
        let a = self.semi_major_axis_m();
        let a_3 = a.powi(3);

        let (cus, cuc) = self.cus_cuc_rad;
        let (cis, cic) = self.cis_cic_rad;
        let (crs, crc) = self.crs_crc_m;
        let (i0, idot) = (self.i0_rad, self.idot_rad_s);
        let (omega0, omega, omega_dot) = (self.omega0_rad, self.omega_rad, self.omega_dot_rad_s);

        let t_k = t - self.toe;

        let n0 = (EARTH_GRAVITATION_MU_M3_S2 / a_3).sqrt();
        let n = n0 + self.dn_rad_s;
        let m = self.m0_rad + n * t_k;

        let e_k = solve_kepler(m, e, opts).inspect_err(|_| {
            error!("{}({}) - kepler solver in failure", t, self.sv);
        })?;

        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let e_k_dot = n / (1.0 - e * cos_e_k);

        // applied after the clock polynomial
        clock_bias_s += RELATIVISTIC_F * e * self.sqrt_a * sin_e_k;

        let sqrt_1_e2 = (1.0 - e_2).sqrt();
        let v_k = (sqrt_1_e2 * sin_e_k).atan2(cos_e_k - e);
        let v_k_dot = sqrt_1_e2 * e_k_dot / (1.0 - e * cos_e_k);

        let phi = v_k + omega;
        let (sin_2phi, cos_2phi) = (2.0 * phi).sin_cos();

        let u_k = phi + cus * sin_2phi + cuc * cos_2phi;
        let u_k_dot = v_k_dot * (1.0 + 2.0 * (cus * cos_2phi - cuc * sin_2phi));

        let r_k = a * (1.0 - e * cos_e_k) + crc * cos_2phi + crs * sin_2phi;
        let r_k_dot = a * e * e_k_dot * sin_e_k + 2.0 * v_k_dot * (crs * cos_2phi - crc * sin_2phi);

        let i_k = i0 + idot * t_k + cic * cos_2phi + cis * sin_2phi;
        let i_k_dot = idot + 2.0 * v_k_dot * (cis * cos_2phi - cic * sin_2phi);

        let omega_k_dot = omega_dot - EARTH_ANGULAR_VEL_RAD;
        let omega_k = omega0 + omega_k_dot * t_k - EARTH_ANGULAR_VEL_RAD * self.toe.tow;

        let (sin_u_k, cos_u_k) = u_k.sin_cos();
        let (x, y) = (r_k * cos_u_k, r_k * sin_u_k);
        let x_dot = r_k_dot * cos_u_k - y * u_k_dot;
        let y_dot = r_k_dot * sin_u_k + x * u_k_dot;

        // orbital plane to ECEF rotation
        let rot_x3 = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
        let rot_z3 = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
        let rot3 = rot_z3 * rot_x3;

        let position_m = rot3 * Vector3::new(x, y, 0.0);

        let (sin_i_k, cos_i_k) = i_k.sin_cos();
        let (sin_omega_k, cos_omega_k) = omega_k.sin_cos();
        let tmp = y_dot * cos_i_k - y * sin_i_k * i_k_dot;

        let velocity_m_s = Vector3::new(
            -omega_k_dot * position_m[1] + x_dot * cos_omega_k - tmp * sin_omega_k,
            omega_k_dot * position_m[0] + x_dot * sin_omega_k + tmp * cos_omega_k,
            y * cos_i_k * i_k_dot + y_dot * sin_i_k,
        );

        debug!(
            "{}({}) - kepler solving x_m={} y_m={} z_m={} t_k={}",
            t, self.sv, position_m[0], position_m[1], position_m[2], t_k
        );

        Ok(SatelliteState {
            position_m,
            velocity_m_s,
            clock_bias_s,
            clock_drift_s_s,
        })
    }
}
