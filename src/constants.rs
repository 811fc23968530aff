/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// Earth gravitational constant (m^3 s-2), as broadcast by ICD-GPS-200
pub const EARTH_GRAVITATION_MU_M3_S2: f64 = 3.986005E14;

/// Relativistic clock correction constant F = -2 sqrt(mu) / c^2 (s.m^-1/2)
pub const RELATIVISTIC_F: f64 = -4.442807633E-10;

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 2.99792458E8;

/// Seconds in one GPS week
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

/// Days in one GLONASS four year cycle
pub const DAYS_PER_GLONASS_CYCLE: i64 = 365 * 4 + 1;

/// Moscow time (GLONASS reference) leads UTC by this many hours
pub const MOSCOW_UTC_OFFSET_HOURS: i64 = 3;
