use log::warn;

use crate::{
    ephemeris::{EphemerisRecord, GlonassEphemeris, GpsEphemeris},
    error::Error,
    prelude::{Constellation, Duration, Epoch, GpsTime, Vector3, SV},
    rinex::{
        field::{float, integer, slot, MIN_LINE_WIDTH},
        NavKind,
    },
};

/// Calendar fields of the epoch line
struct EpochFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
}

/// Lines collected for one satellite, with their line numbers.
#[derive(Debug, Clone, Default)]
pub(crate) struct Block {
    /// Record index within the file
    pub record: usize,
    pub lines: Vec<(usize, String)>,
}

impl Block {
    pub fn new(record: usize) -> Self {
        Self {
            record,
            lines: Vec::with_capacity(8),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn push(&mut self, line_no: usize, line: String) {
        self.lines.push((line_no, line));
    }

    /// Line number of the epoch line
    pub fn line_no(&self) -> usize {
        self.lines.first().map(|(n, _)| *n).unwrap_or_default()
    }

    pub fn truncated(&self, expected: usize) -> Error {
        Error::TruncatedRecord {
            record: self.record,
            line: self.line_no(),
            lines: self.len(),
            expected,
        }
    }

    fn malformed(&self, reason: String) -> Error {
        Error::MalformedRecord {
            record: self.record,
            line: self.line_no(),
            reason,
        }
    }

    /// Decodes this complete block
    pub fn decode(
        &self,
        kind: NavKind,
        source: Option<&str>,
        max_dtoe: Duration,
    ) -> Result<EphemerisRecord, Error> {
        let expected = kind.block_lines();
        if self.len() != expected {
            return Err(self.truncated(expected));
        }

        let (line_no, line) = &self.lines[0];
        if line.len() < MIN_LINE_WIDTH {
            return Err(self.malformed(format!("line too short ({} characters)", line.len())));
        }

        let prn = integer::<u8>(line, 0..2, "satellite id", *line_no);
        let epoch = self.epoch_fields();
        let [clock_bias, clock_drift, clock_drift_rate] = self.clock_terms();

        match kind {
            NavKind::Gps => {
                let toc = GpsTime::from_gpst_gregorian(
                    epoch.year,
                    epoch.month,
                    epoch.day,
                    epoch.hour,
                    epoch.minute,
                    epoch.second,
                    epoch.nanos,
                )
                .map_err(|e| self.malformed(format!("invalid epoch: {}", e)))?;

                let [iode, crs, dn, m0] = self.orbit(1);
                let [cuc, e, cus, sqrt_a] = self.orbit(2);
                let [toe_s, cic, omega0, cis] = self.orbit(3);
                let [i0, crc, omega, omega_dot] = self.orbit(4);
                let [idot, l2_codes, week, l2p_flag] = self.orbit(5);
                let [accuracy, health, tgd, iodc] = self.orbit(6);
                let [transmission, fit_interval, _, _] = self.orbit(7);

                Ok(EphemerisRecord::Gps(GpsEphemeris {
                    sv: SV::new(Constellation::GPS, prn),
                    toe: GpsTime::new(week as i32, toe_s),
                    toc,
                    af0: clock_bias,
                    af1: clock_drift,
                    af2: clock_drift_rate,
                    sqrt_a,
                    eccentricity: e,
                    m0_rad: m0,
                    dn_rad_s: dn,
                    i0_rad: i0,
                    idot_rad_s: idot,
                    omega0_rad: omega0,
                    omega_rad: omega,
                    omega_dot_rad_s: omega_dot,
                    cus_cuc_rad: (cus, cuc),
                    cis_cic_rad: (cis, cic),
                    crs_crc_m: (crs, crc),
                    health: health as u32,
                    iode,
                    iodc,
                    tgd_s: tgd,
                    accuracy_m: accuracy,
                    l2_codes,
                    l2p_flag,
                    transmission_tow_s: transmission,
                    fit_interval_h: fit_interval,
                    max_dtoe,
                    source: source.map(String::from),
                }))
            },
            NavKind::Glonass => {
                let epoch = Epoch::maybe_from_gregorian_utc(
                    epoch.year,
                    epoch.month,
                    epoch.day,
                    epoch.hour,
                    epoch.minute,
                    epoch.second,
                    epoch.nanos,
                )
                .map_err(|e| self.malformed(format!("invalid epoch: {}", e)))?;

                let [x, vx, ax, health] = self.orbit(1);
                let [y, vy, ay, channel] = self.orbit(2);
                let [z, vz, az, age] = self.orbit(3);

                Ok(EphemerisRecord::Glonass(GlonassEphemeris {
                    sv: SV::new(Constellation::Glonass, prn),
                    epoch,
                    clock_bias_s: clock_bias,
                    rel_freq_bias: clock_drift,
                    frame_time_s: clock_drift_rate,
                    position_km: Vector3::new(x, y, z),
                    velocity_km_s: Vector3::new(vx, vy, vz),
                    acceleration_km_s2: Vector3::new(ax, ay, az),
                    health: health as u32,
                    channel: channel as i8,
                    age_days: age,
                    source: source.map(String::from),
                }))
            },
        }
    }

    /// `I2,1X,I2.2,1X,I2,1X,I2,1X,I2,1X,I2,F5.1`
    fn epoch_fields(&self) -> EpochFields {
        let (line_no, line) = &self.lines[0];
        let line_no = *line_no;

        let mut year = integer::<i32>(line, 3..5, "year", line_no);
        if year < 100 {
            if year < 80 {
                year += 2000;
            } else {
                year += 1900;
            }
        }

        let seconds = float(line, 17..22, "seconds", line_no);
        let whole = seconds.trunc();

        EpochFields {
            year,
            month: integer(line, 6..8, "month", line_no),
            day: integer(line, 9..11, "day", line_no),
            hour: integer(line, 12..14, "hour", line_no),
            minute: integer(line, 15..17, "minute", line_no),
            second: whole as u8,
            nanos: (((seconds - whole) * 1.0E9).round() as u32).min(999_999_999),
        }
    }

    /// `3D19.12` following the epoch
    fn clock_terms(&self) -> [f64; 3] {
        let (line_no, line) = &self.lines[0];
        let names = ["clock bias", "clock drift", "clock drift rate"];
        let mut terms = [0.0; 3];
        for (i, term) in terms.iter_mut().enumerate() {
            *term = float(line, slot(i + 1), names[i], *line_no);
        }
        terms
    }

    /// `3X,4D19.12` broadcast orbit line. A short line defaults all of its fields.
    fn orbit(&self, index: usize) -> [f64; 4] {
        let (line_no, line) = &self.lines[index];
        let mut fields = [0.0; 4];

        if line.len() < MIN_LINE_WIDTH {
            warn!(
                "line {}: short line ({} characters), record #{} orbit {} defaults to 0.0",
                line_no,
                line.len(),
                self.record,
                index
            );
            return fields;
        }

        for (i, field) in fields.iter_mut().enumerate() {
            *field = float(line, slot(i), "orbit field", *line_no);
        }

        fields
    }
}
