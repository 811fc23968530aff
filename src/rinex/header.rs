use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    rinex::field::{float, integer},
};

/// Header labels start at this column
const LABEL_COLUMN: usize = 60;

fn text(content: &str, cols: std::ops::Range<usize>) -> String {
    content.get(cols).unwrap_or_default().trim().to_string()
}

/// Navigation message flavour, as announced by the file type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavKind {
    /// GPS navigation message (`N`)
    Gps,
    /// GLONASS navigation message (`G`)
    Glonass,
}

impl NavKind {
    /// Number of lines describing one satellite: the epoch line plus the
    /// broadcast orbit lines.
    pub fn block_lines(&self) -> usize {
        match self {
            Self::Gps => 8,
            Self::Glonass => 4,
        }
    }
}

impl std::fmt::Display for NavKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Gps => write!(f, "GPS"),
            Self::Glonass => write!(f, "GLONASS"),
        }
    }
}

/// GPST-UTC polynomial broadcast in GPS navigation headers
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeltaUtc {
    /// (in seconds)
    pub a0: f64,
    /// (s.s⁻¹)
    pub a1: f64,
    /// Reference time (seconds of week)
    pub t_ref: u32,
    /// Reference week
    pub week: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavHeader {
    pub version: f64,
    pub file_type: String,
    pub satellite_system: String,
    pub program: String,
    pub run_by: String,
    pub date: String,
    pub comments: Vec<String>,
    /// GPST-UTC leap seconds, when announced
    pub leap_seconds: Option<i32>,
    /// Klobuchar alpha terms
    pub ion_alpha: Option<[f64; 4]>,
    /// Klobuchar beta terms
    pub ion_beta: Option<[f64; 4]>,
    pub delta_utc: Option<DeltaUtc>,
}

impl NavHeader {
    /// Navigation message flavour announced by this header
    pub fn kind(&self) -> Result<NavKind, Error> {
        match self.file_type.chars().next() {
            Some('N') => Ok(NavKind::Gps),
            Some('G') => Ok(NavKind::Glonass),
            _ => Err(Error::UnknownFileType(self.file_type.clone())),
        }
    }

    /// Consumes lines up to and including "END OF HEADER".
    /// `line_no` is advanced for every line consumed.
    pub(crate) fn parse<I>(lines: &mut I, line_no: &mut usize) -> Result<Self, Error>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let mut header = Self::default();

        for line in lines {
            let line = line?;
            *line_no += 1;

            let Some(label) = line.get(LABEL_COLUMN..) else {
                continue;
            };

            let content = &line[..LABEL_COLUMN];

            match label.trim_end() {
                "RINEX VERSION / TYPE" => {
                    header.version = float(content, 0..20, "version", *line_no);
                    header.file_type = text(content, 20..40);
                    header.satellite_system = text(content, 40..60);
                },
                "PGM / RUN BY / DATE" => {
                    header.program = text(content, 0..20);
                    header.run_by = text(content, 20..40);
                    header.date = text(content, 40..60);
                },
                "COMMENT" => {
                    header.comments.push(content.trim().to_string());
                },
                "LEAP SECONDS" => {
                    header.leap_seconds = Some(integer(content, 0..6, "leap seconds", *line_no));
                },
                "ION ALPHA" => {
                    header.ion_alpha = Some(Self::ionospheric_terms(content, *line_no));
                },
                "ION BETA" => {
                    header.ion_beta = Some(Self::ionospheric_terms(content, *line_no));
                },
                "DELTA-UTC: A0,A1,T,W" => {
                    header.delta_utc = Some(DeltaUtc {
                        a0: float(content, 3..22, "A0", *line_no),
                        a1: float(content, 22..41, "A1", *line_no),
                        t_ref: integer(content, 41..50, "T", *line_no),
                        week: integer(content, 50..59, "W", *line_no),
                    });
                },
                "END OF HEADER" => {
                    debug!("header: {} lines", line_no);
                    return Ok(header);
                },
                other => {
                    debug!("line {}: ignored header label \"{}\"", line_no, other);
                },
            }
        }

        Err(Error::MalformedHeader)
    }

    /// `2X,4D12.4`
    fn ionospheric_terms(content: &str, line_no: usize) -> [f64; 4] {
        let mut terms = [0.0; 4];
        for (i, term) in terms.iter_mut().enumerate() {
            let start = 2 + 12 * i;
            *term = float(content, start..start + 12, "ionospheric term", line_no);
        }
        terms
    }
}

impl std::fmt::Display for NavHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "RINEX Header:")?;
        writeln!(f, "  Version: {:.2}", self.version)?;
        writeln!(f, "  Type: {}", self.file_type)?;
        writeln!(f, "  Satellite System: {}", self.satellite_system)?;
        writeln!(f, "  Program: {}", self.program)?;
        writeln!(f, "  Agency: {}", self.run_by)?;
        writeln!(f, "  Date: {}", self.date)?;
        writeln!(f, "  Comments:")?;
        for comment in self.comments.iter() {
            writeln!(f, "    {}", comment)?;
        }
        match self.leap_seconds {
            Some(leap) => write!(f, "  Leap Seconds: {}", leap),
            None => write!(f, "  Leap Seconds: unknown"),
        }
    }
}
