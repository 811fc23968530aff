use thiserror::Error;

use crate::prelude::{Epoch, SV};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The header section never reached its "END OF HEADER" label.
    /// The whole file is rejected.
    #[error("malformed header: end of header not found")]
    MalformedHeader,

    /// Only RINEX 2 GPS (`N`) and GLONASS (`G`) navigation files are supported.
    #[error("unsupported navigation file type \"{0}\"")]
    UnknownFileType(String),

    /// The first line of an ephemeris block is unusable (too short, or
    /// the epoch it describes is not a valid date). Only this record is lost.
    #[error("malformed record #{record} (line {line}): {reason}")]
    MalformedRecord {
        record: usize,
        line: usize,
        reason: String,
    },

    /// An ephemeris block ended (new satellite line or end of input) before
    /// all of its lines were collected. The partial block is never completed
    /// with default values.
    #[error("truncated record #{record} (line {line}): {lines}/{expected} lines")]
    TruncatedRecord {
        record: usize,
        line: usize,
        lines: usize,
        expected: usize,
    },

    /// Propagation refuses ephemeris flagged unhealthy by the control segment.
    #[error("{0}: unhealthy ephemeris")]
    UnhealthyEphemeris(SV),

    /// Kepler's equation did not converge within the iteration cap.
    #[error("kepler solver did not converge after {iterations} iterations")]
    NonConvergentKepler { iterations: usize },

    /// GLONASS ephemeris are state vectors that require numerical
    /// integration (J2 and luni-solar terms), which is not available.
    #[error("{0}: state vector propagation is not supported")]
    UnsupportedPropagation(SV),

    /// The leap second table does not cover this instant.
    #[error("unknown GPST-UTC offset at {0}")]
    UnknownLeapSeconds(Epoch),

    /// The instant lies past the table horizon while extrapolation is refused.
    #[error("outdated leap second table: {0} is past its horizon")]
    OutdatedLeapSeconds(Epoch),

    #[error("bad operation: negative time")]
    TimeUnderflow,

    #[error("invalid calendar date")]
    InvalidDate,

    #[error("i/o error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}
