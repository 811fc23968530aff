//! Fixed column field extraction
use std::ops::Range;
use std::str::FromStr;

use log::warn;

/// Minimal width of an ephemeris line (four 19 character fields after 3 columns)
pub(crate) const MIN_LINE_WIDTH: usize = 79;

/// Columns of field `slot` (0..4) in an ephemeris line: `3X,4D19.12`.
/// Slots 1..4 of the first line hold the clock terms.
pub(crate) fn slot(slot: usize) -> Range<usize> {
    let start = 3 + 19 * slot;
    start..start + 19
}

/// Parses a Fortran style double: `D` exponents are normalized to `E`.
/// Blank fields are zero.
pub(crate) fn fortran_f64(field: &str) -> Option<f64> {
    let normalized: String = field
        .trim()
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| match c {
            'D' | 'd' => 'E',
            c => c,
        })
        .collect();

    if normalized.is_empty() {
        return Some(0.0);
    }

    f64::from_str(&normalized).ok()
}

/// Reads a numerical field, degrading to 0.0 when it does not parse.
pub(crate) fn float(line: &str, cols: Range<usize>, name: &str, line_no: usize) -> f64 {
    let Some(content) = line.get(cols) else {
        return 0.0;
    };

    fortran_f64(content).unwrap_or_else(|| {
        warn!("line {}: invalid {} \"{}\", using 0.0", line_no, name, content.trim());
        0.0
    })
}

/// Reads an integer field, degrading to 0 when it does not parse.
pub(crate) fn integer<T: FromStr + Default>(
    line: &str,
    cols: Range<usize>,
    name: &str,
    line_no: usize,
) -> T {
    let Some(content) = line.get(cols) else {
        return T::default();
    };

    let content = content.trim();
    if content.is_empty() {
        return T::default();
    }

    content.parse::<T>().unwrap_or_else(|_| {
        warn!("line {}: invalid {} \"{}\", using 0", line_no, name, content);
        T::default()
    })
}
