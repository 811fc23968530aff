//! RINEX 2 navigation message parsing
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use log::{debug, info, warn};

use crate::{
    cfg::Config,
    ephemeris::{group_by_sv, select_gps, EphemerisRecord, GlonassEphemeris, GpsEphemeris},
    error::Error,
    prelude::{Duration, GpsTime, SV},
};

mod field;
mod header;
mod record;

pub use header::{DeltaUtc, NavHeader, NavKind};

use record::Block;

/// Returns true when this line opens a new record: the satellite-ID field
/// (columns 1-2, right justified) starts with a digit 1-9.
fn is_record_start(line: &str) -> bool {
    line.get(0..2)
        .and_then(|id| id.trim_start().chars().next())
        .is_some_and(|c| matches!(c, '1'..='9'))
}

/// Streaming navigation body parser.
///
/// [Parser] is an [Iterator] of [EphemerisRecord]s in file order.
/// Record level failures are yielded as [Error]s and parsing resumes on the
/// following block. An I/O failure terminates the iteration.
pub struct Parser<I> {
    lines: I,
    header: NavHeader,
    kind: NavKind,
    source: Option<String>,
    max_dtoe: Duration,
    /// Lines consumed so far
    line_no: usize,
    /// Records started so far
    records: usize,
    block: Option<Block>,
    done: bool,
}

impl<I> Parser<I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    /// Consumes the header and prepares the body iteration.
    pub fn new(mut lines: I) -> Result<Self, Error> {
        let mut line_no = 0;
        let header = NavHeader::parse(&mut lines, &mut line_no)?;
        let kind = header.kind()?;

        debug!("{} navigation (V{:.2})", kind, header.version);

        Ok(Self {
            lines,
            header,
            kind,
            source: None,
            max_dtoe: Config::default().max_dtoe,
            line_no,
            records: 0,
            block: None,
            done: false,
        })
    }

    /// Stamps this file name on every record
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Applies this [Config]
    pub fn with_config(mut self, cfg: &Config) -> Self {
        self.max_dtoe = cfg.max_dtoe;
        self
    }

    pub fn header(&self) -> &NavHeader {
        &self.header
    }

    pub fn kind(&self) -> NavKind {
        self.kind
    }

    fn decode(&self, block: &Block) -> Result<EphemerisRecord, Error> {
        block
            .decode(self.kind, self.source.as_deref(), self.max_dtoe)
            .inspect(|rec| debug!("record #{}: {}", block.record, rec.sv()))
            .inspect_err(|e| warn!("{}", e))
    }
}

impl<I> Iterator for Parser<I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    type Item = Result<EphemerisRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let expected = self.kind.block_lines();

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                },
                None => {
                    self.done = true;
                    // trailing partial block
                    let block = self.block.take()?;
                    return Some(self.decode(&block));
                },
            };

            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            if is_record_start(&line) {
                let mut block = Block::new(self.records);
                block.push(self.line_no, line);
                self.records += 1;

                if let Some(interrupted) = self.block.replace(block) {
                    let e = interrupted.truncated(expected);
                    warn!("{}", e);
                    return Some(Err(e));
                }

                continue;
            }

            let Some(block) = self.block.as_mut() else {
                warn!("line {}: continuation line without record", self.line_no);
                continue;
            };

            block.push(self.line_no, line);

            if block.len() < expected {
                continue;
            }

            if let Some(block) = self.block.take() {
                return Some(self.decode(&block));
            }
        }
    }
}

/// Navigation file, fully parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationFile {
    pub header: NavHeader,
    /// Records in file order
    pub records: Vec<EphemerisRecord>,
    /// Record level errors (malformed or truncated blocks)
    pub rejected: Vec<Error>,
}

impl NavigationFile {
    /// Parses a navigation stream with default [Config].
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::parse_with(reader, &Config::default())
    }

    /// Parses a navigation stream with this [Config].
    pub fn parse_with<R: BufRead>(reader: R, cfg: &Config) -> Result<Self, Error> {
        let parser = Parser::new(reader.lines())?.with_config(cfg);
        Self::collect(parser)
    }

    /// Parses a local file with default [Config].
    /// Records are tagged with the file name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_file_with(path, &Config::default())
    }

    /// Parses a local file with this [Config].
    pub fn from_file_with<P: AsRef<Path>>(path: P, cfg: &Config) -> Result<Self, Error> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut parser = Parser::new(reader.lines())?.with_config(cfg);
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            parser = parser.with_source(name);
        }

        Self::collect(parser)
    }

    fn collect<I>(parser: Parser<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let header = parser.header().clone();

        let mut records = Vec::new();
        let mut rejected = Vec::new();

        for result in parser {
            match result {
                Ok(rec) => records.push(rec),
                Err(e @ Error::Io(_)) => return Err(e),
                Err(e) => rejected.push(e),
            }
        }

        info!(
            "{} records parsed, {} rejected",
            records.len(),
            rejected.len()
        );

        Ok(Self {
            header,
            records,
            rejected,
        })
    }

    /// Navigation message flavour
    pub fn kind(&self) -> Result<NavKind, Error> {
        self.header.kind()
    }

    pub fn gps_ephemerides(&self) -> impl Iterator<Item = &GpsEphemeris> + '_ {
        self.records.iter().filter_map(EphemerisRecord::as_gps)
    }

    pub fn glonass_ephemerides(&self) -> impl Iterator<Item = &GlonassEphemeris> + '_ {
        self.records.iter().filter_map(EphemerisRecord::as_glonass)
    }

    /// Records grouped per [SV], see [group_by_sv]
    pub fn group_by_sv(&self) -> BTreeMap<SV, Vec<EphemerisRecord>> {
        group_by_sv(self.records.iter().cloned())
    }

    /// Best GPS ephemeris for `sv` at `t`, see [select_gps]
    pub fn select_gps(&self, sv: SV, t: GpsTime) -> Option<&GpsEphemeris> {
        select_gps(&self.records, sv, t)
    }
}

impl FromStr for NavigationFile {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse(content.as_bytes())
    }
}

impl std::fmt::Display for NavigationFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.header)?;
        for rec in self.records.iter() {
            writeln!(f, "{}", rec)?;
        }
        write!(f, "{} rejected record(s)", self.rejected.len())
    }
}
