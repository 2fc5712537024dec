//! A streaming reader for Unicode data files.
//!
//! UCD files are line-oriented, `;`-delimited text with `#` comments.
//! The reader strips comments and whitespace, skips empty lines, checks
//! the field count, and resolves code-point ranges. Ranges appear in two
//! forms: inline as `X..Y`, or as two consecutive entries carrying
//! `<name, First>` and `<name, Last>` markers in the name field (the
//! legacy `UnicodeData.txt` convention); the reader folds a sentinel pair
//! into a single record spanning the full range.
//!
//! # Example
//! ```no_run
//! # use ucd_tablegen::UcdReader;
//! // CaseFolding.txt has four fields: range; status; mapping; comment
//! let reader = UcdReader::open("ucd/CaseFolding.txt", 4).unwrap();
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("{:?} {:?}", record.range, record.fields);
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use log::{debug, info};

use super::types::error::{ParseErrorKind, Result, UcdError};
use super::types::models::{CodePointRange, DataRecord};

/// Role marker parsed from a name field of the form `<name, First>` or
/// `<name, Last>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RangeMarker {
    First,
    Last,
}

/// Splits a name field into the bare name and its range-role marker, if
/// any. Fields without a marker are returned unchanged.
fn parse_range_marker(field: &str) -> (&str, Option<RangeMarker>) {
    if let Some(inner) = field.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        if let Some(name) = inner.strip_suffix(", First") {
            return (name, Some(RangeMarker::First));
        }
        if let Some(name) = inner.strip_suffix(", Last") {
            return (name, Some(RangeMarker::Last));
        }
    }
    (field, None)
}

/// The open half of a sentinel range: a `<name, First>` line seen, its
/// matching `Last` line not yet.
#[derive(Debug)]
struct PendingRange {
    name: String,
    first: u32,
}

/// A lazy, single-pass reader over one Unicode data file.
///
/// Yields `Result<DataRecord>`; iteration stops at end of input or can be
/// abandoned after the first error (every error is fatal to the file).
/// All state is per-instance, so readers over different files are fully
/// independent. The underlying file handle is dropped with the reader.
#[derive(Debug)]
pub struct UcdReader<R> {
    lines: Lines<R>,
    file_name: String,
    field_count: usize,
    /// Physical 1-based line number of the line most recently read,
    /// counting blank and comment-only lines.
    line: u64,
    pending: Option<PendingRange>,
}

impl UcdReader<BufReader<File>> {
    /// Opens a Unicode data file whose data lines have exactly
    /// `field_count` fields.
    pub fn open(path: impl AsRef<Path>, field_count: usize) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Unicode data file: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::new(
            BufReader::new(file),
            &path.display().to_string(),
            field_count,
        ))
    }
}

impl<R: BufRead> UcdReader<R> {
    /// Wraps an already-open reader. `file_name` is used only for error
    /// messages.
    pub fn new(inner: R, file_name: &str, field_count: usize) -> Self {
        Self {
            lines: inner.lines(),
            file_name: file_name.to_string(),
            field_count,
            line: 0,
            pending: None,
        }
    }

    fn located(&self, kind: ParseErrorKind) -> UcdError {
        UcdError::Parse {
            file: self.file_name.clone(),
            line: self.line,
            kind,
        }
    }

    /// Parses one non-empty, comment-stripped line. Returns `Ok(None)`
    /// when the line opened a sentinel range and produced no record yet.
    fn parse_line(&mut self, line: &str) -> std::result::Result<Option<DataRecord>, ParseErrorKind> {
        let mut fields: Vec<String> = line.split(';').map(|f| f.trim().to_string()).collect();
        if fields.len() != self.field_count {
            return Err(ParseErrorKind::MalformedLine(fields.len()));
        }

        let mut range = CodePointRange::parse(&fields[0])?;
        let (name, marker) = parse_range_marker(&fields[1]);

        match self.pending.take() {
            None => {
                if marker == Some(RangeMarker::First) {
                    // Opening half of a sentinel pair. Remember it and
                    // produce nothing until the Last line arrives.
                    if !range.is_single() {
                        return Err(ParseErrorKind::InvalidFirstLine);
                    }
                    debug!("Range {} opened at {:04X}", name, range.first());
                    self.pending = Some(PendingRange {
                        name: name.to_string(),
                        first: range.first(),
                    });
                    return Ok(None);
                }
                // A marker-less line, or a stray Last line, passes through
                // unchanged.
            }
            Some(pending) => {
                if marker != Some(RangeMarker::Last)
                    || name != pending.name
                    || !range.is_single()
                    || range.first() < pending.first
                {
                    return Err(ParseErrorKind::InvalidLastLine);
                }
                range = CodePointRange::from_bounds(pending.first, range.first());
                fields[1] = name.to_string();
            }
        }

        fields.remove(0);
        Ok(Some(DataRecord {
            line: self.line,
            range,
            fields,
        }))
    }
}

impl<R: BufRead> Iterator for UcdReader<R> {
    type Item = Result<DataRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            // Strip out comments and whitespace, and skip empty lines.
            let line = match line.find('#') {
                Some(hash) => &line[..hash],
                None => &line[..],
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(kind) => return Some(Err(self.located(kind))),
            }
        }
    }
}
