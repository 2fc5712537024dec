//! Data model for UCD records and generated table entries.

use std::fmt;
use std::ops::Range;

use super::error::ParseErrorKind;

/// The largest valid Unicode scalar value.
pub const MAX_CODE_POINT: u32 = char::MAX as u32;

/// Parses a single Unicode code point.
///
/// Code points are expressed in UCD files as hexadecimal numbers with four
/// to six digits.
pub fn parse_code_point(text: &str) -> std::result::Result<u32, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidCodePoint(text.to_string());
    if text.len() < 4 || text.len() > 6 {
        return Err(invalid());
    }
    let code_point = u32::from_str_radix(text, 16).map_err(|_| invalid())?;
    if code_point > MAX_CODE_POINT {
        return Err(invalid());
    }
    Ok(code_point)
}

/// An inclusive, non-empty span of code points.
///
/// Stored half-open internally; a bare code point is a range of length 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodePointRange {
    start: u32,
    end: u32,
}

impl CodePointRange {
    /// Builds a range from inclusive bounds. Callers must uphold
    /// `first <= last <= MAX_CODE_POINT`.
    pub(crate) fn from_bounds(first: u32, last: u32) -> Self {
        debug_assert!(first <= last && last <= MAX_CODE_POINT);
        Self {
            start: first,
            end: last + 1,
        }
    }

    /// Parses either the form `X..Y`, where `X` is less than or equal to
    /// `Y`, or the form `X`, which is short for `X..X`.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseErrorKind> {
        let Some((first, last)) = text.split_once("..") else {
            let code_point = parse_code_point(text)?;
            return Ok(Self::from_bounds(code_point, code_point));
        };
        if last.contains("..") {
            return Err(ParseErrorKind::InvalidCodePointRange(text.to_string()));
        }
        let first = parse_code_point(first)?;
        let last = parse_code_point(last)?;
        if first > last {
            return Err(ParseErrorKind::InvalidCodePointRange(text.to_string()));
        }
        Ok(Self::from_bounds(first, last))
    }

    /// The smallest code point in the range.
    pub fn first(&self) -> u32 {
        self.start
    }

    /// The largest code point in the range (inclusive).
    pub fn last(&self) -> u32 {
        self.end - 1
    }

    /// Number of code points covered.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// True if the range covers exactly one code point.
    pub fn is_single(&self) -> bool {
        self.len() == 1
    }

    /// Iterates over every code point in the range, ascending.
    pub fn iter(&self) -> Range<u32> {
        self.start..self.end
    }
}

impl IntoIterator for CodePointRange {
    type Item = u32;
    type IntoIter = Range<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..self.end
    }
}

impl fmt::Display for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{:04X}", self.first())
        } else {
            write!(f, "{:04X}..{:04X}", self.first(), self.last())
        }
    }
}

/// One logical (post-merge) line of a UCD data file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataRecord {
    /// Physical 1-based line number that completed this record. For a
    /// record assembled from a `First`/`Last` sentinel pair, this is the
    /// `Last` line.
    pub line: u64,
    /// Resolved code-point range from field 0.
    pub range: CodePointRange,
    /// The remaining fields, whitespace-stripped. For a record assembled
    /// from a sentinel pair, the name field holds the bare range name with
    /// the `<..., First>` / `<..., Last>` marker stripped.
    pub fields: Vec<String>,
}

/// A case-folding status tag from `CaseFolding.txt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldStatus {
    /// `C`: common case folding, valid in both simple and full folding.
    Common,
    /// `F`: full case folding, may map to multiple code points.
    Full,
    /// `S`: simple case folding, single code point result.
    Simple,
    /// `T`: Turkic special-case folding for dotted/dotless I.
    Turkic,
}

impl FoldStatus {
    /// Parses a status field. Returns `None` for unrecognized tags, which
    /// callers skip rather than treat as an error.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "C" => Some(Self::Common),
            "F" => Some(Self::Full),
            "S" => Some(Self::Simple),
            "T" => Some(Self::Turkic),
            _ => None,
        }
    }
}

/// One entry of the generated case-folding table: a maximal run of code
/// points whose fold partner is reached by applying `delta`.
///
/// A delta of magnitude 1 is a parity-conditioned toggle, not a plain
/// offset; see [`apply_delta`](crate::apply_delta).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeltaEntry {
    /// First code point covered (inclusive).
    pub first: u32,
    /// Last code point covered (inclusive).
    pub last: u32,
    /// Signed fold delta, anchored at the parity of `first`.
    pub delta: i32,
}
