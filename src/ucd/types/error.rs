//! Custom error types for the ucd-tablegen crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum UcdError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parse or validation failure, located at a physical line of the
    /// source file. The `file:line:` prefix is part of the user-visible
    /// message, so the CLI can print this error verbatim.
    #[error("{file}:{line}: {kind}")]
    Parse {
        file: String,
        line: u64,
        kind: ParseErrorKind,
    },
}

/// What went wrong on a given line, independent of where.
///
/// All variants are fatal: the generator never recovers or emits a
/// partial table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A field that should hold a 4-6 digit hex code point does not.
    #[error("invalid code point {0}")]
    InvalidCodePoint(String),

    /// A malformed `X..Y` range, or one with `X > Y`.
    #[error("invalid code point range {0}")]
    InvalidCodePointRange(String),

    /// A data line with the wrong number of `;`-separated fields.
    #[error("invalid number of fields {0}")]
    MalformedLine(usize),

    /// A `<name, First>` sentinel line that is not a single code point,
    /// or that arrives while another range is already open.
    #[error("invalid First line")]
    InvalidFirstLine,

    /// The line after a `<name, First>` sentinel is not a matching
    /// single-point `<name, Last>` line with `last >= first`.
    #[error("invalid Last line")]
    InvalidLastLine,
}

/// A convenience `Result` type alias using the crate's `UcdError` type.
pub type Result<T> = std::result::Result<T, UcdError>;
