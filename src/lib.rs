//! # ucd-tablegen
//!
//! A generator for compact Unicode case-folding tables.
//!
//! Reads `CaseFolding.txt` from a Unicode Character Database directory and
//! compacts its mappings into a static `(range, delta)` table for embedding
//! in a regex engine's matching core. Deltas of magnitude 1 are
//! parity-conditioned toggles rather than plain offsets, which lets runs of
//! alternating upper/lower case pairs collapse into a single table entry.
//!
//! The reader half ([`UcdReader`]) is format-generic: it handles any
//! semicolon-delimited UCD data file, including ranges written as `X..Y`
//! and as paired `<name, First>` / `<name, Last>` sentinel lines.
pub mod ucd;

// Re-export the main types for convenience
pub use ucd::{
    case_folding::{apply_delta, build_case_folding_table, build_from_records, compute_delta},
    emit::write_case_folding_table,
    reader::UcdReader,
    types::{
        error::{ParseErrorKind, Result, UcdError},
        models::{
            parse_code_point, CodePointRange, DataRecord, DeltaEntry, FoldStatus, MAX_CODE_POINT,
        },
    },
};
