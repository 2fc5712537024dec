//! Emission of generated tables as Rust source text.

use std::io::{self, Write};

use super::types::models::DeltaEntry;

/// Writes the case-folding table as a Rust static-array declaration.
///
/// The output is source text for the consuming regex engine: a fixed-size
/// `CASE_FOLDING` array of inclusive `char` ranges paired with signed
/// deltas, code points escaped as six-digit `\u{...}` literals.
pub fn write_case_folding_table<W: Write>(out: &mut W, entries: &[DeltaEntry]) -> io::Result<()> {
    writeln!(out, "use crate::Range;")?;
    writeln!(out)?;
    writeln!(
        out,
        "pub(crate) static CASE_FOLDING: [(Range<char>, i32); {}] = [",
        entries.len()
    )?;
    for entry in entries {
        writeln!(
            out,
            "    (Range::new('\\u{{{:06x}}}', '\\u{{{:06x}}}'), {}),",
            entry.first, entry.last, entry.delta
        )?;
    }
    writeln!(out, "];")
}
