//! Case-folding table construction.
//!
//! `CaseFolding.txt` maps code points to their case-folded form, one
//! mapping per line. Stored naively that is thousands of entries; this
//! module compacts them in four steps:
//!
//! 1. Filter to common/simple mappings and group code points by fold
//!    target, so each group is one case-fold equivalence class.
//! 2. Sort each group's members, then sort the groups, fixing a
//!    deterministic global order.
//! 3. Within each group, pair every member with its predecessor in the
//!    cyclic ordering (the first member pairs with the last). Lookups can
//!    start from any member of a class, so every member needs an outgoing
//!    relationship.
//! 4. Sort all pairs and greedily merge runs of consecutive pairs that
//!    one delta explains into single `(range, delta)` entries.
//!
//! The merge leans on a parity trick: most case pairs are adjacent code
//! points (`0x100`/`0x101`, `0x102`/`0x103`, ...), with the even one upper
//! case. Encoding those as delta `+1` meaning "toggle to your parity
//! partner" lets a whole alternating run share one entry, where a plain
//! additive delta would flip sign at every code point.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use super::reader::UcdReader;
use super::types::error::{Result, UcdError};
use super::types::models::{parse_code_point, DataRecord, DeltaEntry, FoldStatus};

/// File name of the case-folding data inside a UCD directory.
pub const CASE_FOLDING_FILE: &str = "CaseFolding.txt";

/// Field count of `CaseFolding.txt` data lines: range, status, mapping,
/// trailing empty field before the comment.
const CASE_FOLDING_FIELDS: usize = 4;

/// Computes the table delta relating code point `a` to its fold partner
/// `b`.
///
/// Adjacent partners get a parity-anchored `±1`: `+1` means "partner is
/// the parity neighbor above an even `a`", `-1` the mirror case. Anything
/// else is the plain difference `b - a`.
pub fn compute_delta(a: u32, b: u32) -> i32 {
    if a + 1 == b {
        return if a % 2 == 0 { 1 } else { -1 };
    }
    if a == b + 1 {
        return if a % 2 == 0 { -1 } else { 1 };
    }
    (b as i64 - a as i64) as i32
}

/// Applies a table delta to a code point, inverting [`compute_delta`].
///
/// For `±1` the delta is a parity-conditioned toggle, not an offset:
/// `+1` maps an even code point up and an odd one down, `-1` the
/// opposite. Other deltas are plain addition.
pub fn apply_delta(code_point: u32, delta: i32) -> u32 {
    if delta == 1 {
        return if code_point % 2 == 0 {
            code_point + 1
        } else {
            code_point - 1
        };
    }
    if delta == -1 {
        return if code_point % 2 == 1 {
            code_point + 1
        } else {
            code_point - 1
        };
    }
    (code_point as i64 + delta as i64) as u32
}

/// Builds the compact case-folding table from `<ucd_dir>/CaseFolding.txt`.
///
/// Returns entries sorted by `first` and pairwise disjoint; for every
/// covered code point, [`apply_delta`] with the entry's delta yields its
/// fold partner.
///
/// # Errors
/// Fails if the file cannot be opened, a line is malformed, or a mapping
/// field is not a valid code point. Errors abort the build; no partial
/// table is produced.
pub fn build_case_folding_table(ucd_dir: impl AsRef<Path>) -> Result<Vec<DeltaEntry>> {
    let path = ucd_dir.as_ref().join(CASE_FOLDING_FILE);
    let file_name = path.display().to_string();
    let reader = UcdReader::open(&path, CASE_FOLDING_FIELDS)?;
    build_from_records(&file_name, reader)
}

/// Builds the table from an already-parsed record stream. Split out from
/// [`build_case_folding_table`] so tests can feed in-memory data.
pub fn build_from_records(
    file_name: &str,
    records: impl IntoIterator<Item = Result<DataRecord>>,
) -> Result<Vec<DeltaEntry>> {
    // Step 1: group code points by fold target. Each group is seeded with
    // the target itself, since the target folds to itself.
    let mut groups: HashMap<u32, Vec<u32>> = HashMap::new();
    for record in records {
        let record = record?;
        match FoldStatus::parse(&record.fields[0]) {
            Some(FoldStatus::Common) | Some(FoldStatus::Simple) => {}
            _ => continue,
        }
        let mapping = parse_code_point(&record.fields[1]).map_err(|kind| UcdError::Parse {
            file: file_name.to_string(),
            line: record.line,
            kind,
        })?;
        groups
            .entry(mapping)
            .or_insert_with(|| vec![mapping])
            .extend(record.range);
    }

    // Step 2: sort members within each group, then sort the groups, for a
    // deterministic global order. A code point occurring both as a target
    // and as a source of the same mapping would appear twice; keep one.
    let mut groups: Vec<Vec<u32>> = groups.into_values().collect();
    for group in &mut groups {
        group.sort_unstable();
        group.dedup();
    }
    groups.sort_unstable();
    debug!("Collected {} fold groups", groups.len());

    // Step 3: cyclic neighbor pairs. Pairing each member with its
    // predecessor (wrapping the first member around to the last) gives
    // every member an outgoing relationship, so a lookup starting at any
    // member of the class can reach the rest.
    let mut pairs: Vec<(u32, u32)> = Vec::new();
    for group in &groups {
        for index in 0..group.len() {
            let prev = group[(index + group.len() - 1) % group.len()];
            pairs.push((prev, group[index]));
        }
    }
    pairs.sort_unstable();
    debug!("Generated {} neighbor pairs", pairs.len());

    // Step 4: greedy delta merge. A pair extends the open entry when it
    // continues the run and the entry's delta (anchored at the parity of
    // the entry's first code point) still reproduces its partner.
    let mut entries: Vec<DeltaEntry> = Vec::new();
    for (a, b) in pairs {
        if let Some(open) = entries.last_mut() {
            if a == open.last + 1 && b == apply_delta(a, open.delta) {
                open.last = a;
                continue;
            }
        }
        entries.push(DeltaEntry {
            first: a,
            last: a,
            delta: compute_delta(a, b),
        });
    }

    info!(
        "Case-folding table built: {} entries from {} groups",
        entries.len(),
        groups.len()
    );
    Ok(entries)
}
