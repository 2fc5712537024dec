use std::collections::{BTreeSet, HashMap};
use std::io::Cursor;
use std::path::PathBuf;

use ucd_tablegen::{
    apply_delta, build_case_folding_table, build_from_records, compute_delta, parse_code_point,
    DeltaEntry, ParseErrorKind, UcdError, UcdReader,
};

fn fixture_dir() -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    p
}

fn build(data: &str) -> Vec<DeltaEntry> {
    let reader = UcdReader::new(Cursor::new(data.to_string()), "CaseFolding.txt", 4);
    build_from_records("CaseFolding.txt", reader).expect("build ok")
}

fn entry(first: u32, last: u32, delta: i32) -> DeltaEntry {
    DeltaEntry { first, last, delta }
}

/// Independently rebuilds the cyclic neighbor-pair set from the fixture,
/// for checking the table against ground truth.
fn fixture_pairs() -> BTreeSet<(u32, u32)> {
    let path = fixture_dir().join("CaseFolding.txt");
    let mut groups: HashMap<u32, Vec<u32>> = HashMap::new();
    for record in UcdReader::open(&path, 4).expect("open fixture") {
        let record = record.expect("record ok");
        if record.fields[0] != "C" && record.fields[0] != "S" {
            continue;
        }
        let mapping = parse_code_point(&record.fields[1]).expect("mapping ok");
        groups
            .entry(mapping)
            .or_insert_with(|| vec![mapping])
            .extend(record.range);
    }
    let mut pairs = BTreeSet::new();
    for group in groups.values_mut() {
        group.sort_unstable();
        group.dedup();
        for index in 0..group.len() {
            let prev = group[(index + group.len() - 1) % group.len()];
            pairs.insert((prev, group[index]));
        }
    }
    pairs
}

#[test]
fn delta_rules_invert_each_other() {
    // Adjacent partners: parity-anchored toggles.
    assert_eq!(compute_delta(0x100, 0x101), 1);
    assert_eq!(compute_delta(0x101, 0x100), 1);
    assert_eq!(compute_delta(0x1C5, 0x1C6), -1);
    assert_eq!(compute_delta(0x1C6, 0x1C5), -1);
    // Non-adjacent partners: plain difference.
    assert_eq!(compute_delta(0x41, 0x61), 32);
    assert_eq!(compute_delta(0x61, 0x41), -32);
    assert_eq!(compute_delta(0x3BC, 0xB5), -775);

    for (a, b) in [
        (0x100, 0x101),
        (0x101, 0x100),
        (0x1C5, 0x1C6),
        (0x41, 0x61),
        (0x61, 0x41),
        (0xB5, 0x3BC),
        (0x61, 0x61),
    ] {
        assert_eq!(
            apply_delta(a, compute_delta(a, b)),
            b,
            "apply must invert compute for ({:#x}, {:#x})",
            a,
            b
        );
    }
}

#[test]
fn groups_simple_ascii_pair() {
    // A folds to a; a folds to itself. One group {0x41, 0x61}, two
    // single-point entries with opposite deltas.
    let entries = build("0041; C; 0061; # A\n0061; C; 0061; # a\n");
    assert_eq!(entries, vec![entry(0x41, 0x41, 32), entry(0x61, 0x61, -32)]);
}

#[test]
fn singleton_group_keeps_identity_self_pair() {
    // A group of one produces the wraparound self-pair and a zero delta.
    let entries = build("0061; C; 0061;\n");
    assert_eq!(entries, vec![entry(0x61, 0x61, 0)]);
}

#[test]
fn merges_alternating_parity_run() {
    // Four adjacent upper/lower pairs collapse to one toggle entry.
    let entries = build("0100; C; 0101;\n0102; C; 0103;\n0104; C; 0105;\n0106; C; 0107;\n");
    assert_eq!(entries, vec![entry(0x100, 0x107, 1)]);
}

#[test]
fn three_member_group_wraps_around() {
    // Sigma: capital, final and small sigma all fold to small sigma.
    let entries = build("03A3; C; 03C3;\n03C2; C; 03C3;\n");
    assert_eq!(
        entries,
        vec![
            entry(0x3A3, 0x3A3, 31),
            entry(0x3C2, 0x3C2, 1),
            entry(0x3C3, 0x3C3, -32),
        ]
    );
}

#[test]
fn ignores_full_and_turkic_mappings() {
    // F mappings may be multi-code-point; they must be skipped before the
    // mapping field is parsed.
    let entries = build("00DF; F; 0073 0073;\n0049; T; 0131;\n0130; F; 0069 0307;\n");
    assert!(entries.is_empty());
}

#[test]
fn reports_bad_mapping_with_location() {
    let data = "# header\n\n0041; C; 12G4;\n";
    let reader = UcdReader::new(Cursor::new(data.to_string()), "CaseFolding.txt", 4);
    match build_from_records("CaseFolding.txt", reader) {
        Err(UcdError::Parse { file, line, kind }) => {
            assert_eq!(file, "CaseFolding.txt");
            assert_eq!(line, 3);
            assert_eq!(kind, ParseErrorKind::InvalidCodePoint("12G4".to_string()));
        }
        other => panic!("expected located parse error, got {:?}", other),
    }
}

#[test]
fn builds_expected_table_from_fixture() {
    let entries = build_case_folding_table(fixture_dir()).expect("build fixture table");
    assert_eq!(
        entries,
        vec![
            entry(0x41, 0x5A, 32),
            entry(0x61, 0x7A, -32),
            entry(0xB5, 0xB5, 775),
            entry(0xC0, 0xC0, 32),
            entry(0xE0, 0xE0, -32),
            entry(0x100, 0x107, 1),
            entry(0x1C4, 0x1C4, 1),
            entry(0x1C5, 0x1C5, -1),
            entry(0x1C6, 0x1C6, -2),
            entry(0x3A3, 0x3A3, 31),
            entry(0x3BC, 0x3BC, -775),
            entry(0x3C2, 0x3C2, 1),
            entry(0x3C3, 0x3C3, -32),
        ]
    );
}

#[test]
fn entries_round_trip_every_covered_code_point() {
    let entries = build_case_folding_table(fixture_dir()).expect("build fixture table");
    let expected = fixture_pairs();
    let mut covered = BTreeSet::new();
    for e in &entries {
        for a in e.first..=e.last {
            covered.insert((a, apply_delta(a, e.delta)));
        }
    }
    assert_eq!(covered, expected, "table must encode exactly the fold pairs");
}

#[test]
fn entries_are_sorted_and_disjoint() {
    let entries = build_case_folding_table(fixture_dir()).expect("build fixture table");
    for e in &entries {
        assert!(e.first <= e.last, "empty or inverted entry {:?}", e);
    }
    for win in entries.windows(2) {
        assert!(
            win[0].last < win[1].first,
            "overlapping or unsorted entries {:?} / {:?}",
            win[0],
            win[1]
        );
    }
}

#[test]
fn merge_is_maximal() {
    // No two consecutive entries could be merged under the parity rule:
    // either they are not contiguous, or the earlier entry's delta gives
    // the wrong partner for the later entry's first code point.
    let entries = build_case_folding_table(fixture_dir()).expect("build fixture table");
    for win in entries.windows(2) {
        let (prev, next) = (&win[0], &win[1]);
        let mergeable = next.first == prev.last + 1
            && apply_delta(next.first, prev.delta) == apply_delta(next.first, next.delta);
        assert!(!mergeable, "entries {:?} / {:?} should have merged", prev, next);
    }
}
