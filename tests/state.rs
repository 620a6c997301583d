mod common;

use std::cell::Cell;

use common::{column_text, load, table};
use csv_wrangler::{
    ColumnHistogram, ColumnType, HISTOGRAM_BINS, MetadataProvider, NullError, Operation,
    OperationKind, StandardMetadata, Table, Value, WranglerError, WranglerState,
};

/// Delegates to [`StandardMetadata`] and counts each computation.
#[derive(Default)]
struct CountingMetadata {
    types: Cell<usize>,
    histograms: Cell<usize>,
    nulls: Cell<usize>,
}

impl CountingMetadata {
    fn total(&self) -> usize {
        self.types.get() + self.histograms.get() + self.nulls.get()
    }
}

impl MetadataProvider for CountingMetadata {
    fn infer_type(&self, table: &Table, column: &str) -> ColumnType {
        self.types.set(self.types.get() + 1);
        StandardMetadata.infer_type(table, column)
    }

    fn histogram(&self, table: &Table, column: &str, column_type: ColumnType) -> ColumnHistogram {
        self.histograms.set(self.histograms.get() + 1);
        StandardMetadata.histogram(table, column, column_type)
    }

    fn detect_nulls(&self, table: &Table, column: &str) -> NullError {
        self.nulls.set(self.nulls.get() + 1);
        StandardMetadata.detect_nulls(table, column)
    }
}

fn scenario_one() -> WranglerState {
    load(&["a", "b"], &[&["1", "x"], &["2", "y"]])
}

#[test]
fn load_infers_types_and_clean_null_reports() {
    let state = scenario_one();
    assert_eq!(state.column_order(), ["a", "b"]);
    assert_eq!(state.column_type("a"), Some(ColumnType::Int));
    assert_eq!(state.column_type("b"), Some(ColumnType::String));
    for column in ["a", "b"] {
        let nulls = &state.null_errors()[column];
        assert_eq!(nulls.count, 0);
        assert!(nulls.is_clean());
    }
    assert!(state.history().is_empty());
    state.check_consistency().expect("consistent after load");
}

#[test]
fn drop_removes_column_from_every_map() {
    let state = scenario_one().apply(&Operation::drop("b"));
    assert_eq!(state.column_order(), ["a"]);
    assert!(!state.column_types().contains_key("b"));
    assert!(!state.histograms().contains_key("b"));
    assert!(!state.null_errors().contains_key("b"));
    assert!(!state.table().has_column("b"));
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history().entries()[0].kind(), OperationKind::Drop);
    state.check_consistency().expect("consistent after drop");
}

#[test]
fn split_inserts_parts_after_source() {
    let state = load(
        &["id", "c", "tail"],
        &[&["1", "foo,bar", "t"], &["2", "baz,qux,quux", "u"]],
    )
    .apply(&Operation::split(",", "c", "c1", "c2"));
    assert_eq!(state.column_order(), ["id", "c", "c1", "c2", "tail"]);
    assert_eq!(column_text(&state, "c1"), ["foo", "baz"]);
    assert_eq!(column_text(&state, "c2"), ["bar", "qux,quux"]);
    assert_eq!(column_text(&state, "c"), ["foo,bar", "baz,qux,quux"]);
    assert_eq!(state.column_type("c1"), Some(ColumnType::String));
    state.check_consistency().expect("consistent after split");
}

#[test]
fn split_without_delimiter_drops_last_character_of_first_part() {
    let state = load(&["c"], &[&["foobar"], &["x"], &[""]])
        .apply(&Operation::split(",", "c", "c1", "c2"));
    assert_eq!(column_text(&state, "c1"), ["fooba", "", ""]);
    assert_eq!(column_text(&state, "c2"), ["", "", ""]);
    assert_eq!(state.null_errors()["c2"].count, 3);
}

#[test]
fn rename_moves_metadata_without_recomputing() {
    let provider = CountingMetadata::default();
    let initial = WranglerState::load_with(
        table(&["a", "b"], &[&["1", "x"], &["2", "y"]]),
        None,
        &provider,
    );
    assert_eq!(provider.types.get(), 2);
    let type_before = initial.column_type("a");
    let histogram_before = initial.histograms()["a"].clone();
    let computed_at_load = provider.total();

    let renamed = initial.apply_with(&Operation::rename("a", "z"), &provider);
    assert_eq!(provider.total(), computed_at_load);
    assert_eq!(renamed.column_type("z"), type_before);
    assert_eq!(renamed.histograms()["z"], histogram_before);
    assert!(!renamed.column_types().contains_key("a"));
    assert!(!renamed.histograms().contains_key("a"));
    assert!(!renamed.null_errors().contains_key("a"));
    assert_eq!(renamed.column_order(), ["z", "b"]);
    renamed.check_consistency().expect("consistent after rename");
}

#[test]
fn additive_operations_compute_only_new_columns() {
    let provider = CountingMetadata::default();
    let state = WranglerState::load_with(
        table(&["first", "last"], &[&["ada", "lovelace"], &["alan", "turing"]]),
        Some(vec!["first".to_string(), "last".to_string()]),
        &provider,
    );
    provider.types.set(0);

    let merged = state.apply_with(&Operation::merge("first", "last", " ", "full"), &provider);
    assert_eq!(provider.types.get(), 1);
    assert_eq!(merged.column_order(), ["first", "full", "last"]);

    let split = merged.apply_with(&Operation::split(" ", "full", "given", "family"), &provider);
    assert_eq!(provider.types.get(), 3);
    assert_eq!(split.column_order(), ["first", "full", "given", "family", "last"]);

    let upper = split.apply_with(&Operation::uppercase("family"), &provider);
    assert_eq!(provider.types.get(), 3);
    assert_eq!(column_text(&upper, "family"), ["LOVELACE", "TURING"]);
}

#[test]
fn case_operations_keep_earlier_metadata() {
    let state = load(&["flag"], &[&["yes"], &["no"]]);
    assert_eq!(state.column_type("flag"), Some(ColumnType::Boolean));
    let upper = state.apply(&Operation::uppercase("flag"));
    assert_eq!(upper.column_type("flag"), Some(ColumnType::Boolean));
    assert_eq!(upper.histograms(), state.histograms());
    assert_eq!(column_text(&upper, "flag"), ["YES", "NO"]);
}

#[test]
fn uppercase_is_idempotent_on_rows() {
    let state = load(&["name"], &[&["Ada"], &["ALAN"], &["grace hopper"]]);
    let once = state.apply(&Operation::uppercase("name"));
    let twice = once.apply(&Operation::uppercase("name"));
    assert_eq!(once.table(), twice.table());
    assert_eq!(twice.history().len(), 2);
}

#[test]
fn noop_operations_leave_state_and_history_unchanged() {
    let state = scenario_one();
    let cases = [
        Operation::drop("missing"),
        Operation::rename("a", "b"),
        Operation::split(",", "b", "a", "c"),
        Operation::merge("a", "missing", "-", "m"),
        Operation::substring("a", 0, 1, "b"),
        Operation::titlecase("missing"),
    ];
    for op in &cases {
        let next = state.apply(op);
        assert_eq!(next, state, "{op:?} should not change the state");
    }
}

#[test]
fn substring_adds_sliced_column() {
    let state = load(&["code"], &[&["AB-1234"], &["CD-9"]])
        .apply(&Operation::substring("code", 3, 7, "digits"));
    assert_eq!(state.column_order(), ["code", "digits"]);
    assert_eq!(column_text(&state, "digits"), ["1234", "9"]);
    assert_eq!(state.column_type("digits"), Some(ColumnType::Int));
}

#[test]
fn substring_clamps_negative_wire_indices() {
    let state = load(&["code"], &[&["AB-1234"], &["Z"]])
        .apply_wire(
            "substring",
            serde_json::json!({
                "column": "code",
                "begin_index": -2,
                "end_index": 2,
                "column_name": "prefix"
            }),
        )
        .expect("negative indices are clamped");
    assert_eq!(column_text(&state, "prefix"), ["AB", "Z"]);
    assert_eq!(state.history().len(), 1);
}

#[test]
fn histograms_count_every_non_null_value() {
    let state = load(
        &["qty", "price", "note", "flag"],
        &[
            &["1", "2.5", "a", "yes"],
            &["", "3.75", "bb", "no"],
            &["7", "", "", "yes"],
            &["12", "10", "dddd", ""],
        ],
    );
    for column in ["qty", "price", "note"] {
        let histogram = state.histograms()[column]
            .binned()
            .expect("numeric proxy histogram");
        assert_eq!(histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(histogram.labels.len(), HISTOGRAM_BINS);
        let non_null = state.table().len() - state.null_errors()[column].count;
        assert_eq!(histogram.total(), non_null, "{column}");
    }
    assert_eq!(
        state.histograms()["flag"],
        ColumnHistogram::Unsupported {
            column_type: ColumnType::Boolean
        }
    );
}

#[test]
fn null_reports_list_missing_rows() {
    let state = load(&["v"], &[&["1"], &[""], &["3"], &[""]]);
    let nulls = &state.null_errors()["v"];
    assert_eq!(nulls.count, 2);
    assert!(nulls.contains(1));
    assert!(nulls.contains(3));
    assert!(!nulls.contains(0));
}

#[test]
fn apply_wire_rejects_unknown_kinds() {
    let state = scenario_one();
    let err = state
        .apply_wire("explode", serde_json::json!({"column": "a"}))
        .unwrap_err();
    assert!(matches!(err, WranglerError::UnknownOperation(ref kind) if kind == "explode"));
    assert_eq!(err.to_string(), "unknown operation `explode`");
}

#[test]
fn apply_wire_reports_bad_payloads() {
    let err = scenario_one()
        .apply_wire("rename", serde_json::json!({"column": "a"}))
        .unwrap_err();
    assert!(matches!(err, WranglerError::InvalidPayload { ref kind, .. } if kind == "rename"));
}

#[test]
fn apply_wire_accepts_payload_objects() {
    let state = scenario_one()
        .apply_wire(
            "merge",
            serde_json::json!({
                "column": "a",
                "merge_with": "b",
                "join_by": "-",
                "merged_column_name": "ab"
            }),
        )
        .expect("merge applies");
    assert_eq!(column_text(&state, "ab"), ["1-x", "2-y"]);
    let entry = state.history().last().expect("history entry");
    assert_eq!(entry.payload()["merged_column_name"], "ab");
}

#[test]
fn history_records_every_applied_operation_in_order() {
    let ops = [
        Operation::rename("a", "num"),
        Operation::uppercase("b"),
        Operation::drop("missing"),
        Operation::merge("num", "b", "/", "key"),
    ];
    let state = WranglerState::replay(
        table(&["a", "b"], &[&["1", "x"], &["2", "y"]]),
        None,
        ops.iter(),
    );
    let kinds = state
        .history()
        .entries()
        .iter()
        .map(|entry| entry.kind())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        [
            OperationKind::Rename,
            OperationKind::Uppercase,
            OperationKind::Merge
        ]
    );
    let ids = state
        .history()
        .entries()
        .iter()
        .map(|entry| entry.id())
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(ids.len(), 3);
    assert_eq!(column_text(&state, "key"), ["1/X", "2/Y"]);
}

#[test]
fn replaying_history_reproduces_table() {
    let source = table(&["a", "b"], &[&["1", "hello world"], &["2", "foo bar"]]);
    let state = WranglerState::load(source.clone())
        .apply(&Operation::split(" ", "b", "left", "right"))
        .apply(&Operation::titlecase("left"))
        .apply(&Operation::drop("b"));
    let replayed = WranglerState::replay(source, None, state.history().operations());
    assert_eq!(replayed.table(), state.table());
    assert_eq!(replayed.column_order(), state.column_order());
    assert_eq!(replayed.table().rows()[0]["left"], Value::from("Hello"));
}
