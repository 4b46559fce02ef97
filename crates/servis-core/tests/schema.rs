use std::cmp::Ordering;

use serde_json::{Value, json};
use servis_core::*;

fn records(values: Value) -> Vec<Record> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

fn dotted(paths: &[FieldPath]) -> Vec<String> {
    paths.iter().map(FieldPath::dotted).collect()
}

// ── Field paths ─────────────────────────────────────────────────

#[test]
fn empty_records_use_the_default_schema() {
    let paths = dotted(&build_field_paths(&[]));
    assert_eq!(paths, DEFAULT_SCHEMA);
    assert!(!paths.iter().any(|p| p == "customerType.value"));
}

#[test]
fn excluded_path_is_dropped_from_discovered_paths() {
    let rows = records(json!([
        { "name": "A", "customerType": { "name": "Bireysel", "value": 0 } },
    ]));
    let paths = dotted(&build_field_paths(&rows));
    assert_eq!(paths, ["name", "customerType.name"]);
}

#[test]
fn union_of_keys_with_preferred_first() {
    let rows = records(json!([
        { "zeta": 1, "email": "a@b.c", "address": { "street": "S", "city": "Bursa" } },
        { "createdBy": "admin", "id": 9, "extra": true, "name": "B" },
    ]));
    let paths = dotted(&build_field_paths(&rows));

    assert_eq!(
        paths,
        ["id", "name", "email", "address.city", "zeta", "address.street", "createdBy", "extra"]
    );

    let last_preferred = paths
        .iter()
        .rposition(|p| PREFERRED_ORDER.contains(&p.as_str()))
        .unwrap();
    let first_other = paths
        .iter()
        .position(|p| !PREFERRED_ORDER.contains(&p.as_str()))
        .unwrap();
    assert!(last_preferred < first_other);
}

#[test]
fn paths_are_recomputed_per_load() {
    let first = build_field_paths(&records(json!([{ "a": 1 }])));
    let second = build_field_paths(&records(json!([{ "b": 1 }])));
    assert_eq!(dotted(&first), ["a"]);
    assert_eq!(dotted(&second), ["b"]);
}

// ── Cells ───────────────────────────────────────────────────────

#[test]
fn pure_time_fields_use_dotted_seconds() {
    let value = json!("2025-10-18T08:50:04.123456");
    for path in ["updatedTime", "createdTime", "cratedTime", "shiftTime"] {
        assert_eq!(
            render_cell(Some(&value), &FieldPath::parse(path)).to_string(),
            "08:50.04",
            "{path}"
        );
    }
}

#[test]
fn booleans_render_distinct_badges() {
    let yes = render_cell(Some(&json!(true)), &"active".into());
    let no = render_cell(Some(&json!(false)), &"active".into());
    assert_eq!(yes, DisplayValue::badge("Evet", Tone::Green));
    assert_eq!(no, DisplayValue::badge("Hayır", Tone::Volcano));
    assert_ne!(yes, no);
}

#[test]
fn null_numbers_and_text() {
    assert_eq!(render_cell(None, &"x".into()), DisplayValue::Placeholder);
    assert_eq!(render_cell(Some(&Value::Null), &"x".into()).to_string(), "-");
    assert_eq!(render_cell(Some(&json!(42)), &"count".into()).to_string(), "42");
    assert_eq!(render_cell(Some(&json!("Bursa")), &"city".into()).to_string(), "Bursa");
}

// ── Sorting ─────────────────────────────────────────────────────

#[test]
fn numeric_columns_sort_numerically() {
    let mut rows = records(json!([{ "n": 10 }, { "n": 2 }, { "n": 33 }]));
    let column = Column::new(FieldPath::parse("n"), "N".into());
    sort_records(&mut rows, &column, SortDirection::Asc);
    let order: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
    assert_eq!(order, [2, 10, 33]);
}

#[test]
fn equal_keys_keep_their_order() {
    let mut rows = records(json!([
        { "k": "a", "i": 0 },
        { "k": "b", "i": 1 },
        { "k": "a", "i": 2 },
    ]));
    let column = Column::new(FieldPath::parse("k"), "K".into());
    sort_records(&mut rows, &column, SortDirection::Asc);
    let order: Vec<i64> = rows.iter().map(|r| r["i"].as_i64().unwrap()).collect();
    assert_eq!(order, [0, 2, 1]);
    assert_eq!(
        compare_values(Some(&json!(1.5)), Some(&json!(1.5))),
        Ordering::Equal
    );
}

// ── Columns ─────────────────────────────────────────────────────

#[test]
fn columns_carry_titles_and_formats() {
    let rows = records(json!([
        { "name": "A", "isDeleted": false, "customerType": { "name": "Kurumsal", "value": 1 },
          "updatedTime": "13:25:00", "serialNumber": "SN-1" },
    ]));
    let paths = build_field_paths(&rows);
    let columns = build_columns(&paths, &Titles::turkish(), &PREFERRED_ORDER);
    let summary: Vec<(String, String, ColumnFormat)> = columns
        .iter()
        .map(|c| (c.path.dotted(), c.title.clone(), c.format))
        .collect();
    assert_eq!(
        summary,
        [
            summary_row("name", "Ad", ColumnFormat::Auto),
            summary_row("customerType.name", "Müşteri Türü", ColumnFormat::Tag),
            summary_row("isDeleted", "Durum", ColumnFormat::Status),
            summary_row("updatedTime", "Güncelleme Saati", ColumnFormat::TimeOnly),
            summary_row("serialNumber", "Serial Number", ColumnFormat::Auto),
        ]
    );
    assert!(columns.iter().all(|c| c.filterable));
}

fn summary_row(path: &str, title: &str, format: ColumnFormat) -> (String, String, ColumnFormat) {
    (path.to_string(), title.to_string(), format)
}
