use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::envelope::Record;
use crate::locale;
use crate::path::FieldPath;
use crate::render::{DisplayValue, RenderOptions, Tone, format_time_only, render_cell_with};

/// Leaf keys always shown as a time of day, typo'd API spellings included.
const TIME_ONLY_KEYS: [&str; 4] = ["createdtime", "createadtime", "cratedtime", "updatedtime"];
const TIME_ONLY_TITLES: [&str; 2] = ["Oluşturma Saati", "Güncelleme Saati"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Per-column rendering override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnFormat {
    /// Type-driven rendering via [`render_cell_with`].
    Auto,
    /// Blue badge carrying the value.
    Tag,
    /// Deleted / active badge.
    Status,
    /// Always `HH:MM.SS`.
    TimeOnly,
}

impl ColumnFormat {
    pub fn for_column(path: &FieldPath, title: &str) -> Self {
        let dotted = path.dotted();
        let leaf = path.leaf().to_ascii_lowercase();
        if dotted == "customerType.name" {
            ColumnFormat::Tag
        } else if dotted.to_ascii_lowercase().contains("isdeleted") {
            ColumnFormat::Status
        } else if TIME_ONLY_KEYS.contains(&leaf.as_str()) || TIME_ONLY_TITLES.contains(&title) {
            ColumnFormat::TimeOnly
        } else {
            ColumnFormat::Auto
        }
    }
}

/// A displayable field: where it lives, what it is called, how it renders.
///
/// Every column is filterable with a case-insensitive substring match and
/// sortable with [`compare_values`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub path: FieldPath,
    pub title: String,
    pub format: ColumnFormat,
    pub filterable: bool,
}

impl Column {
    pub fn new(path: FieldPath, title: String) -> Self {
        let format = ColumnFormat::for_column(&path, &title);
        Column {
            path,
            title,
            format,
            filterable: true,
        }
    }

    pub fn value<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        self.path.get(record)
    }

    pub fn render(&self, record: &Record, options: &RenderOptions) -> DisplayValue {
        let value = self.value(record);
        match self.format {
            ColumnFormat::Auto => render_cell_with(value, &self.path, options),
            ColumnFormat::Tag => {
                let text = cell_text(value);
                if text.is_empty() {
                    DisplayValue::badge(locale::PLACEHOLDER, Tone::Blue)
                } else {
                    DisplayValue::badge(text, Tone::Blue)
                }
            }
            ColumnFormat::Status if truthy(value) => {
                DisplayValue::badge(locale::DELETED, Tone::Volcano)
            }
            ColumnFormat::Status => DisplayValue::badge(locale::ACTIVE, Tone::Green),
            ColumnFormat::TimeOnly => match value {
                None | Some(Value::Null) => DisplayValue::Placeholder,
                Some(v) => DisplayValue::Text(format_time_only(&cell_text(Some(v)))),
            },
        }
    }

    /// Case-insensitive substring match over the stringified cell.
    pub fn matches(&self, record: &Record, needle: &str) -> bool {
        cell_text(self.value(record))
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        compare_values(self.value(a), self.value(b))
    }
}

/// Stringified cell: objects and sequences as JSON, absent/null as "".
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric comparison when both sides are numbers, otherwise a
/// case-sensitive comparison of the stringified values.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b)
        && let (Some(x), Some(y)) = (x.as_f64(), y.as_f64())
    {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    cell_text(a).cmp(&cell_text(b))
}

/// Stable sort by one column.
pub fn sort_records(records: &mut [Record], column: &Column, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord = column.compare(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn column(path: &str, title: &str) -> Column {
        Column::new(FieldPath::parse(path), title.to_string())
    }

    #[test]
    fn formats_follow_field_names() {
        assert_eq!(column("customerType.name", "Müşteri Türü").format, ColumnFormat::Tag);
        assert_eq!(column("isDeleted", "Durum").format, ColumnFormat::Status);
        assert_eq!(column("cratedTime", "Crated Time").format, ColumnFormat::TimeOnly);
        assert_eq!(column("shiftStart", "Güncelleme Saati").format, ColumnFormat::TimeOnly);
        assert_eq!(column("name", "Ad").format, ColumnFormat::Auto);
    }

    #[test]
    fn status_badges() {
        let col = column("isDeleted", "Durum");
        let opts = RenderOptions::default();
        assert_eq!(
            col.render(&record(json!({ "isDeleted": true })), &opts),
            DisplayValue::badge(locale::DELETED, Tone::Volcano)
        );
        assert_eq!(
            col.render(&record(json!({})), &opts),
            DisplayValue::badge(locale::ACTIVE, Tone::Green)
        );
    }

    #[test]
    fn tag_falls_back_to_dash() {
        let col = column("customerType.name", "Müşteri Türü");
        let opts = RenderOptions::default();
        assert_eq!(
            col.render(&record(json!({ "customerType": { "name": "Kurumsal" } })), &opts),
            DisplayValue::badge("Kurumsal", Tone::Blue)
        );
        assert_eq!(
            col.render(&record(json!({ "customerType": {} })), &opts),
            DisplayValue::badge("-", Tone::Blue)
        );
    }

    #[test]
    fn time_only_column_ignores_name_heuristics() {
        let col = column("updatedTime", "Güncelleme Saati");
        let r = record(json!({ "updatedTime": "10:58:04.6112642" }));
        assert_eq!(col.render(&r, &RenderOptions::default()).to_string(), "10:58.04");
        assert_eq!(
            col.render(&record(json!({ "updatedTime": null })), &RenderOptions::default()),
            DisplayValue::Placeholder
        );
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let col = column("address", "Adres");
        let r = record(json!({ "address": { "city": "Bursa" }, "name": "İlayda" }));
        assert!(col.matches(&r, "bursa"));
        assert!(!col.matches(&r, "izmir"));
        assert!(column("name", "Ad").matches(&r, "LAY"));
        assert!(!column("missing", "X").matches(&r, "a"));
    }

    #[test]
    fn strings_compare_case_sensitively() {
        assert_eq!(compare_values(Some(&json!("B")), Some(&json!("a"))), Ordering::Less);
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Less);
    }

    #[test]
    fn mixed_number_and_string_compare_as_strings() {
        assert_eq!(compare_values(Some(&json!(10)), Some(&json!("9"))), Ordering::Less);
    }

    #[test]
    fn descending_sort_reverses() {
        let col = column("n", "N");
        let mut rows: Vec<Record> = [1, 3, 2].iter().map(|n| record(json!({ "n": n }))).collect();
        sort_records(&mut rows, &col, SortDirection::Desc);
        let order: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(order, [3, 2, 1]);
    }
}
