use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use serde_json::Value;

use crate::locale;
use crate::path::FieldPath;

/// Badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Volcano,
    Blue,
}

/// What a single table cell shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// Absent or null value, shown as a dash.
    Placeholder,
    Badge { label: String, tone: Tone },
    Number(String),
    /// One badge per sequence element.
    Badges(Vec<String>),
    Text(String),
    /// Monospace JSON for nested objects.
    Code(String),
}

impl DisplayValue {
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        DisplayValue::Badge {
            label: label.into(),
            tone,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Placeholder => f.write_str(locale::PLACEHOLDER),
            DisplayValue::Badge { label, .. } => write!(f, "[{label}]"),
            DisplayValue::Number(n) => f.write_str(n),
            DisplayValue::Badges(labels) => {
                for (i, label) in labels.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "[{label}]")?;
                }
                Ok(())
            }
            DisplayValue::Text(text) | DisplayValue::Code(text) => f.write_str(text),
        }
    }
}

/// Inferred kind of a single cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    Array,
    DateLike,
    TimeOnly,
    Object,
    Text,
}

impl ValueKind {
    pub fn of(value: Option<&Value>, path: &FieldPath) -> Self {
        match value {
            None | Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
            Some(Value::String(s)) => {
                if !is_date_like(s) && !names_date_or_time(path) {
                    ValueKind::Text
                } else if is_pure_time(path) {
                    ValueKind::TimeOnly
                } else {
                    ValueKind::DateLike
                }
            }
        }
    }
}

/// Rendering knobs that depend on the viewer rather than the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Timezone offset zoned timestamps are shown in.
    pub offset: FixedOffset,
}

impl RenderOptions {
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or(Utc.fix());
        RenderOptions { offset }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { offset: Utc.fix() }
    }
}

/// Render a cell with default options (UTC).
pub fn render_cell(value: Option<&Value>, path: &FieldPath) -> DisplayValue {
    render_cell_with(value, path, &RenderOptions::default())
}

/// Render a cell. First match wins: null, boolean, number, sequence,
/// date/time string, nested object, plain text.
pub fn render_cell_with(
    value: Option<&Value>,
    path: &FieldPath,
    options: &RenderOptions,
) -> DisplayValue {
    let Some(value) = value else {
        return DisplayValue::Placeholder;
    };
    match value {
        Value::Null => DisplayValue::Placeholder,
        Value::Bool(true) => DisplayValue::badge(locale::YES, Tone::Green),
        Value::Bool(false) => DisplayValue::badge(locale::NO, Tone::Volcano),
        Value::Number(n) => DisplayValue::Number(n.to_string()),
        Value::Array(items) => DisplayValue::Badges(items.iter().map(plain_text).collect()),
        Value::String(s) => match ValueKind::of(Some(value), path) {
            ValueKind::TimeOnly => DisplayValue::Text(format_time_only(s)),
            ValueKind::DateLike => DisplayValue::Text(format_date_time(s, options)),
            _ => DisplayValue::Text(s.clone()),
        },
        Value::Object(_) => DisplayValue::Code(value.to_string()),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A string of at least 10 characters that parses as a calendar date.
pub fn is_date_like(s: &str) -> bool {
    s.chars().count() >= 10 && parse_timestamp(s, Utc.fix()).is_some()
}

/// Format as zero-padded `HH:MM.SS`.
///
/// The dot before the seconds is the console's display convention. Any
/// fractional suffix and any leading date part are dropped first. Text
/// that is not a clock time comes back with only the fraction stripped.
pub fn format_time_only(raw: &str) -> String {
    let whole = raw.split('.').next().unwrap_or(raw);
    let time = match whole.rsplit_once(|c: char| c == 'T' || c == ' ') {
        Some((_, time)) => time,
        None => whole,
    };
    let time = time.strip_suffix('Z').unwrap_or(time);
    let parts: Vec<&str> = time.split(':').collect();
    let numeric = |part: &&str| (1..=2).contains(&part.len()) && part.chars().all(|c| c.is_ascii_digit());
    if parts.len() < 2 || parts.len() > 3 || !parts.iter().all(numeric) {
        return whole.to_string();
    }
    let ss = parts.get(2).copied().unwrap_or_default();
    format!("{:0>2}:{:0>2}.{ss:0>2}", parts[0], parts[1])
}

/// Long Turkish date with 24-hour time, e.g. `18 Ekim 2025 08:50`.
/// Unparseable input is returned unchanged.
fn format_date_time(raw: &str, options: &RenderOptions) -> String {
    match parse_timestamp(raw, options.offset) {
        Some(dt) => format!(
            "{:02} {} {} {:02}:{:02}",
            dt.day(),
            locale::month_name(dt.month()),
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => raw.to_string(),
    }
}

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-ish timestamp. Zoned values are shifted into `offset`,
/// naive values are taken as already local.
fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&offset).naive_local());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Lowercased camelCase / snake_case words of the path's last segment.
fn name_words(path: &FieldPath) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in path.leaf().chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_date_word(word: &str) -> bool {
    word == "at" || word.starts_with("date")
}

/// `createdAt`, `updatedTime`, `birthDate`, `timestamp`...
fn names_date_or_time(path: &FieldPath) -> bool {
    name_words(path)
        .iter()
        .any(|w| is_date_word(w) || w.starts_with("time"))
}

/// Names a time of day: a `time` word and no `date`/`at` word.
fn is_pure_time(path: &FieldPath) -> bool {
    let words = name_words(path);
    words.iter().any(|w| w.starts_with("time")) && !words.iter().any(|w| is_date_word(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value, path: &str) -> String {
        render_cell(Some(&value), &FieldPath::parse(path)).to_string()
    }

    #[test]
    fn name_words_split_camel_and_snake_case() {
        assert_eq!(name_words(&"createdAt".into()), ["created", "at"]);
        assert_eq!(name_words(&"audit.updated_time".into()), ["updated", "time"]);
        assert_eq!(name_words(&"ID".into()), ["id"]);
    }

    #[test]
    fn status_is_not_a_date_field() {
        assert!(!names_date_or_time(&"status".into()));
        assert_eq!(render(json!("active"), "status"), "active");
    }

    #[test]
    fn pure_time_fields() {
        assert!(is_pure_time(&"cratedTime".into()));
        assert!(is_pure_time(&"createadTime".into()));
        assert!(!is_pure_time(&"createdAt".into()));
        assert!(!is_pure_time(&"updatedDateTime".into()));
    }

    #[test]
    fn time_only_pads_and_strips() {
        assert_eq!(format_time_only("13:25:00"), "13:25.00");
        assert_eq!(format_time_only("8:5"), "08:05.00");
        assert_eq!(format_time_only("10:58:04.6112642"), "10:58.04");
        assert_eq!(format_time_only("2025-10-18T08:50:04Z"), "08:50.04");
        assert_eq!(format_time_only(""), "");
    }

    #[test]
    fn time_only_keeps_text_that_is_not_a_clock_time() {
        assert_eq!(render(json!("Europe/Istanbul"), "timezone"), "Europe/Istanbul");
        assert_eq!(render(json!("yakında"), "startTime"), "yakında");
        assert_eq!(render(json!("8 saat"), "updatedTime"), "8 saat");
        assert_eq!(format_time_only("ab:cd:ef"), "ab:cd:ef");
        assert_eq!(render(json!("09:05"), "startTime"), "09:05.00");
    }

    #[test]
    fn date_time_long_format() {
        assert_eq!(render(json!("2025-10-18T08:50:00.000Z"), "createdAt"), "18 Ekim 2025 08:50");
        assert_eq!(render(json!("2025-03-01"), "note"), "01 Mart 2025 00:00");
    }

    #[test]
    fn zoned_timestamps_shift_into_display_offset() {
        let options = RenderOptions::with_offset_minutes(180);
        let value = json!("2025-10-18T08:50:00Z");
        let shown = render_cell_with(Some(&value), &"updatedAt".into(), &options);
        assert_eq!(shown.to_string(), "18 Ekim 2025 11:50");
    }

    #[test]
    fn unparseable_date_field_is_shown_verbatim() {
        assert_eq!(render(json!("yesterday"), "updatedAt"), "yesterday");
    }

    #[test]
    fn short_strings_are_not_date_like() {
        assert!(!is_date_like("2025-10"));
        assert!(is_date_like("2025-10-18"));
        assert!(!is_date_like("05321234567"));
    }

    #[test]
    fn nested_objects_render_as_code() {
        let value = json!({ "a": 1 });
        assert_eq!(
            render_cell(Some(&value), &"meta".into()),
            DisplayValue::Code(r#"{"a":1}"#.into())
        );
    }

    #[test]
    fn sequences_render_one_badge_per_element() {
        let value = json!(["x", 2, true]);
        assert_eq!(
            render_cell(Some(&value), &"tags".into()),
            DisplayValue::Badges(vec!["x".into(), "2".into(), "true".into()])
        );
        assert_eq!(render(json!(["x", "y"]), "tags"), "[x] [y]");
    }

    #[test]
    fn value_kinds() {
        let path = FieldPath::parse("updatedTime");
        assert_eq!(ValueKind::of(None, &path), ValueKind::Null);
        assert_eq!(ValueKind::of(Some(&json!("13:25:00")), &path), ValueKind::TimeOnly);
        assert_eq!(
            ValueKind::of(Some(&json!("2025-10-18")), &"note".into()),
            ValueKind::DateLike
        );
        assert_eq!(ValueKind::of(Some(&json!("Bursa")), &"city".into()), ValueKind::Text);
    }
}
