use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::locale;

/// One row of domain data as an untyped key-value mapping.
pub type Record = Map<String, Value>;

/// Keys probed, in order, for a wrapped record list.
pub const LIST_KEYS: [&str; 6] = ["data", "items", "result", "value", "records", "list"];

/// Canonical payload extracted from a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Empty body or JSON `null`.
    Empty,
    List(Vec<Record>),
    Record(Record),
    /// A non-JSON body (bearer tokens) or a bare JSON primitive.
    Scalar(String),
}

impl Payload {
    /// Collapse into a record list. Single records become a one-element list.
    pub fn into_list(self) -> Vec<Record> {
        match self {
            Payload::List(records) => records,
            Payload::Record(record) => vec![record],
            Payload::Empty | Payload::Scalar(_) => Vec::new(),
        }
    }
}

/// Extract the canonical payload from a raw response body.
///
/// Shapes are tried in a fixed priority order:
/// 1. non-JSON text → [`Payload::Scalar`]
/// 2. empty / `null` → [`Payload::Empty`]
/// 3. `{isSuccessful: false}` → [`NormalizeError::LogicalFailure`]
/// 4. `{isSuccessful: true, data}` → extraction restarts on `data`
/// 5. bare array → list
/// 6. an array under one of [`LIST_KEYS`], top level then one level deeper
/// 7. best-effort search for the first array of objects
///
/// An object that yields no list is returned as a single record.
pub fn normalize(raw: &str) -> Result<Payload, NormalizeError> {
    match parse(raw) {
        Parsed::Empty => Ok(Payload::Empty),
        Parsed::Text(text) => Ok(Payload::Scalar(text.to_string())),
        Parsed::Json(value) => normalize_value(value),
    }
}

/// [`normalize`] for an already parsed JSON value.
pub fn normalize_value(value: Value) -> Result<Payload, NormalizeError> {
    if value.is_null() {
        return Ok(Payload::Empty);
    }
    let target = unwrap_envelope(value)?;
    if let Some(list) = extract_list(&target) {
        return Ok(Payload::List(into_records(list)));
    }
    match target {
        Value::Null => Ok(Payload::Empty),
        Value::Object(record) => Ok(Payload::Record(record)),
        Value::String(s) => Ok(Payload::Scalar(s)),
        other => Ok(Payload::Scalar(other.to_string())),
    }
}

/// Extract a record list for list endpoints.
///
/// Empty bodies and `null` give an empty list; a non-JSON body is a
/// [`NormalizeError::MalformedPayload`].
pub fn normalize_list(raw: &str) -> Result<Vec<Record>, NormalizeError> {
    match parse(raw) {
        Parsed::Empty => Ok(Vec::new()),
        Parsed::Text(text) => Err(NormalizeError::MalformedPayload(preview(text))),
        Parsed::Json(Value::Null) => Ok(Vec::new()),
        Parsed::Json(value) => {
            let target = unwrap_envelope(value)?;
            Ok(extract_list(&target)
                .map(|items| into_records(items))
                .unwrap_or_default())
        }
    }
}

/// Extract a single record for single-entity endpoints.
///
/// Anything that is not an object (including a non-JSON body) yields an
/// empty record; only a logical failure is an error.
pub fn normalize_record(raw: &str) -> Result<Record, NormalizeError> {
    match parse(raw) {
        Parsed::Empty | Parsed::Text(_) => Ok(Record::new()),
        Parsed::Json(value) => match unwrap_envelope(value)? {
            Value::Object(record) => Ok(record),
            _ => Ok(Record::new()),
        },
    }
}

enum Parsed<'a> {
    Empty,
    Text(&'a str),
    Json(Value),
}

fn parse(raw: &str) -> Parsed<'_> {
    if raw.trim().is_empty() {
        return Parsed::Empty;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Parsed::Json(value),
        Err(_) => Parsed::Text(raw),
    }
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}

/// Apply the success envelope: fail on `isSuccessful: false`, unwrap
/// `data` on `isSuccessful: true`, pass anything else through.
fn unwrap_envelope(value: Value) -> Result<Value, NormalizeError> {
    let Value::Object(mut obj) = value else {
        return Ok(value);
    };
    match obj.get("isSuccessful").and_then(Value::as_bool) {
        Some(false) => Err(NormalizeError::LogicalFailure(error_messages(&obj))),
        Some(true) if obj.get("data").is_some_and(|data| !data.is_null()) => {
            Ok(obj.remove("data").unwrap_or(Value::Null))
        }
        _ => Ok(Value::Object(obj)),
    }
}

/// Join `errorMessages` (array or scalar) with `", "`.
fn error_messages(obj: &Record) -> String {
    let joined = match obj.get("errorMessages") {
        Some(Value::Array(items)) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Some(Value::Null) | None => String::new(),
        Some(other) => value_text(other),
    };
    if joined.trim().is_empty() {
        locale::UNKNOWN_ERROR.to_string()
    } else {
        joined
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn extract_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(obj) => probe_keys(obj).or_else(|| find_record_array(obj)),
        _ => None,
    }
}

/// Probe [`LIST_KEYS`] at the top level, then inside each probed object.
fn probe_keys(obj: &Record) -> Option<&Vec<Value>> {
    for key in LIST_KEYS {
        if let Some(Value::Array(items)) = obj.get(key) {
            return Some(items);
        }
    }
    for key in LIST_KEYS {
        if let Some(Value::Object(inner)) = obj.get(key) {
            for inner_key in LIST_KEYS {
                if let Some(Value::Array(items)) = inner.get(inner_key) {
                    return Some(items);
                }
            }
        }
    }
    None
}

/// Best-effort fallback: depth-first over object values, returning the first
/// array whose every element is an object. Nested objects only win when they
/// produce a non-empty list.
///
/// This is a heuristic for payloads that match none of the known envelopes;
/// keep it last in the chain.
fn find_record_array(obj: &Record) -> Option<&Vec<Value>> {
    for value in obj.values() {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => return Some(items),
            Value::Object(inner) => {
                let found = probe_keys(inner).or_else(|| find_record_array(inner));
                if let Some(items) = found.filter(|items| !items.is_empty()) {
                    return Some(items);
                }
            }
            _ => {}
        }
    }
    None
}

/// Keep object elements; anything else cannot be shown as a row.
fn into_records(items: &[Value]) -> Vec<Record> {
    items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect()
}
