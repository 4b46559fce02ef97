use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::envelope::Record;

/// A location inside a nested record, e.g. `address.city`.
///
/// Two paths are equal iff their segment sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Split a dot-notation path into segments.
    pub fn parse(dotted: &str) -> Self {
        FieldPath(dotted.split('.').map(str::to_string).collect())
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        FieldPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, the field's own key.
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    pub fn child(&self, key: &str) -> FieldPath {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        FieldPath(segments)
    }

    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// Walk the record along this path. Missing keys and non-object
    /// intermediates yield `None`.
    pub fn get<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        let mut current = record.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        FieldPath::parse(dotted)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.dotted())
    }
}
