use std::sync::LazyLock;

use regex::Regex;

/// Turkish GSM number, optionally with `+90` and a leading `0`.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+90\s?)?0?5\d{2}\s?\d{3}\s?\d{2}\s?\d{2}$").expect("static regex")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field, dot-separated for nested ones.
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for `field`.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }

    /// Record `message` when `value` is blank. Returns whether it was present.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, message);
            false
        } else {
            true
        }
    }

    pub fn min_chars(&mut self, field: &'static str, value: &str, min: usize, message: &str) {
        if value.trim().chars().count() < min {
            self.push(field, message);
        }
    }
}

pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}
