use std::fmt;

use servis_client::ApiError;

use crate::validate::FormErrors;

/// Detail lines shown before the rest are summarized.
pub const MAX_DETAILS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Success => "tamam",
            Level::Info => "bilgi",
            Level::Warning => "uyarı",
            Level::Error => "hata",
        }
    }
}

/// A user-facing message produced by a view action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub details: Vec<String>,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn with_details(mut self, details: impl IntoIterator<Item = String>) -> Self {
        self.details.extend(details);
        self
    }

    pub fn from_api_error(err: &ApiError) -> Self {
        Self::error(err.to_string()).with_details(err.details().iter().cloned())
    }

    pub fn from_form(errors: &FormErrors) -> Self {
        Self::error("Lütfen form alanlarını kontrol edin")
            .with_details(errors.iter().map(|e| e.message.clone()))
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.tag(), self.message)?;
        for line in self.details.iter().take(MAX_DETAILS) {
            write!(f, "\n  - {line}")?;
        }
        if self.details.len() > MAX_DETAILS {
            write!(f, "\n  … {} daha", self.details.len() - MAX_DETAILS)?;
        }
        Ok(())
    }
}
