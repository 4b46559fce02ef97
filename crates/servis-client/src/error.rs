use serde_json::Value;
use servis_core::NormalizeError;

use crate::session::SessionError;
use crate::transport::TransportError;

/// Classification used by callers to pick a notification style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    HttpFailure,
    LogicalFailure,
    MalformedPayload,
    Session,
    Encode,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure; no response was received.
    #[error("Ağ hatası: {context}")]
    Network {
        context: String,
        #[source]
        source: TransportError,
    },

    /// Non-2xx status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        details: Vec<String>,
    },

    /// 2xx status but the envelope reported failure.
    #[error("{0}")]
    Logical(String),

    #[error("{context}: sunucu yanıtı çözümlenemedi ({detail})")]
    Malformed { context: String, detail: String },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } => ErrorKind::NetworkFailure,
            ApiError::Http { .. } => ErrorKind::HttpFailure,
            ApiError::Logical(_) => ErrorKind::LogicalFailure,
            ApiError::Malformed { .. } => ErrorKind::MalformedPayload,
            ApiError::Session(_) => ErrorKind::Session,
            ApiError::Encode(_) => ErrorKind::Encode,
        }
    }

    /// Extra lines worth showing under the headline message.
    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Http { details, .. } => details,
            _ => &[],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Attach an action context ("Müşteri oluşturulamadı") to a payload-level
    /// failure.
    pub(crate) fn from_normalize(context: &str, err: NormalizeError) -> Self {
        match err {
            NormalizeError::LogicalFailure(msg) => ApiError::Logical(format!("{context}: {msg}")),
            NormalizeError::MalformedPayload(detail) => ApiError::Malformed {
                context: context.to_string(),
                detail,
            },
        }
    }

    /// Build an [`ApiError::Http`] from a non-2xx response body.
    ///
    /// Headline priority: `errorMessages[0]`, `message`, `title`, then
    /// `"{context} (HTTP {status})"`. Details collect every
    /// `errorMessages` entry, `detail`, and each `errors` entry as
    /// `"field: message"`; a non-JSON body becomes a single detail line.
    pub(crate) fn http(context: &str, status: u16, body: &str) -> Self {
        let fallback = format!("{context} (HTTP {status})");
        let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) else {
            let trimmed = body.trim();
            let details = if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.chars().take(300).collect()]
            };
            return ApiError::Http {
                status,
                message: fallback,
                details,
            };
        };

        let error_messages: Vec<String> = match obj.get("errorMessages") {
            Some(Value::Array(items)) => items.iter().map(text).collect(),
            _ => Vec::new(),
        };
        let message = error_messages
            .first()
            .cloned()
            .or_else(|| non_blank(obj.get("message")))
            .or_else(|| non_blank(obj.get("title")))
            .unwrap_or(fallback);

        let mut details = error_messages;
        if let Some(detail) = non_blank(obj.get("detail")) {
            details.push(detail);
        }
        if let Some(Value::Object(errors)) = obj.get("errors") {
            for (field, value) in errors {
                match value {
                    Value::Array(items) => {
                        details.extend(items.iter().map(|m| format!("{field}: {}", text(m))));
                    }
                    Value::Null | Value::Bool(false) => {}
                    other => details.push(format!("{field}: {}", text(other))),
                }
            }
        }

        ApiError::Http {
            status,
            message,
            details,
        }
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
