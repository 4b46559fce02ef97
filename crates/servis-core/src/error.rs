use std::fmt;

/// Failure raised while extracting a payload from a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The envelope reported `isSuccessful: false`. Carries the joined
    /// `errorMessages`.
    LogicalFailure(String),
    /// The body was not JSON where structured JSON was required.
    MalformedPayload(String),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::LogicalFailure(msg) => write!(f, "{msg}"),
            NormalizeError::MalformedPayload(msg) => write!(f, "malformed payload: {msg}"),
        }
    }
}

impl std::error::Error for NormalizeError {}
