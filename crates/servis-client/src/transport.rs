use std::time::Duration;

use http::{Request, Response};

/// No response was received at all: DNS failure, refused connection,
/// timeout, or a body that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one HTTP request and hands back the status, headers and raw text
/// body. Non-2xx statuses are responses, not errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<String>, TransportError>;
}

/// Blocking transport backed by a shared `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<String>, TransportError> {
        let response = self
            .agent
            .run(request)
            .map_err(|e| TransportError(e.to_string()))?;
        let (parts, mut body) = response.into_parts();
        let text = body
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(Response::from_parts(parts, text))
    }
}
