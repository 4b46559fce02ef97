//! In-process [`Transport`] with canned replies, for driving clients and
//! views without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use serde_json::Value;

use crate::transport::{Transport, TransportError};

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when it did not parse.
    pub body: Value,
}

impl RecordedCall {
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(http::header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond {
        status: u16,
        headers: Vec<(HeaderName, HeaderValue)>,
        body: String,
    },
    Fail(String),
}

#[derive(Default)]
struct Script {
    replies: HashMap<String, VecDeque<Reply>>,
    calls: Vec<RecordedCall>,
}

/// Replies are queued per URL path and consumed in order; the last one
/// for a path keeps repeating. Unscripted paths answer 404 with an empty
/// body. Clones share the script and the call log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(
            path,
            Reply::Respond {
                status,
                headers: Vec::new(),
                body: body.into(),
            },
        )
    }

    /// `header.0` must be a lowercase header name.
    pub fn reply_with_header(
        &self,
        path: &str,
        status: u16,
        header: (&'static str, &'static str),
        body: impl Into<String>,
    ) -> &Self {
        self.push(
            path,
            Reply::Respond {
                status,
                headers: vec![(
                    HeaderName::from_static(header.0),
                    HeaderValue::from_static(header.1),
                )],
                body: body.into(),
            },
        )
    }

    /// The request to `path` fails before any response arrives.
    pub fn fail(&self, path: &str, message: &str) -> &Self {
        self.push(path, Reply::Fail(message.to_string()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.path == path)
            .cloned()
            .collect()
    }

    fn push(&self, path: &str, reply: Reply) -> &Self {
        self.lock()
            .replies
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<String>, TransportError> {
        let path = request.uri().path().to_string();
        let mut script = self.lock();
        script.calls.push(RecordedCall {
            method: request.method().clone(),
            path: path.clone(),
            headers: request.headers().clone(),
            body: serde_json::from_slice(request.body()).unwrap_or(Value::Null),
        });

        let reply = match script.replies.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        let (status, headers, body) = match reply {
            Some(Reply::Fail(message)) => return Err(TransportError(message)),
            Some(Reply::Respond {
                status,
                headers,
                body,
            }) => (status, headers, body),
            None => (404, Vec::new(), String::new()),
        };

        let mut response = Response::new(body);
        *response.status_mut() =
            StatusCode::from_u16(status).map_err(|e| TransportError(e.to_string()))?;
        response.headers_mut().extend(headers);
        Ok(response)
    }
}
