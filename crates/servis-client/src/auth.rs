use http::HeaderMap;
use http::header::AUTHORIZATION;
use serde_json::Value;
use servis_core::Record;

const MIN_TOKEN_LEN: usize = 10;

/// Find a bearer token in a login response.
///
/// Tried in order: the `Authorization` header (the second word when it
/// has two, e.g. `Bearer xyz`), a bare non-JSON body, then a depth-first
/// search of the JSON body for a key containing "token" (any case) whose
/// value is a string. Body candidates need at least ten characters.
///
/// The parsed body is returned alongside so callers can show it; a
/// non-object body yields an empty record.
pub fn extract_token(headers: &HeaderMap, body: &str) -> (Option<String>, Record) {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let record = match &parsed {
        Some(Value::Object(obj)) => obj.clone(),
        _ => Record::new(),
    };

    if let Some(token) = header_token(headers) {
        return (Some(token), record);
    }

    let token = match &parsed {
        None => bare(body),
        Some(Value::String(s)) => bare(s),
        Some(value) => find_token(value),
    };
    (token, record)
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let words: Vec<&str> = raw.split_whitespace().collect();
    match words.as_slice() {
        [] => None,
        [_, token] => Some(token.to_string()),
        _ => Some(raw.to_string()),
    }
}

fn bare(text: &str) -> Option<String> {
    Some(text.trim())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
}

fn find_token(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.iter().find_map(|(key, inner)| match inner {
            Value::String(s) if key.to_lowercase().contains("token") && s.len() >= MIN_TOKEN_LEN => {
                Some(s.clone())
            }
            _ => find_token(inner),
        }),
        Value::Array(items) => items.iter().find_map(find_token),
        _ => None,
    }
}
