//! Reply derivation for the chat endpoint.
//!
//! The endpoint trusts whatever transcript it receives. Bodies are read as
//! untyped JSON so that unknown roles, extra fields or a missing `messages`
//! array degrade to defaults instead of producing an error.

use serde_json::Value;

/// Constant reply served by `GET /chat`.
pub const LIVENESS_REPLY: &str = "This is an example express call";

/// Plain-text banner served by `GET /`.
pub const BANNER: &str = "Express Chat API Server";

/// Extracts the `messages` array from a raw request body.
///
/// Anything other than a JSON object with an array-valued `messages` field
/// yields an empty transcript.
pub fn parse_transcript(body: &[u8]) -> Vec<Value> {
    if body.is_empty() {
        return Vec::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut map)) => match map.remove("messages") {
            Some(Value::Array(messages)) => messages,
            _ => Vec::new(),
        },
        Ok(_) => Vec::new(),
        Err(e) => {
            log::debug!("request body is not JSON, treating as empty transcript: {e}");
            Vec::new()
        }
    }
}

/// Content of the most recent entry whose role is `user`, or empty text.
///
/// String content is returned verbatim, a missing or null content is empty,
/// and any other JSON value is rendered as compact JSON.
pub fn last_user_content(messages: &[Value]) -> String {
    let last_user = messages
        .iter()
        .rev()
        .find(|msg| msg.get("role").and_then(Value::as_str) == Some("user"));

    match last_user.and_then(|msg| msg.get("content")) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Builds the synthetic reply for a received transcript.
pub fn reply_for(messages: &[Value]) -> String {
    format!(
        "Received {} messages. Last user message: \"{}\"",
        messages.len(),
        last_user_content(messages)
    )
}
