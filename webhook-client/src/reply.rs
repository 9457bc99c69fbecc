//! Reply extraction for agent webhook responses.
//!
//! The agent workflow has changed its response shape several times. Every
//! historical shape is still accepted: the payload may be wrapped in an array,
//! the reply may live under one of several field names, and string replies are
//! sometimes JSON-encoded twice.

use serde_json::Value;
use tracing::debug;

/// Reply text and widgets pulled out of an agent response
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub text: String,
    pub widgets: Vec<Value>,
}

type Extractor = fn(&Value) -> Option<&str>;

/// Reply fields in precedence order; the first present one wins.
pub const REPLY_EXTRACTORS: &[(&str, Extractor)] = &[
    ("assistant_reply", |v| string_at(v, &["assistant_reply"])),
    ("output.Response", |v| string_at(v, &["output", "Response"])),
    ("output.summary", |v| string_at(v, &["output", "summary"])),
    ("output", |v| string_at(v, &["output"])),
    ("summary", |v| string_at(v, &["summary"])),
    ("message", |v| string_at(v, &["message"])),
    ("answer", |v| string_at(v, &["answer"])),
];

fn string_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
}

/// Unwrap an array-wrapped payload to its first element
pub fn unwrap_payload(body: &Value) -> &Value {
    match body {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    }
}

/// Pick the reply text out of an unwrapped payload, before de-escaping
pub fn select_reply(result: &Value) -> String {
    match result {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => match REPLY_EXTRACTORS
            .iter()
            .find_map(|(field, extract)| extract(other).map(|text| (*field, text)))
        {
            Some((field, text)) => {
                debug!(field, "Reply field matched");
                text.to_owned()
            }
            None => {
                debug!("No reply field matched; using the serialized payload");
                other.to_string()
            }
        },
    }
}

/// Extract the normalized reply and widgets from a raw webhook body
pub fn extract_reply(body: &Value) -> AgentReply {
    let result = unwrap_payload(body);

    let widgets = result
        .get("widgets")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    AgentReply {
        text: decode_reply(&select_reply(result)),
        widgets,
    }
}

/// Undo double JSON encoding of a string reply.
///
/// A reply that starts and ends with a double quote is decoded as a JSON
/// string. If that fails the quotes are stripped and the common escapes are
/// replaced by hand. Never fails.
pub fn decode_reply(reply: &str) -> String {
    if reply.len() < 2 || !reply.starts_with('"') || !reply.ends_with('"') {
        return reply.to_string();
    }

    match serde_json::from_str::<String>(reply) {
        Ok(decoded) => decoded,
        Err(_) => unescape_common(&reply[1..reply.len() - 1]),
    }
}

fn unescape_common(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
