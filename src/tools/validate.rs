use crate::mcp::contracts::MAX_TEXT_BYTES;
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use regex::Regex;
use serde_json::{Map, Value, json};
use std::sync::OnceLock;
use url::Url;

pub fn email(args: &Value) -> Value {
    let value = match parse_value(args) {
        Ok(value) => value,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let mut structured = Map::new();
    structured.insert("value".to_string(), json!(value));
    report(structured, check_email(&value))
}

pub fn url(args: &Value) -> Value {
    let value = match parse_value(args) {
        Ok(value) => value,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let mut structured = Map::new();
    structured.insert("value".to_string(), json!(value));
    match Url::parse(&value) {
        Ok(parsed) => {
            structured.insert("scheme".to_string(), json!(parsed.scheme()));
            if let Some(host) = parsed.host_str() {
                structured.insert("host".to_string(), json!(host));
            }
            if let Some(port) = parsed.port() {
                structured.insert("port".to_string(), json!(port));
            }
            structured.insert("path".to_string(), json!(parsed.path()));
            report(structured, None)
        }
        Err(err) => report(structured, Some(err.to_string())),
    }
}

pub fn phone(args: &Value) -> Value {
    let value = match parse_value(args) {
        Ok(value) => value,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let mut structured = Map::new();
    structured.insert("value".to_string(), json!(value));
    match check_phone(&value) {
        Ok(normalized) => {
            structured.insert("normalized".to_string(), json!(normalized));
            report(structured, None)
        }
        Err(reason) => report(structured, Some(reason)),
    }
}

pub fn json(args: &Value) -> Value {
    let value = match parse_value(args) {
        Ok(value) => value,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let expected = match args.get("expected_type") {
        None => None,
        Some(value) => match value.as_str() {
            Some(expected)
                if matches!(
                    expected,
                    "object" | "array" | "string" | "number" | "boolean" | "null"
                ) =>
            {
                Some(expected.to_string())
            }
            _ => {
                return error_result(
                    errors::INVALID_INPUT,
                    "expected_type must be one of object, array, string, number, boolean, null",
                    None,
                );
            }
        },
    };

    let mut structured = Map::new();
    match serde_json::from_str::<Value>(&value) {
        Err(err) => report(structured, Some(err.to_string())),
        Ok(parsed) => {
            let actual = type_name(&parsed);
            structured.insert("parsed_type".to_string(), json!(actual));
            let reason = match expected {
                Some(expected) if expected != actual => {
                    Some(format!("expected {expected}, found {actual}"))
                }
                _ => None,
            };
            report(structured, reason)
        }
    }
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_value(args: &Value) -> Result<String, ToolError> {
    let Some(value) = args.get("value").and_then(Value::as_str) else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "value must be a string".to_string(),
        });
    };
    if value.len() > MAX_TEXT_BYTES {
        return Err(ToolError {
            kind: errors::TOO_LARGE,
            message: format!("value exceeds {MAX_TEXT_BYTES} bytes"),
        });
    }
    Ok(value.to_string())
}

// An invalid value is an answer, not a tool failure: the envelope stays
// isError: false and carries {"valid": false, "reason": ...}.
fn report(mut structured: Map<String, Value>, reason: Option<String>) -> Value {
    let text = match &reason {
        None => "valid".to_string(),
        Some(reason) => format!("invalid: {reason}"),
    };
    structured.insert("valid".to_string(), json!(reason.is_none()));
    if let Some(reason) = reason {
        structured.insert("reason".to_string(), json!(reason));
    }
    ok_result(text, Value::Object(structured))
}

static EMAIL_CHARSET: OnceLock<Regex> = OnceLock::new();

fn email_charset() -> &'static Regex {
    EMAIL_CHARSET.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+$").expect("charset pattern compiles")
    })
}

fn check_email(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("empty".to_string());
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Some("missing @".to_string());
    };
    if domain.contains('@') {
        return Some("more than one @".to_string());
    }
    if local.is_empty() {
        return Some("missing local part".to_string());
    }
    if local.len() > 64 {
        return Some("local part longer than 64 bytes".to_string());
    }
    if domain.is_empty() {
        return Some("missing domain".to_string());
    }
    if domain.len() > 253 {
        return Some("domain longer than 253 bytes".to_string());
    }
    if !email_charset().is_match(value) {
        return Some("contains invalid characters".to_string());
    }
    if local.starts_with('.') || local.ends_with('.') {
        return Some("local part starts or ends with a dot".to_string());
    }
    if value.contains("..") {
        return Some("consecutive dots".to_string());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Some("missing top-level domain".to_string());
    }
    for label in &labels {
        if label.is_empty() {
            return Some("empty domain label".to_string());
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Some("domain label starts or ends with a hyphen".to_string());
        }
    }
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Some("invalid top-level domain".to_string());
    }
    None
}

fn check_phone(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty".to_string());
    }
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let mut digits = String::new();
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return Err(format!("invalid character: {ch:?}")),
        }
    }
    if digits.len() < 7 {
        return Err("fewer than 7 digits".to_string());
    }
    if digits.len() > 15 {
        return Err("more than 15 digits".to_string());
    }
    Ok(if plus { format!("+{digits}") } else { digits })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
