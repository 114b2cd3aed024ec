use crate::mcp::contracts::MAX_TEXT_BYTES;
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use serde_json::{Value, json};

pub fn case(args: &Value) -> Value {
    let text = match parse_text(args.get("text")) {
        Ok(text) => text,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let Some(case) = args.get("case").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "case must be a string", None);
    };

    let converted = match case {
        "upper" => text.to_uppercase(),
        "lower" => text.to_lowercase(),
        "title" => title_case(&text),
        "camel" => camel_case(&text),
        "snake" => join_words(&text, "_"),
        "kebab" => join_words(&text, "-"),
        other => {
            return error_result(
                errors::INVALID_INPUT,
                format!("unknown case: {other} (expected upper, lower, title, camel, snake, or kebab)"),
                None,
            );
        }
    };

    ok_result(converted.clone(), json!({"text": converted, "case": case}))
}

pub fn count(args: &Value) -> Value {
    let text = match parse_text(args.get("text")) {
        Ok(text) => text,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    let chars = text.chars().count();
    let bytes = text.len();
    let words = text.split_whitespace().count();
    let lines = text.lines().count();

    ok_result(
        format!("{chars} chars, {bytes} bytes, {words} words, {lines} lines"),
        json!({
            "chars": chars,
            "bytes": bytes,
            "words": words,
            "lines": lines
        }),
    )
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_text(value: Option<&Value>) -> Result<String, ToolError> {
    let Some(value) = value else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "text is required".to_string(),
        });
    };
    let Some(text) = value.as_str() else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "text must be a string".to_string(),
        });
    };
    if text.len() > MAX_TEXT_BYTES {
        return Err(ToolError {
            kind: errors::TOO_LARGE,
            message: format!("text exceeds {MAX_TEXT_BYTES} bytes"),
        });
    }
    Ok(text.to_string())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn camel_case(text: &str) -> String {
    let mut out = String::new();
    for (index, word) in split_words(text).into_iter().enumerate() {
        if index == 0 {
            out.push_str(&word);
        } else {
            out.push_str(&capitalize(&word));
        }
    }
    out
}

fn join_words(text: &str, separator: &str) -> String {
    split_words(text).join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Splits on non-alphanumeric separators and on lower-to-upper camel
/// boundaries; words come back lowercased.
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;
    for ch in text.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if ch.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
        previous_lower = ch.is_lowercase() || ch.is_numeric();
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
