use crate::mcp::contracts::{MAX_PATTERN_CHARS, MAX_REGEX_MATCHES, MAX_TEXT_BYTES};
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use regex::RegexBuilder;
use serde_json::{Value, json};

pub fn call(args: &Value) -> Value {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "text must be a string", None);
    };
    if text.len() > MAX_TEXT_BYTES {
        return error_result(
            errors::TOO_LARGE,
            format!("text exceeds {MAX_TEXT_BYTES} bytes"),
            None,
        );
    }
    let Some(pattern) = args.get("pattern").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "pattern must be a string", None);
    };
    if pattern.chars().count() > MAX_PATTERN_CHARS {
        return error_result(
            errors::TOO_LARGE,
            format!("pattern exceeds {MAX_PATTERN_CHARS} characters"),
            None,
        );
    }
    let case_insensitive = args
        .get("case_insensitive")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let regex = match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
    {
        Ok(regex) => regex,
        Err(err) => {
            return error_result(
                errors::INVALID_INPUT,
                format!("invalid pattern: {err}"),
                None,
            );
        }
    };

    let mut count = 0usize;
    let mut matches = Vec::new();
    for found in regex.find_iter(text) {
        count += 1;
        if matches.len() < MAX_REGEX_MATCHES {
            matches.push(json!({
                "start": found.start(),
                "end": found.end(),
                "text": found.as_str()
            }));
        }
    }

    ok_result(
        format!("{count} match(es)"),
        json!({
            "is_match": count > 0,
            "count": count,
            "matches": matches,
            "truncated": count > MAX_REGEX_MATCHES
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_matches_with_spans() {
        let result = call(&json!({"text": "cat bat hat", "pattern": r"\w?at"}));
        let structured = &result["structuredContent"];
        assert_eq!(structured["is_match"], json!(true));
        assert_eq!(structured["count"], json!(3));
        assert_eq!(structured["matches"][0]["start"], json!(0));
        assert_eq!(structured["matches"][0]["end"], json!(3));
        assert_eq!(structured["matches"][2]["text"], json!("hat"));
    }

    #[test]
    fn reports_no_match() {
        let result = call(&json!({"text": "dog", "pattern": "cat"}));
        let structured = &result["structuredContent"];
        assert_eq!(structured["is_match"], json!(false));
        assert_eq!(structured["count"], json!(0));
    }

    #[test]
    fn case_insensitive_flag() {
        let sensitive = call(&json!({"text": "HELLO", "pattern": "hello"}));
        assert_eq!(sensitive["structuredContent"]["is_match"], json!(false));

        let insensitive = call(&json!({
            "text": "HELLO",
            "pattern": "hello",
            "case_insensitive": true
        }));
        assert_eq!(insensitive["structuredContent"]["is_match"], json!(true));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let result = call(&json!({"text": "x", "pattern": "("}));
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INVALID_INPUT)
        );
    }

    #[test]
    fn match_list_is_truncated() {
        let text = "a".repeat(MAX_REGEX_MATCHES + 10);
        let result = call(&json!({"text": text, "pattern": "a"}));
        let structured = &result["structuredContent"];
        assert_eq!(structured["count"], json!(MAX_REGEX_MATCHES + 10));
        assert_eq!(
            structured["matches"].as_array().expect("array").len(),
            MAX_REGEX_MATCHES
        );
        assert_eq!(structured["truncated"], json!(true));
    }
}
