use crate::mcp::contracts::MAX_TEXT_BYTES;
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

pub fn encode(args: &Value) -> Value {
    let (text, codec) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    let encoded = match codec.as_str() {
        "base64" => STANDARD.encode(text.as_bytes()),
        "url" => urlencoding::encode(&text).into_owned(),
        "hex" => hex::encode(text.as_bytes()),
        other => {
            return error_result(
                errors::INVALID_INPUT,
                format!("unknown codec: {other} (expected base64, url, or hex)"),
                None,
            );
        }
    };

    ok_result(encoded.clone(), json!({"text": encoded, "codec": codec}))
}

pub fn decode(args: &Value) -> Value {
    let (text, codec) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    let decoded = match codec.as_str() {
        "base64" => STANDARD
            .decode(text.as_bytes())
            .map_err(|err| format!("invalid base64: {err}"))
            .and_then(utf8_string),
        "url" => urlencoding::decode(&text)
            .map(|decoded| decoded.into_owned())
            .map_err(|err| format!("invalid URL escape: {err}")),
        "hex" => hex::decode(&text)
            .map_err(|err| format!("invalid hex: {err}"))
            .and_then(utf8_string),
        other => {
            return error_result(
                errors::INVALID_INPUT,
                format!("unknown codec: {other} (expected base64, url, or hex)"),
                None,
            );
        }
    };

    match decoded {
        Ok(decoded) => ok_result(decoded.clone(), json!({"text": decoded, "codec": codec})),
        Err(message) => error_result(errors::INVALID_INPUT, message, None),
    }
}

fn utf8_string(bytes: Vec<u8>) -> Result<String, String> {
    String::from_utf8(bytes).map_err(|_| "decoded bytes are not valid UTF-8".to_string())
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_args(args: &Value) -> Result<(String, String), ToolError> {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
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
    let Some(codec) = args.get("codec").and_then(Value::as_str) else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "codec must be a string".to_string(),
        });
    };
    Ok((text.to_string(), codec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(result: &Value) -> String {
        assert_eq!(result["isError"], json!(false), "{result}");
        result["structuredContent"]["text"]
            .as_str()
            .expect("string result")
            .to_string()
    }

    #[test]
    fn base64_round_trip() {
        let encoded = text_of(&encode(&json!({"text": "hello, world", "codec": "base64"})));
        assert_eq!(encoded, "aGVsbG8sIHdvcmxk");
        let decoded = text_of(&decode(&json!({"text": encoded, "codec": "base64"})));
        assert_eq!(decoded, "hello, world");
    }

    #[test]
    fn url_escaping() {
        let encoded = text_of(&encode(&json!({"text": "a b&c=d", "codec": "url"})));
        assert_eq!(encoded, "a%20b%26c%3Dd");
        let decoded = text_of(&decode(&json!({"text": "a%20b%26c%3Dd", "codec": "url"})));
        assert_eq!(decoded, "a b&c=d");
    }

    #[test]
    fn hex_encoding() {
        let encoded = text_of(&encode(&json!({"text": "abc", "codec": "hex"})));
        assert_eq!(encoded, "616263");
        let decoded = text_of(&decode(&json!({"text": "616263", "codec": "hex"})));
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result = decode(&json!({"text": "not base64!!!", "codec": "base64"}));
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INVALID_INPUT)
        );
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        // 0xff is never valid UTF-8.
        let result = decode(&json!({"text": "ff", "codec": "hex"}));
        assert_eq!(result["isError"], json!(true));
    }

    #[test]
    fn unknown_codec_is_rejected() {
        let result = encode(&json!({"text": "x", "codec": "rot13"}));
        assert_eq!(result["isError"], json!(true));
    }
}
