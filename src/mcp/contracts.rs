#![allow(dead_code)]

use serde_json::json;

pub const TOOL_CALCULATE: &str = "calculate";
pub const TOOL_CONVERT_UNITS: &str = "convert_units";
pub const TOOL_DATETIME_NOW: &str = "datetime_now";
pub const TOOL_DATETIME_PARSE: &str = "datetime_parse";
pub const TOOL_DATETIME_FORMAT: &str = "datetime_format";
pub const TOOL_DATETIME_DIFF: &str = "datetime_diff";
pub const TOOL_DATETIME_ADD: &str = "datetime_add";
pub const TOOL_TEXT_CASE: &str = "text_case";
pub const TOOL_TEXT_COUNT: &str = "text_count";
pub const TOOL_TEXT_ENCODE: &str = "text_encode";
pub const TOOL_TEXT_DECODE: &str = "text_decode";
pub const TOOL_TEXT_HASH: &str = "text_hash";
pub const TOOL_REGEX_MATCH: &str = "regex_match";
pub const TOOL_VALIDATE_EMAIL: &str = "validate_email";
pub const TOOL_VALIDATE_URL: &str = "validate_url";
pub const TOOL_VALIDATE_PHONE: &str = "validate_phone";
pub const TOOL_VALIDATE_JSON: &str = "validate_json";
pub const TOOL_KV_SET: &str = "kv_set";
pub const TOOL_KV_GET: &str = "kv_get";
pub const TOOL_KV_DELETE: &str = "kv_delete";
pub const TOOL_KV_LIST: &str = "kv_list";
pub const TOOL_AI_CHAT: &str = "ai_chat";
pub const TOOL_AI_CLASSIFY: &str = "ai_classify";
pub const TOOL_AI_EMBED: &str = "ai_embed";

pub const MAX_EXPRESSION_CHARS: usize = 4096;
pub const MAX_TEXT_BYTES: usize = 1024 * 1024;
pub const MAX_PATTERN_CHARS: usize = 512;
pub const MAX_REGEX_MATCHES: usize = 100;
pub const MAX_KV_KEY_BYTES: usize = 256;
pub const MAX_KV_VALUE_BYTES: usize = 256 * 1024;

pub fn calculate_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "expression": { "type": "string" }
        },
        "required": ["expression"],
        "additionalProperties": false
    })
}

pub fn convert_units_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "value": { "type": "number" },
            "from": { "type": "string" },
            "to": { "type": "string" }
        },
        "required": ["value", "from", "to"],
        "additionalProperties": false
    })
}

pub fn datetime_now_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "timezone": {
                "type": "string",
                "description": "utc (default), local, or a fixed offset like +09:00"
            }
        },
        "additionalProperties": false
    })
}

pub fn datetime_parse_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" }
        },
        "required": ["text"],
        "additionalProperties": false
    })
}

pub fn datetime_format_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "timestamp": {
                "type": ["number", "string"],
                "description": "unix seconds, RFC 3339, YYYY-MM-DD HH:MM:SS, or YYYY-MM-DD"
            },
            "format": { "type": "string", "description": "strftime format string" }
        },
        "required": ["timestamp", "format"],
        "additionalProperties": false
    })
}

pub fn datetime_diff_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "from": { "type": ["number", "string"] },
            "to": { "type": ["number", "string"] },
            "unit": {
                "type": "string",
                "enum": ["seconds", "minutes", "hours", "days", "weeks"]
            }
        },
        "required": ["from", "to"],
        "additionalProperties": false
    })
}

pub fn datetime_add_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "timestamp": { "type": ["number", "string"] },
            "amount": { "type": "integer" },
            "unit": {
                "type": "string",
                "enum": ["seconds", "minutes", "hours", "days", "weeks", "months", "years"]
            }
        },
        "required": ["timestamp", "amount", "unit"],
        "additionalProperties": false
    })
}

pub fn text_case_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "case": {
                "type": "string",
                "enum": ["upper", "lower", "title", "camel", "snake", "kebab"]
            }
        },
        "required": ["text", "case"],
        "additionalProperties": false
    })
}

pub fn text_count_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" }
        },
        "required": ["text"],
        "additionalProperties": false
    })
}

pub fn text_encode_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "codec": { "type": "string", "enum": ["base64", "url", "hex"] }
        },
        "required": ["text", "codec"],
        "additionalProperties": false
    })
}

pub fn text_decode_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "codec": { "type": "string", "enum": ["base64", "url", "hex"] }
        },
        "required": ["text", "codec"],
        "additionalProperties": false
    })
}

pub fn text_hash_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "algorithm": { "type": "string", "enum": ["sha1", "sha256"] }
        },
        "required": ["text", "algorithm"],
        "additionalProperties": false
    })
}

pub fn regex_match_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "pattern": { "type": "string" },
            "case_insensitive": { "type": "boolean" }
        },
        "required": ["text", "pattern"],
        "additionalProperties": false
    })
}

pub fn validate_email_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "value": { "type": "string" }
        },
        "required": ["value"],
        "additionalProperties": false
    })
}

pub fn validate_url_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "value": { "type": "string" }
        },
        "required": ["value"],
        "additionalProperties": false
    })
}

pub fn validate_phone_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "value": { "type": "string" }
        },
        "required": ["value"],
        "additionalProperties": false
    })
}

pub fn validate_json_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "value": { "type": "string" },
            "expected_type": {
                "type": "string",
                "enum": ["object", "array", "string", "number", "boolean", "null"]
            }
        },
        "required": ["value"],
        "additionalProperties": false
    })
}

pub fn kv_set_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "key": { "type": "string" },
            "value": {}
        },
        "required": ["key", "value"],
        "additionalProperties": false
    })
}

pub fn kv_get_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "key": { "type": "string" }
        },
        "required": ["key"],
        "additionalProperties": false
    })
}

pub fn kv_delete_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "key": { "type": "string" }
        },
        "required": ["key"],
        "additionalProperties": false
    })
}

pub fn kv_list_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "prefix": { "type": "string" },
            "limit": { "type": "integer", "minimum": 1 }
        },
        "additionalProperties": false
    })
}

pub fn ai_chat_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "prompt": { "type": "string" },
            "model": { "type": "string" },
            "system": { "type": "string" },
            "max_tokens": { "type": "integer", "minimum": 1 }
        },
        "required": ["prompt"],
        "additionalProperties": false
    })
}

pub fn ai_classify_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "labels": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            }
        },
        "required": ["text", "labels"],
        "additionalProperties": false
    })
}

pub fn ai_embed_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": { "type": "string" },
            "model": { "type": "string" }
        },
        "required": ["text"],
        "additionalProperties": false
    })
}
