use serde_json::json;

pub mod contracts;
pub mod errors;

pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": contracts::TOOL_CALCULATE,
            "description": "Evaluate an arithmetic expression (+ - * / ^, parentheses).",
            "inputSchema": contracts::calculate_schema()
        }),
        json!({
            "name": contracts::TOOL_CONVERT_UNITS,
            "description": "Convert a value between units of length, mass, temperature, duration, or data.",
            "inputSchema": contracts::convert_units_schema()
        }),
        json!({
            "name": contracts::TOOL_DATETIME_NOW,
            "description": "Current date and time in UTC, local time, or a fixed offset.",
            "inputSchema": contracts::datetime_now_schema()
        }),
        json!({
            "name": contracts::TOOL_DATETIME_PARSE,
            "description": "Parse a date/time from natural language or common formats.",
            "inputSchema": contracts::datetime_parse_schema()
        }),
        json!({
            "name": contracts::TOOL_DATETIME_FORMAT,
            "description": "Format a timestamp with a strftime format string.",
            "inputSchema": contracts::datetime_format_schema()
        }),
        json!({
            "name": contracts::TOOL_DATETIME_DIFF,
            "description": "Signed difference between two timestamps.",
            "inputSchema": contracts::datetime_diff_schema()
        }),
        json!({
            "name": contracts::TOOL_DATETIME_ADD,
            "description": "Add or subtract a duration from a timestamp.",
            "inputSchema": contracts::datetime_add_schema()
        }),
        json!({
            "name": contracts::TOOL_TEXT_CASE,
            "description": "Convert text between upper, lower, title, camel, snake, and kebab case.",
            "inputSchema": contracts::text_case_schema()
        }),
        json!({
            "name": contracts::TOOL_TEXT_COUNT,
            "description": "Count characters, bytes, words, and lines in text.",
            "inputSchema": contracts::text_count_schema()
        }),
        json!({
            "name": contracts::TOOL_TEXT_ENCODE,
            "description": "Encode text as base64, URL escaping, or hex.",
            "inputSchema": contracts::text_encode_schema()
        }),
        json!({
            "name": contracts::TOOL_TEXT_DECODE,
            "description": "Decode base64, URL-escaped, or hex text.",
            "inputSchema": contracts::text_decode_schema()
        }),
        json!({
            "name": contracts::TOOL_TEXT_HASH,
            "description": "Hash text with SHA-1 or SHA-256.",
            "inputSchema": contracts::text_hash_schema()
        }),
        json!({
            "name": contracts::TOOL_REGEX_MATCH,
            "description": "Match a regular expression against text.",
            "inputSchema": contracts::regex_match_schema()
        }),
        json!({
            "name": contracts::TOOL_VALIDATE_EMAIL,
            "description": "Check whether a string is a plausible email address.",
            "inputSchema": contracts::validate_email_schema()
        }),
        json!({
            "name": contracts::TOOL_VALIDATE_URL,
            "description": "Check whether a string is a well-formed URL.",
            "inputSchema": contracts::validate_url_schema()
        }),
        json!({
            "name": contracts::TOOL_VALIDATE_PHONE,
            "description": "Check whether a string is a plausible phone number.",
            "inputSchema": contracts::validate_phone_schema()
        }),
        json!({
            "name": contracts::TOOL_VALIDATE_JSON,
            "description": "Check whether a string parses as JSON, optionally of an expected type.",
            "inputSchema": contracts::validate_json_schema()
        }),
        json!({
            "name": contracts::TOOL_KV_SET,
            "description": "Store a JSON value under a key.",
            "inputSchema": contracts::kv_set_schema()
        }),
        json!({
            "name": contracts::TOOL_KV_GET,
            "description": "Fetch the value stored under a key.",
            "inputSchema": contracts::kv_get_schema()
        }),
        json!({
            "name": contracts::TOOL_KV_DELETE,
            "description": "Delete a key. Succeeds whether or not the key existed.",
            "inputSchema": contracts::kv_delete_schema()
        }),
        json!({
            "name": contracts::TOOL_KV_LIST,
            "description": "List stored keys, optionally filtered by prefix.",
            "inputSchema": contracts::kv_list_schema()
        }),
        json!({
            "name": contracts::TOOL_AI_CHAT,
            "description": "Send a prompt to the configured inference service.",
            "inputSchema": contracts::ai_chat_schema()
        }),
        json!({
            "name": contracts::TOOL_AI_CLASSIFY,
            "description": "Classify text into one of the given labels via the inference service.",
            "inputSchema": contracts::ai_classify_schema()
        }),
        json!({
            "name": contracts::TOOL_AI_EMBED,
            "description": "Compute an embedding vector via the inference service.",
            "inputSchema": contracts::ai_embed_schema()
        }),
    ]
}
