use serde_json::json;

pub mod ai;
pub mod calculate;
pub mod codec;
pub mod convert_units;
pub mod datetime;
pub mod hash;
pub mod kv;
pub mod regex_match;
pub mod text;
pub mod validate;

pub fn ok_result(text: impl Into<String>, structured: serde_json::Value) -> serde_json::Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "structuredContent": structured,
        "isError": false
    })
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> serde_json::Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}
