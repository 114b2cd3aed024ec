use crate::ai::{AiClient, AiError};
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use serde_json::{Map, Value, json};

pub fn chat(args: &Value) -> Value {
    let Some(prompt) = args.get("prompt").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "prompt must be a string", None);
    };
    if prompt.trim().is_empty() {
        return error_result(errors::INVALID_INPUT, "prompt must not be empty", None);
    }

    let mut body = Map::new();
    body.insert("prompt".to_string(), json!(prompt));
    if let Err(err) = copy_optional_str(args, "model", &mut body) {
        return error_result(err.kind, err.message, None);
    }
    if let Err(err) = copy_optional_str(args, "system", &mut body) {
        return error_result(err.kind, err.message, None);
    }
    if let Some(value) = args.get("max_tokens") {
        match value.as_u64() {
            Some(max_tokens) if max_tokens >= 1 => {
                body.insert("max_tokens".to_string(), json!(max_tokens));
            }
            _ => {
                return error_result(
                    errors::INVALID_INPUT,
                    "max_tokens must be a positive integer",
                    None,
                );
            }
        }
    }

    let response = match forward("chat", &Value::Object(body)) {
        Ok(response) => response,
        Err(result) => return result,
    };
    let Some(output) = response.body.get("output").and_then(Value::as_str) else {
        return error_result(
            errors::UPSTREAM_ERROR,
            "inference response is missing output",
            Some("chat"),
        );
    };
    ok_result(
        output,
        json!({"output": output, "cached": response.cached}),
    )
}

pub fn classify(args: &Value) -> Value {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "text must be a string", None);
    };
    let Some(labels) = args.get("labels").and_then(Value::as_array) else {
        return error_result(errors::INVALID_INPUT, "labels must be an array", None);
    };
    let mut label_names = Vec::with_capacity(labels.len());
    for label in labels {
        match label.as_str() {
            Some(name) if !name.trim().is_empty() => label_names.push(name),
            _ => {
                return error_result(
                    errors::INVALID_INPUT,
                    "labels must be non-empty strings",
                    None,
                );
            }
        }
    }
    if label_names.is_empty() {
        return error_result(errors::INVALID_INPUT, "labels must not be empty", None);
    }

    let body = json!({"text": text, "labels": label_names});
    let response = match forward("classify", &body) {
        Ok(response) => response,
        Err(result) => return result,
    };
    let Some(label) = response.body.get("label").and_then(Value::as_str) else {
        return error_result(
            errors::UPSTREAM_ERROR,
            "inference response is missing label",
            Some("classify"),
        );
    };
    let confidence = response.body.get("confidence").and_then(Value::as_f64);
    let text_out = match confidence {
        Some(confidence) => format!("{label} ({confidence:.3})"),
        None => label.to_string(),
    };
    ok_result(
        text_out,
        json!({
            "label": label,
            "confidence": confidence,
            "cached": response.cached
        }),
    )
}

pub fn embed(args: &Value) -> Value {
    let Some(text) = args.get("text").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "text must be a string", None);
    };

    let mut body = Map::new();
    body.insert("text".to_string(), json!(text));
    if let Err(err) = copy_optional_str(args, "model", &mut body) {
        return error_result(err.kind, err.message, None);
    }

    let response = match forward("embed", &Value::Object(body)) {
        Ok(response) => response,
        Err(result) => return result,
    };
    let Some(embedding) = response.body.get("embedding").and_then(Value::as_array) else {
        return error_result(
            errors::UPSTREAM_ERROR,
            "inference response is missing embedding",
            Some("embed"),
        );
    };
    let dimensions = embedding.len();
    ok_result(
        format!("embedding with {dimensions} dimensions"),
        json!({
            "embedding": embedding,
            "dimensions": dimensions,
            "cached": response.cached
        }),
    )
}

fn forward(endpoint: &str, body: &Value) -> Result<crate::ai::AiResponse, Value> {
    let client = AiClient::from_env().map_err(ai_error)?;
    client.post(endpoint, body).map_err(ai_error)
}

fn ai_error(err: AiError) -> Value {
    error_result(err.kind, err.message, Some("inference"))
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn copy_optional_str(
    args: &Value,
    field: &str,
    body: &mut Map<String, Value>,
) -> Result<(), ToolError> {
    let Some(value) = args.get(field) else {
        return Ok(());
    };
    let Some(text) = value.as_str() else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: format!("{field} must be a string"),
        });
    };
    body.insert(field.to_string(), json!(text));
    Ok(())
}
