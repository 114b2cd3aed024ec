use crate::mcp::contracts::{MAX_KV_KEY_BYTES, MAX_KV_VALUE_BYTES};
use crate::mcp::errors;
use crate::store::{KvStore, StoreError};
use crate::tools::{error_result, ok_result};
use serde_json::{Value, json};

pub fn set(args: &Value) -> Value {
    let key = match parse_key(args.get("key")) {
        Ok(key) => key,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let Some(value) = args.get("value") else {
        return error_result(errors::INVALID_INPUT, "value is required", None);
    };
    let serialized = match serde_json::to_string(value) {
        Ok(serialized) => serialized,
        Err(err) => {
            return error_result(
                errors::INTERNAL_ERROR,
                format!("failed to serialize value: {err}"),
                None,
            );
        }
    };
    if serialized.len() > MAX_KV_VALUE_BYTES {
        return error_result(
            errors::TOO_LARGE,
            format!("serialized value exceeds {MAX_KV_VALUE_BYTES} bytes"),
            None,
        );
    }

    let mut store = match KvStore::open_default() {
        Ok(store) => store,
        Err(err) => return store_error(err),
    };
    match store.set(&key, value.clone()) {
        Ok(created) => ok_result(
            format!("{} {key}", if created { "created" } else { "updated" }),
            json!({"key": key, "created": created}),
        ),
        Err(err) => store_error(err),
    }
}

pub fn get(args: &Value) -> Value {
    let key = match parse_key(args.get("key")) {
        Ok(key) => key,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let store = match KvStore::open_default() {
        Ok(store) => store,
        Err(err) => return store_error(err),
    };

    let Some(entry) = store.get(&key) else {
        return error_result(errors::NOT_FOUND, format!("key not found: {key}"), None);
    };
    let text = match serde_json::to_string(&entry.value) {
        Ok(text) => text,
        Err(err) => {
            return error_result(
                errors::INTERNAL_ERROR,
                format!("failed to serialize value: {err}"),
                None,
            );
        }
    };
    ok_result(
        text,
        json!({
            "key": key,
            "value": entry.value,
            "created_at": entry.created_at,
            "updated_at": entry.updated_at
        }),
    )
}

pub fn delete(args: &Value) -> Value {
    let key = match parse_key(args.get("key")) {
        Ok(key) => key,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    let mut store = match KvStore::open_default() {
        Ok(store) => store,
        Err(err) => return store_error(err),
    };
    match store.delete(&key) {
        Ok(deleted) => ok_result(
            if deleted {
                format!("deleted {key}")
            } else {
                format!("{key} did not exist")
            },
            json!({"key": key, "deleted": deleted}),
        ),
        Err(err) => store_error(err),
    }
}

pub fn list(args: &Value) -> Value {
    let prefix = match args.get("prefix") {
        None => String::new(),
        Some(value) => match value.as_str() {
            Some(prefix) => prefix.to_string(),
            None => return error_result(errors::INVALID_INPUT, "prefix must be a string", None),
        },
    };
    let limit = match args.get("limit") {
        None => usize::MAX,
        Some(value) => match value.as_u64() {
            Some(limit) if limit >= 1 => limit as usize,
            _ => {
                return error_result(
                    errors::INVALID_INPUT,
                    "limit must be a positive integer",
                    None,
                );
            }
        },
    };

    let store = match KvStore::open_default() {
        Ok(store) => store,
        Err(err) => return store_error(err),
    };
    let keys: Vec<&str> = store
        .keys()
        .filter(|key| key.starts_with(&prefix))
        .take(limit)
        .collect();
    ok_result(
        format!("{} key(s)", keys.len()),
        json!({
            "keys": keys,
            "count": keys.len(),
            "total": store.len()
        }),
    )
}

struct ToolError {
    kind: &'static str,
    message: String,
}

fn parse_key(value: Option<&Value>) -> Result<String, ToolError> {
    let Some(key) = value.and_then(Value::as_str) else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "key must be a string".to_string(),
        });
    };
    if key.is_empty() {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "key must not be empty".to_string(),
        });
    }
    if key.len() > MAX_KV_KEY_BYTES {
        return Err(ToolError {
            kind: errors::TOO_LARGE,
            message: format!("key exceeds {MAX_KV_KEY_BYTES} bytes"),
        });
    }
    Ok(key.to_string())
}

fn store_error(err: StoreError) -> Value {
    error_result(errors::INTERNAL_ERROR, err.to_string(), Some("store"))
}
