use crate::mcp::contracts::MAX_TEXT_BYTES;
use crate::mcp::errors;
use crate::tools::{error_result, ok_result};
use serde_json::{Value, json};
use sha1::Sha1;
use sha2::{Digest, Sha256};

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
    let Some(algorithm) = args.get("algorithm").and_then(Value::as_str) else {
        return error_result(errors::INVALID_INPUT, "algorithm must be a string", None);
    };

    let digest = match algorithm {
        "sha1" => {
            let mut hasher = Sha1::new();
            hasher.update(text.as_bytes());
            hex::encode(hasher.finalize())
        }
        "sha256" => {
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hex::encode(hasher.finalize())
        }
        other => {
            return error_result(
                errors::INVALID_INPUT,
                format!("unknown algorithm: {other} (expected sha1 or sha256)"),
                None,
            );
        }
    };

    ok_result(
        digest.clone(),
        json!({"digest": digest, "algorithm": algorithm}),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn digest_of(text: &str, algorithm: &str) -> String {
        let result = call(&json!({"text": text, "algorithm": algorithm}));
        assert_eq!(result["isError"], json!(false));
        result["structuredContent"]["digest"]
            .as_str()
            .expect("digest")
            .to_string()
    }

    #[test]
    fn sha256_known_vectors() {
        assert_eq!(
            digest_of("abc", "sha256"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            digest_of("", "sha256"),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha1_known_vectors() {
        assert_eq!(
            digest_of("abc", "sha1"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest_of("", "sha1"),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let result = call(&json!({"text": "abc", "algorithm": "md5"}));
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["structuredContent"]["error"]["kind"],
            json!(errors::INVALID_INPUT)
        );
    }
}
