use crate::mcp::errors;
use reqwest::blocking::Client;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const AI_URL_ENV: &str = "MCP_UTILS_AI_URL";
pub const AI_KEY_ENV: &str = "MCP_UTILS_AI_KEY";
pub const CACHE_DIR_ENV: &str = "MCP_UTILS_CACHE_DIR";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub struct AiError {
    pub kind: &'static str,
    pub message: String,
}

impl AiError {
    fn unconfigured() -> Self {
        Self {
            kind: errors::UNCONFIGURED,
            message: format!("{AI_URL_ENV} is not set"),
        }
    }

    fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: errors::UPSTREAM_ERROR,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: errors::INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AiError {}

pub struct AiResponse {
    pub body: Value,
    pub cached: bool,
}

/// Blocking client for the external inference service. Responses are cached
/// on disk keyed by a digest of the request, so repeated identical calls do
/// not leave the machine.
pub struct AiClient {
    base_url: String,
    api_key: Option<String>,
    cache_dir: PathBuf,
    http: Client,
}

impl AiClient {
    pub fn from_env() -> Result<Self, AiError> {
        let Ok(base_url) = env::var(AI_URL_ENV) else {
            return Err(AiError::unconfigured());
        };
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AiError::unconfigured());
        }
        let api_key = env::var(AI_KEY_ENV).ok().filter(|key| !key.is_empty());
        let cache_dir = env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| crate::store::home_dir().join(".mcp-utils").join("cache"));
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AiError::internal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            base_url,
            api_key,
            cache_dir,
            http,
        })
    }

    pub fn post(&self, endpoint: &str, body: &Value) -> Result<AiResponse, AiError> {
        let cache_path = self.cache_path(endpoint, body);
        if let Some(path) = &cache_path
            && let Some(cached) = read_cache(path)
        {
            debug!(endpoint, "inference cache hit");
            return Ok(AiResponse {
                body: cached,
                cached: true,
            });
        }

        let url = format!("{}/{endpoint}", self.base_url);
        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(endpoint, "forwarding to inference service");
        let response = request
            .send()
            .map_err(|err| AiError::upstream(format!("request to {url} failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            let detail = detail.trim();
            let message = if detail.is_empty() {
                format!("{endpoint} returned {status}")
            } else {
                format!("{endpoint} returned {status}: {}", truncate(detail, 200))
            };
            return Err(AiError::upstream(message));
        }

        let body: Value = response
            .json()
            .map_err(|err| AiError::upstream(format!("invalid JSON from {endpoint}: {err}")))?;
        if let Some(path) = &cache_path
            && let Err(err) = write_cache(path, &body)
        {
            warn!(endpoint, error = %err, "failed to write inference cache");
        }
        Ok(AiResponse {
            body,
            cached: false,
        })
    }

    fn cache_path(&self, endpoint: &str, body: &Value) -> Option<PathBuf> {
        let payload =
            serde_json::to_string(&serde_json::json!({"endpoint": endpoint, "body": body})).ok()?;
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        let digest = hex::encode(hasher.finalize());
        Some(self.cache_dir.join(format!("{digest}.json")))
    }
}

fn read_cache(path: &Path) -> Option<Value> {
    let bytes = fs::read(path).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn write_cache(path: &Path, body: &Value) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec(body).map_err(io::Error::other)?;
    fs::write(path, bytes)
}

fn truncate(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
