use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod ai;
mod eval;
mod mcp;
mod store;
mod tools;

#[derive(Parser)]
#[command(name = "mcp-utils")]
#[command(version, about = "Utility toolbox served over MCP stdio")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Evaluate an arithmetic expression
    Calculate {
        /// Expression to evaluate, e.g. "2 + 2 * 3"
        expression: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Convert a value between units
    ConvertUnits {
        value: f64,
        from: String,
        to: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Print the current date and time
    DatetimeNow {
        /// utc, local, or a fixed offset like +09:00
        #[arg(long)]
        timezone: Option<String>,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Parse a date/time from natural language or common formats
    DatetimeParse {
        text: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Convert text between cases
    TextCase {
        text: String,
        /// upper, lower, title, camel, snake, or kebab
        case: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Hash text
    TextHash {
        text: String,
        /// sha1 or sha256
        #[arg(long, default_value = "sha256")]
        algorithm: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Store a JSON value under a key
    KvSet {
        key: String,
        /// JSON value; plain text is stored as a string
        value: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Fetch a stored value
    KvGet {
        key: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored key
    KvDelete {
        key: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// List stored keys
    KvList {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Check whether a string is a plausible email address
    ValidateEmail {
        value: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
    /// Check whether a string is a well-formed URL
    ValidateUrl {
        value: String,
        /// Output JSON structuredContent
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server()
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Calculate { expression, json } => {
            let result = tools::calculate::call(&json!({"expression": expression}));
            print_tool_result(result, json)
        }
        Commands::ConvertUnits {
            value,
            from,
            to,
            json,
        } => {
            let result =
                tools::convert_units::call(&json!({"value": value, "from": from, "to": to}));
            print_tool_result(result, json)
        }
        Commands::DatetimeNow { timezone, json } => {
            let mut map = Map::new();
            if let Some(timezone) = timezone {
                map.insert("timezone".to_string(), json!(timezone));
            }
            let result = tools::datetime::now(&Value::Object(map));
            print_tool_result(result, json)
        }
        Commands::DatetimeParse { text, json } => {
            let result = tools::datetime::parse(&json!({"text": text}));
            print_tool_result(result, json)
        }
        Commands::TextCase { text, case, json } => {
            let result = tools::text::case(&json!({"text": text, "case": case}));
            print_tool_result(result, json)
        }
        Commands::TextHash {
            text,
            algorithm,
            json,
        } => {
            let result = tools::hash::call(&json!({"text": text, "algorithm": algorithm}));
            print_tool_result(result, json)
        }
        Commands::KvSet { key, value, json } => {
            let value: Value = serde_json::from_str(&value).unwrap_or_else(|_| json!(value));
            let result = tools::kv::set(&json!({"key": key, "value": value}));
            print_tool_result(result, json)
        }
        Commands::KvGet { key, json } => {
            let result = tools::kv::get(&json!({"key": key}));
            print_tool_result(result, json)
        }
        Commands::KvDelete { key, json } => {
            let result = tools::kv::delete(&json!({"key": key}));
            print_tool_result(result, json)
        }
        Commands::KvList {
            prefix,
            limit,
            json,
        } => {
            let mut map = Map::new();
            if let Some(prefix) = prefix {
                map.insert("prefix".to_string(), json!(prefix));
            }
            if let Some(limit) = limit {
                map.insert("limit".to_string(), json!(limit));
            }
            let result = tools::kv::list(&Value::Object(map));
            print_tool_result(result, json)
        }
        Commands::ValidateEmail { value, json } => {
            let result = tools::validate::email(&json!({"value": value}));
            print_tool_result(result, json)
        }
        Commands::ValidateUrl { value, json } => {
            let result = tools::validate::url(&json!({"value": value}));
            print_tool_result(result, json)
        }
    }
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    let is_error = result
        .get("isError")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);

    if is_error {
        let message = result
            .get("structuredContent")
            .and_then(|value| value.get("error"))
            .and_then(|value| value.get("message"))
            .and_then(|value| value.as_str())
            .unwrap_or("tool error");
        eprintln!("{message}");
        process::exit(1);
    }

    if json_output {
        let structured = result
            .get("structuredContent")
            .cloned()
            .unwrap_or_else(|| json!({}));
        let output = serde_json::to_string_pretty(&structured)?;
        println!("{output}");
        return Ok(());
    }

    let text = result
        .get("content")
        .and_then(|value| value.as_array())
        .and_then(|arr| arr.first())
        .and_then(|value| value.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or("");
    println!("{text}");
    Ok(())
}

fn run_stdio_server() -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting stdio server");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reader = stdin.lock().lines();
    let mut writer = io::BufWriter::new(stdout.lock());

    for line in reader {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                let response = json!({
                    "jsonrpc": "2.0",
                    "id": Value::Null,
                    "error": {
                        "code": -32700,
                        "message": format!("parse error: {err}")
                    }
                });
                write_response(&mut writer, &response)?;
                continue;
            }
        };

        let method = request.get("method").and_then(|value| value.as_str());
        let id = request.get("id").cloned();
        let response = match (method, id) {
            (Some("initialize"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2025-11-25",
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }
            })),
            (Some("tools/list"), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": mcp::tool_definitions()
                }
            })),
            (Some("tools/call"), Some(id)) => {
                let result = handle_tool_call(&request);
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": result
                }))
            }
            (Some(other), Some(id)) => Some(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": -32601,
                    "message": format!("method not found: {other}")
                }
            })),
            // Notifications and requests without a method are never answered.
            _ => None,
        };

        if let Some(response) = response {
            write_response(&mut writer, &response)?;
        }
    }

    Ok(())
}

fn write_response(writer: &mut impl Write, response: &Value) -> Result<()> {
    let serialized = serde_json::to_string(response).context("failed to serialize response")?;
    writeln!(writer, "{serialized}").context("failed to write response")?;
    writer.flush().context("failed to flush response")
}

fn handle_tool_call(request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(mcp::errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            mcp::errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));
    debug!(tool = name, "tools/call");

    match name {
        mcp::contracts::TOOL_CALCULATE => tools::calculate::call(&args),
        mcp::contracts::TOOL_CONVERT_UNITS => tools::convert_units::call(&args),
        mcp::contracts::TOOL_DATETIME_NOW => tools::datetime::now(&args),
        mcp::contracts::TOOL_DATETIME_PARSE => tools::datetime::parse(&args),
        mcp::contracts::TOOL_DATETIME_FORMAT => tools::datetime::format(&args),
        mcp::contracts::TOOL_DATETIME_DIFF => tools::datetime::diff(&args),
        mcp::contracts::TOOL_DATETIME_ADD => tools::datetime::add(&args),
        mcp::contracts::TOOL_TEXT_CASE => tools::text::case(&args),
        mcp::contracts::TOOL_TEXT_COUNT => tools::text::count(&args),
        mcp::contracts::TOOL_TEXT_ENCODE => tools::codec::encode(&args),
        mcp::contracts::TOOL_TEXT_DECODE => tools::codec::decode(&args),
        mcp::contracts::TOOL_TEXT_HASH => tools::hash::call(&args),
        mcp::contracts::TOOL_REGEX_MATCH => tools::regex_match::call(&args),
        mcp::contracts::TOOL_VALIDATE_EMAIL => tools::validate::email(&args),
        mcp::contracts::TOOL_VALIDATE_URL => tools::validate::url(&args),
        mcp::contracts::TOOL_VALIDATE_PHONE => tools::validate::phone(&args),
        mcp::contracts::TOOL_VALIDATE_JSON => tools::validate::json(&args),
        mcp::contracts::TOOL_KV_SET => tools::kv::set(&args),
        mcp::contracts::TOOL_KV_GET => tools::kv::get(&args),
        mcp::contracts::TOOL_KV_DELETE => tools::kv::delete(&args),
        mcp::contracts::TOOL_KV_LIST => tools::kv::list(&args),
        mcp::contracts::TOOL_AI_CHAT => tools::ai::chat(&args),
        mcp::contracts::TOOL_AI_CLASSIFY => tools::ai::classify(&args),
        mcp::contracts::TOOL_AI_EMBED => tools::ai::embed(&args),
        _ => tools::error_result(
            mcp::errors::INVALID_INPUT,
            format!("tool not implemented: {name}"),
            Some(name),
        ),
    }
}
