use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<std::process::ChildStdout>,
    next_id: u64,
}

impl Server {
    fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_mcp-utils"))
            .args(["serve", "--stdio"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take().expect("stdin available");
        let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
        Ok(Self {
            child,
            stdin,
            stdout,
            next_id: 1,
        })
    }

    fn call(
        &mut self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let id = self.next_id;
        self.next_id += 1;
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        });
        writeln!(self.stdin, "{}", serde_json::to_string(&request)?)?;
        self.stdin.flush()?;

        let mut line = String::new();
        self.stdout.read_line(&mut line)?;
        let response: serde_json::Value = serde_json::from_str(line.trim())?;
        assert_eq!(response["id"], serde_json::json!(id));
        Ok(response["result"].clone())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

fn validity(result: &serde_json::Value) -> bool {
    assert_eq!(result["isError"], serde_json::json!(false), "{result}");
    result["structuredContent"]["valid"]
        .as_bool()
        .expect("valid flag")
}

#[test]
fn verdicts_are_success_envelopes() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let good = server.call(
        "validate_email",
        serde_json::json!({"value": "user@example.com"}),
    )?;
    assert!(validity(&good));

    // A failed check is still a successful tool call.
    let bad = server.call(
        "validate_email",
        serde_json::json!({"value": "not-an-email"}),
    )?;
    assert!(!validity(&bad));
    assert!(bad["structuredContent"]["reason"].is_string());
    Ok(())
}

#[test]
fn validates_urls_with_components() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let result = server.call(
        "validate_url",
        serde_json::json!({"value": "https://example.com:8443/path?q=1"}),
    )?;
    assert!(validity(&result));
    let structured = &result["structuredContent"];
    assert_eq!(structured["scheme"], serde_json::json!("https"));
    assert_eq!(structured["host"], serde_json::json!("example.com"));
    assert_eq!(structured["port"], serde_json::json!(8443));

    assert!(!validity(&server.call(
        "validate_url",
        serde_json::json!({"value": "example.com"}),
    )?));
    Ok(())
}

#[test]
fn validates_phone_numbers() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let result = server.call(
        "validate_phone",
        serde_json::json!({"value": "+1 (415) 555-2671"}),
    )?;
    assert!(validity(&result));
    assert_eq!(
        result["structuredContent"]["normalized"],
        serde_json::json!("+14155552671")
    );

    assert!(!validity(&server.call(
        "validate_phone",
        serde_json::json!({"value": "12345"}),
    )?));
    Ok(())
}

#[test]
fn validates_json_with_expected_type() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let object = server.call(
        "validate_json",
        serde_json::json!({"value": "{\"a\": 1}", "expected_type": "object"}),
    )?;
    assert!(validity(&object));
    assert_eq!(
        object["structuredContent"]["parsed_type"],
        serde_json::json!("object")
    );

    let mismatch = server.call(
        "validate_json",
        serde_json::json!({"value": "[1]", "expected_type": "object"}),
    )?;
    assert!(!validity(&mismatch));

    let broken = server.call("validate_json", serde_json::json!({"value": "{broken"}))?;
    assert!(!validity(&broken));

    let unknown = server.call(
        "validate_json",
        serde_json::json!({"value": "1", "expected_type": "frob"}),
    )?;
    assert_eq!(unknown["isError"], serde_json::json!(true));
    Ok(())
}
