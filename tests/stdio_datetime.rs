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

#[test]
fn parses_explicit_dates() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let result = server.call("datetime_parse", serde_json::json!({"text": "2024-03-01"}))?;
    assert_eq!(result["isError"], serde_json::json!(false), "{result}");
    let structured = &result["structuredContent"];
    assert_eq!(structured["iso"], serde_json::json!("2024-03-01T00:00:00Z"));
    assert_eq!(structured["pattern"], serde_json::json!("date"));

    let unix = server.call("datetime_parse", serde_json::json!({"text": "1700000000"}))?;
    assert_eq!(
        unix["structuredContent"]["unix"],
        serde_json::json!(1_700_000_000)
    );
    assert_eq!(
        unix["structuredContent"]["pattern"],
        serde_json::json!("unix")
    );
    Ok(())
}

#[test]
fn parses_natural_language_relative_to_now() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let now = server.call("datetime_now", serde_json::json!({}))?;
    let now_unix = now["structuredContent"]["unix"].as_i64().expect("unix");

    let tomorrow = server.call("datetime_parse", serde_json::json!({"text": "tomorrow"}))?;
    let tomorrow_unix = tomorrow["structuredContent"]["unix"]
        .as_i64()
        .expect("unix");
    // Midnight of the next day lands within 48 hours ahead of the clock.
    assert!(tomorrow_unix > now_unix - 1);
    assert!(tomorrow_unix <= now_unix + 2 * 86_400);
    assert_eq!(
        tomorrow["structuredContent"]["pattern"],
        serde_json::json!("relative_day")
    );

    let soon = server.call("datetime_parse", serde_json::json!({"text": "in 2 hours"}))?;
    let soon_unix = soon["structuredContent"]["unix"].as_i64().expect("unix");
    assert!(soon_unix >= now_unix + 7_190 && soon_unix <= now_unix + 7_220);

    let unknown = server.call("datetime_parse", serde_json::json!({"text": "whenever"}))?;
    assert_eq!(unknown["isError"], serde_json::json!(true));
    assert_eq!(
        unknown["structuredContent"]["error"]["kind"],
        serde_json::json!("invalid_input")
    );
    Ok(())
}

#[test]
fn formats_and_shifts_timestamps() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let formatted = server.call(
        "datetime_format",
        serde_json::json!({"timestamp": 1_700_000_000, "format": "%Y-%m-%d %H:%M:%S"}),
    )?;
    assert_eq!(
        formatted["content"][0]["text"],
        serde_json::json!("2023-11-14 22:13:20")
    );

    let bad_format = server.call(
        "datetime_format",
        serde_json::json!({"timestamp": 0, "format": "%Q"}),
    )?;
    assert_eq!(bad_format["isError"], serde_json::json!(true));

    let added = server.call(
        "datetime_add",
        serde_json::json!({"timestamp": 0, "amount": 2, "unit": "days"}),
    )?;
    assert_eq!(
        added["structuredContent"]["unix"],
        serde_json::json!(172_800)
    );
    assert_eq!(
        added["structuredContent"]["iso"],
        serde_json::json!("1970-01-03T00:00:00Z")
    );
    Ok(())
}

#[test]
fn diffs_timestamps_in_requested_unit() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let diff = server.call(
        "datetime_diff",
        serde_json::json!({
            "from": "2024-01-01",
            "to": "2024-01-08",
            "unit": "weeks"
        }),
    )?;
    let structured = &diff["structuredContent"];
    assert_eq!(structured["value"], serde_json::json!(1.0));
    assert_eq!(structured["seconds"], serde_json::json!(604_800));
    assert_eq!(structured["breakdown"]["days"], serde_json::json!(7));
    assert_eq!(structured["negative"], serde_json::json!(false));
    Ok(())
}

#[test]
fn now_honors_fixed_offsets() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::spawn()?;

    let result = server.call("datetime_now", serde_json::json!({"timezone": "+09:00"}))?;
    assert_eq!(result["isError"], serde_json::json!(false));
    let iso = result["structuredContent"]["iso"]
        .as_str()
        .expect("iso string");
    assert!(iso.ends_with("+09:00"), "{iso}");

    let invalid = server.call("datetime_now", serde_json::json!({"timezone": "pluto"}))?;
    assert_eq!(invalid["isError"], serde_json::json!(true));
    Ok(())
}
