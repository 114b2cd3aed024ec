use std::process::Command;
use tempfile::tempdir;

fn kv(store_path: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mcp-utils"))
        .args(args)
        .env("MCP_UTILS_KV_PATH", store_path)
        .output()
        .expect("binary runs")
}

#[test]
fn cli_kv_set_get_delete() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let store_path = dir.path().join("kv.json");

    let set = kv(&store_path, &["kv-set", "greeting", "\"hello\""]);
    assert!(set.status.success());
    assert_eq!(String::from_utf8(set.stdout)?.trim(), "created greeting");

    let get = kv(&store_path, &["kv-get", "greeting"]);
    assert!(get.status.success());
    assert_eq!(String::from_utf8(get.stdout)?.trim(), "\"hello\"");

    let delete = kv(&store_path, &["kv-delete", "greeting"]);
    assert!(delete.status.success());

    let miss = kv(&store_path, &["kv-get", "greeting"]);
    assert!(!miss.status.success());
    let stderr = String::from_utf8(miss.stderr)?;
    assert!(stderr.contains("greeting"), "{stderr}");
    Ok(())
}

#[test]
fn cli_kv_list_outputs_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let store_path = dir.path().join("kv.json");

    assert!(kv(&store_path, &["kv-set", "a", "1"]).status.success());
    assert!(kv(&store_path, &["kv-set", "b", "2"]).status.success());

    let list = kv(&store_path, &["kv-list", "--json"]);
    assert!(list.status.success());
    let value: serde_json::Value = serde_json::from_slice(&list.stdout)?;
    assert_eq!(value["keys"], serde_json::json!(["a", "b"]));
    assert_eq!(value["count"], serde_json::json!(2));
    Ok(())
}
