use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "scorecast-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_predict_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_scorecast");
    let output_path = temp_path("predict");
    let status = Command::new(exe)
        .args([
            "predict",
            "--start",
            "2022-01-01T00:00:00Z",
            "--duration",
            "1",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(parsed[0]["time"], "2022-01-01T00:00:00.000Z");
    assert_eq!(parsed[0]["scoreInteger"], 99_822);
    assert_eq!(parsed[0]["scoreString"], "99.822");
    assert_eq!(parsed[0]["scoreType"], "Normal");
}

#[test]
fn cli_count_writes_csv_spans() {
    let exe = env!("CARGO_BIN_EXE_scorecast");
    let output_path = temp_path("count");
    let status = Command::new(exe)
        .args([
            "count",
            "--start",
            "2022-01-01 09:00:00",
            "--timezone",
            "jst",
            "--span",
            "10",
            "--duration",
            "25",
            "--report",
            "csv",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[3],
        "2022-01-01T00:00:20.000Z,2022-01-01T00:00:25.000Z,1,0,0,0"
    );
}

#[test]
fn cli_rejects_window_over_limit() {
    let exe = env!("CARGO_BIN_EXE_scorecast");
    let output = Command::new(exe)
        .args([
            "predict",
            "--start",
            "2022-01-01T00:00:00Z",
            "--duration",
            "120",
            "--max-duration",
            "60",
        ])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds --max-duration"));
}

#[test]
fn cli_rejects_unknown_kind() {
    let exe = env!("CARGO_BIN_EXE_scorecast");
    let output = Command::new(exe)
        .args(["next", "--start", "2022-01-01T00:00:00Z", "--kind", "perfect"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
