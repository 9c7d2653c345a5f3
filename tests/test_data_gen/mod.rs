//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Deterministic people records: name, team, age (some missing).
pub fn people(n: usize) -> Value {
    let teams = ["red", "blue", "green"];
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            let mut row = json!({
                "name": format!("p{:03}", i),
                "team": teams[i % teams.len()],
            });
            if i % 7 != 6 {
                row["age"] = json!(18 + (i * 13) % 50);
            }
            row
        })
        .collect();
    Value::Array(rows)
}

/// Write `contents` to a fresh file under the system temp dir.
pub fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("seqline-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}
