//! `inkwise set` and `inkwise reset`: Field patches and starting over.

use super::{CmdResult, Workspace};
use inkwise_core::session::apply_patch;
use serde_json::Value;
use tracing::info;

pub async fn set(path: &str, value: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;

    let patch = build_patch(path, parse_value(value))?;
    let next = apply_patch(&state, &patch, &mut ws.ids);
    if next == state {
        println!("No change: '{path}' was not accepted or already had that value.");
        return Ok(());
    }

    ws.save(&next).await?;
    info!(path, "Session field updated");
    println!("✅ Updated {path}");
    Ok(())
}

pub async fn reset() -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.fresh();
    ws.save(&state).await?;
    println!("✅ Session reset ({})", ws.session_path().display());
    Ok(())
}

/// JSON when it parses, otherwise the raw text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// `linkedin.maxBullets` + `3` → `{"linkedin": {"maxBullets": 3}}`.
fn build_patch(path: &str, value: Value) -> Result<Value, String> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(format!("Invalid field path: '{path}'"));
    }
    Ok(segments.iter().rev().fold(value, |inner, key| {
        let mut map = serde_json::Map::new();
        map.insert((*key).to_string(), inner);
        Value::Object(map)
    }))
}
