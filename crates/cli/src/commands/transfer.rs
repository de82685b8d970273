//! `inkwise export` and `inkwise import`: Session files.

use super::{CmdResult, Workspace};
use chrono::Utc;
use inkwise_schema::{export_json, import_json};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub async fn export(out: Option<PathBuf>) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let now = Utc::now();

    let path = match out {
        Some(path) => path,
        None => ws.config.export_dir().join(export_file_name(now)),
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = export_json(&state, now)?;
    tokio::fs::write(&path, content).await?;
    info!(path = %path.display(), "Session exported");
    println!("✅ Exported session to {}", path.display());
    Ok(())
}

pub async fn import(file: &Path) -> CmdResult {
    let ws = Workspace::open()?;
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    let state = match import_json(&content) {
        Ok(state) => state,
        Err(e) => {
            warn!(path = %file.display(), error = %e, "Import rejected");
            if !e.issues().is_empty() {
                eprintln!("❌ {} is not a valid session:", file.display());
                for issue in e.issues() {
                    eprintln!("   • {issue}");
                }
            }
            return Err(e.into());
        }
    };

    ws.save(&state).await?;
    println!(
        "✅ Imported {} ({} claims, phase {})",
        file.display(),
        state.claims.len(),
        state.phase
    );
    Ok(())
}

fn export_file_name(at: chrono::DateTime<Utc>) -> String {
    format!("inkwise-session-{}.json", at.format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn export_file_names_are_timestamped() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(export_file_name(at), "inkwise-session-20240309-140500.json");
    }
}
