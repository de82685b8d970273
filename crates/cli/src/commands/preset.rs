//! `inkwise preset ...`: Quick-start sessions.

use super::{CmdResult, Workspace};
use inkwise_core::PRESETS;
use inkwise_core::preset::load_preset;
use tracing::info;

pub async fn list() -> CmdResult {
    println!("🧩 Presets\n");
    for preset in PRESETS {
        println!("  {:<16} {}", preset.id, preset.label);
        println!("  {:<16} {}", "", preset.description);
    }
    println!("\n  Load one with: inkwise preset load <id>");
    Ok(())
}

pub async fn load(id: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = load_preset(id, &mut ws.ids)?;
    ws.save(&state).await?;
    info!(preset = id, "Preset loaded");
    println!(
        "✅ Loaded preset '{id}' ({} claims, profile {})",
        state.claims.len(),
        state.output_profile
    );
    Ok(())
}
