//! `inkwise status`: Show the current session.

use super::{CmdResult, Workspace, preview};
use inkwise_compose::render;

pub async fn run() -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let report = render(&state);
    let cfg = &state.linkedin;
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    println!("🖋️  Inkwise Session");
    println!("==================");
    println!("  File:      {}", ws.session_path().display());
    println!("  Phase:     {}", state.phase);
    println!("  Profile:   {} ({})", report.label, report.profile);
    println!(
        "  Intent:    {}",
        if state.intent.trim().is_empty() { "(empty)".to_string() } else { preview(&state.intent, 60) }
    );
    println!(
        "  Claims:    {} ({} with text)",
        state.claims.len(),
        state.non_empty_claims().count()
    );
    println!(
        "  Expressions: {} ({} orphaned)",
        state.expressions.len(),
        state.orphaned_expressions()
    );
    println!(
        "  Options:   bullets {} (max {}), cta {}, hashtags {}, signature {}",
        on_off(cfg.include_bullets),
        cfg.max_bullets,
        on_off(cfg.include_cta),
        on_off(cfg.include_hashtags),
        on_off(cfg.include_signature),
    );
    if !state.ui.preset_id.is_empty() {
        println!("  Preset:    {}", state.ui.preset_id);
    }
    println!("  Draft:     {} / {} chars", report.chars, report.max_chars);
    if report.over_limit {
        println!("\n  ⚠️  Draft is {} characters over the {} limit", -report.remaining(), report.label);
    }

    Ok(())
}
