//! `inkwise draft` and `inkwise profiles`: Rendering.

use super::{CmdResult, Workspace};
use inkwise_compose::{render, render_as};
use inkwise_core::{PROFILES, ProfileKey};

pub async fn run(profile: Option<&str>, json: bool) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;

    let report = match profile {
        Some(name) => {
            let key = ProfileKey::parse(name).ok_or_else(|| {
                format!("Unknown profile '{name}'. Run `inkwise profiles` to see the options.")
            })?;
            render_as(&state, key)
        }
        None => render(&state),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.text);
    println!();
    let mut footer = format!("{}: {} / {} chars", report.label, report.chars, report.max_chars);
    if let Some(posts) = report.posts {
        footer.push_str(&format!(", {posts} posts"));
    }
    if report.over_limit {
        footer.push_str(&format!(" ⚠️  {} over", -report.remaining()));
    }
    eprintln!("{footer}");
    Ok(())
}

pub async fn profiles() -> CmdResult {
    let mut ws = Workspace::open()?;
    let current = ws.load().await.output_profile;

    println!("📐 Output profiles\n");
    for p in PROFILES.iter() {
        let marker = if p.key == current { "*" } else { " " };
        let limit = match p.chunk_size {
            Some(chunk) => format!("{} chars, {} per post", p.max_chars, chunk),
            None => format!("{} chars", p.max_chars),
        };
        println!("  {marker} {:<8} {:<20} {limit}", p.key.as_str(), p.label);
        println!("             {}", p.hint);
    }
    Ok(())
}
