//! `inkwise claim ...` and `inkwise express`: Claim editing.

use super::{CmdResult, Workspace, preview, resolve_claim};
use inkwise_core::session::{
    add_claim, move_claim, prune_expressions, remove_claim, set_claim_text, set_expression,
};
use tracing::info;

pub async fn list() -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;

    println!("📋 Claims ({})\n", state.claims.len());
    for (i, claim) in state.claims.iter().enumerate() {
        let text = if claim.is_blank() { "(empty)".to_string() } else { preview(&claim.text, 60) };
        let expressed = if state.expression_text(&claim.id).is_empty() { " " } else { "✎" };
        println!("  {:>2}. {expressed} {text}", i + 1);
        println!("       id: {}", claim.id);
    }
    let orphans = state.orphaned_expressions();
    if orphans > 0 {
        println!("\n  {orphans} expression(s) belong to removed claims. Run `inkwise claim prune` to drop them.");
    }
    Ok(())
}

pub async fn add(text: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let (next, id) = add_claim(&state, text, &mut ws.ids);
    ws.save(&next).await?;
    info!(claim = %id, "Claim added");
    println!("✅ Added claim {} ({id})", next.claims.len());
    Ok(())
}

pub async fn edit(reference: &str, text: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let id = resolve_claim(&state, reference)?;
    let next = set_claim_text(&state, &id, text)?;
    ws.save(&next).await?;
    println!("✅ Updated claim {id}");
    Ok(())
}

pub async fn remove(reference: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let id = resolve_claim(&state, reference)?;
    let next = remove_claim(&state, &id, &mut ws.ids)?;
    ws.save(&next).await?;
    info!(claim = %id, "Claim removed");
    println!("✅ Removed claim {id}");
    Ok(())
}

pub async fn shift(reference: &str, offset: isize) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let id = resolve_claim(&state, reference)?;
    let next = move_claim(&state, &id, offset)?;
    let position = next
        .claims
        .iter()
        .position(|c| c.id == id)
        .map_or(0, |i| i + 1);
    ws.save(&next).await?;
    println!("✅ Claim {id} is now #{position}");
    Ok(())
}

pub async fn prune() -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let dropped = state.orphaned_expressions();
    if dropped == 0 {
        println!("No orphaned expressions.");
        return Ok(());
    }
    ws.save(&prune_expressions(&state)).await?;
    println!("✅ Dropped {dropped} orphaned expression(s)");
    Ok(())
}

pub async fn express(reference: &str, text: &str) -> CmdResult {
    let mut ws = Workspace::open()?;
    let state = ws.load().await;
    let id = resolve_claim(&state, reference)?;
    let next = set_expression(&state, &id, text)?;
    ws.save(&next).await?;
    println!("✅ Expression saved for claim {id}");
    Ok(())
}
