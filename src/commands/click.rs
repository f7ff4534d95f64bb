use anyhow::Result;
use ferien_core::{Assignee, IsoDate, OptimisticUpdate, next_on_click};
use owo_colors::OwoColorize;

use super::{Context, undo_commands};

/// Advance the assignment of `date` as if `clicking` had clicked it.
pub async fn run(ctx: &Context, date: &str, clicking: Assignee) -> Result<()> {
    let date = IsoDate::parse(date)?;

    let current = ctx.assignments().await?;
    let before = current.get(date.as_str());
    let update = OptimisticUpdate::point(&current, date.clone(), next_on_click(before, clicking));
    let after = update.applied().get(date.as_str());

    if let Err(e) = ctx.client.set_vacation(&date, after).await {
        let restored = update.rollback();
        println!(
            "{} {} ({} stays {})",
            "✗".red(),
            e.to_string().red(),
            date,
            ctx.names.assignment(restored.get(date.as_str()))
        );
        return Err(e);
    }

    println!(
        "{} {}: {} -> {}",
        "✓".green(),
        date,
        ctx.names.assignment(before).dimmed(),
        ctx.names.assignment(after).bold()
    );
    for command in undo_commands(&update) {
        println!("   {}", format!("undo: {command}").dimmed());
    }
    Ok(())
}
