use anyhow::Result;
use ferien_core::{IsoDate, OptimisticUpdate};
use owo_colors::OwoColorize;

use super::{Context, parse_assignment, undo_commands};

pub async fn run(ctx: &Context, date: &str, assignee: &str) -> Result<()> {
    let date = IsoDate::parse(date)?;
    let assignee = parse_assignment(assignee)?;

    let current = ctx.assignments().await?;
    let update = OptimisticUpdate::point(&current, date.clone(), assignee);

    if let Err(e) = ctx.client.set_vacation(&date, assignee).await {
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
        "{} {} {}",
        "✓".green(),
        date,
        ctx.names.assignment(update.applied().get(date.as_str())).bold()
    );
    for command in undo_commands(&update) {
        println!("   {}", format!("undo: {command}").dimmed());
    }
    Ok(())
}
