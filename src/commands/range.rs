use anyhow::Result;
use ferien_core::{Assignee, OptimisticUpdate, compute_range_dates};
use owo_colors::OwoColorize;

use super::{Context, create_spinner, undo_commands, unattended_count};
use crate::render::pluralize;

pub async fn run(ctx: &Context, start: &str, end: &str, assignee: Assignee) -> Result<()> {
    let span = compute_range_dates(start, end)?;
    let year = span.start().year();
    let (holidays, current) = ctx.load_year(year).await?;

    let update = OptimisticUpdate::range(&current, &span, assignee);
    let gaps_before = unattended_count(ctx, year, &holidays, &current)?;
    let gaps_after = unattended_count(ctx, year, &holidays, update.applied())?;

    let spinner = create_spinner(format!(
        "{} .. {} -> {} (unattended in {year}: {gaps_before} -> {gaps_after})",
        span.start(),
        span.end(),
        ctx.names.assignee(assignee)
    ));
    let result = ctx
        .client
        .set_range(span.start().as_str(), span.end().as_str(), assignee)
        .await;
    spinner.finish_and_clear();

    let previous = match result {
        Ok(previous) => previous,
        Err(e) => {
            let restored = update.rollback();
            let gaps = unattended_count(ctx, year, &holidays, &restored)?;
            println!(
                "{} {} (nothing changed, {gaps} unattended {} in {year})",
                "✗".red(),
                e.to_string().red(),
                pluralize("day", gaps as usize)
            );
            return Err(e);
        }
    };

    println!(
        "{} {} .. {} {} ({} {})",
        "✓".green(),
        span.start(),
        span.end(),
        ctx.names.assignee(assignee).bold(),
        span.day_count(),
        pluralize("day", span.day_count())
    );
    println!(
        "   Unattended in {year}: {} -> {}",
        gaps_before,
        if gaps_after == 0 {
            gaps_after.green().to_string()
        } else {
            gaps_after.yellow().to_string()
        }
    );

    if previous.as_slice() != update.undo_writes() {
        tracing::warn!("Assignments changed on the server since they were loaded");
    }

    let undo = undo_commands(&update);
    if !undo.is_empty() {
        println!("{}", "To undo:".dimmed());
        for command in undo {
            println!("   {}", command.dimmed());
        }
    }

    Ok(())
}
