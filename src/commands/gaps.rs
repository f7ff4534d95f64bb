use anyhow::Result;
use ferien_core::CoverageEngine;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{DayLine, Render, pluralize};

pub async fn run(ctx: &Context, year: i32) -> Result<()> {
    let (holidays, assignments) = ctx.load_year(year).await?;
    let settings = ctx.config.coverage_settings()?;
    let gaps = CoverageEngine::new(year, &holidays, &assignments, settings).unattended_days();

    if gaps.is_empty() {
        println!("{}", format!("Every school holiday workday in {year} is covered").green());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} unattended {} in {year}", gaps.len(), pluralize("day", gaps.len())).bold()
    );
    for day in &gaps {
        let line = DayLine {
            day,
            names: &ctx.names,
        };
        println!("   {}", line.render());
    }

    Ok(())
}
