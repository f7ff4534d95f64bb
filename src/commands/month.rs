use anyhow::Result;
use ferien_core::CoverageEngine;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{DayLine, Render, month_label};

pub async fn run(ctx: &Context, year: i32, month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        anyhow::bail!("Month must be between 1 and 12, got {month}");
    }
    let month0 = month - 1;

    let (holidays, assignments) = ctx.load_year(year).await?;
    let settings = ctx.config.coverage_settings()?;
    let engine = CoverageEngine::new(year, &holidays, &assignments, settings);

    println!("{}", format!("{} {year}", month_label(month0 as usize)).bold());
    for day in engine.month_days(month0)? {
        let line = DayLine {
            day: &day,
            names: &ctx.names,
        };
        println!("   {}", line.render());
    }

    Ok(())
}
