use anyhow::Result;
use ferien_core::CoverageEngine;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{Render, month_label, render_year_stats};

pub async fn run(ctx: &Context, year: i32) -> Result<()> {
    let (holidays, assignments) = ctx.load_year(year).await?;
    let settings = ctx.config.coverage_settings()?;

    let summary = CoverageEngine::new(year, &holidays, &assignments, settings).summary();

    println!("{}", format!("Coverage {year}").bold());
    for line in render_year_stats(&summary.stats, &ctx.names) {
        println!("   {line}");
    }

    if !settings.p1_days_off.is_empty() || !settings.p2_days_off.is_empty() {
        println!(
            "   {}",
            format!(
                "Days off: {} {}, {} {}",
                ctx.names.p1, settings.p1_days_off, ctx.names.p2, settings.p2_days_off
            )
            .dimmed()
        );
    }

    println!();
    for (month0, month) in summary.months.iter().enumerate() {
        println!("   {}  {}", month_label(month0), month.render());
    }

    if holidays.school.is_empty() {
        println!();
        println!(
            "{}",
            format!("No school holidays known for {year}").yellow()
        );
    }

    Ok(())
}
