use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

pub async fn run(ctx: &Context, year: i32) -> Result<()> {
    let (holidays, _) = ctx.load_year(year).await?;

    println!("{}", format!("Public holidays {year}").bold());
    for holiday in &holidays.public {
        println!("   {}", holiday.render());
    }

    println!();
    println!("{}", format!("School holidays {year}").bold());
    if holidays.school.is_empty() {
        println!("   {}", "None known".dimmed());
    }
    for range in &holidays.school {
        println!("   {}", range.render());
    }

    Ok(())
}
