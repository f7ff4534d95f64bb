pub mod click;
pub mod gaps;
pub mod holidays;
pub mod month;
pub mod range;
pub mod set;
pub mod stats;

use anyhow::Result;
use ferien_core::config::PlannerConfig;
use ferien_core::{
    Assignee, Assignments, CoverageEngine, DateWrite, HolidayCalendar, OptimisticUpdate,
};

use crate::client::Client;
use crate::render::Names;
pub use crate::utils::tui::create_spinner;

/// What every command works with.
pub struct Context {
    pub client: Client,
    pub config: PlannerConfig,
    pub names: Names,
}

impl Context {
    pub fn new(client: Client, config: PlannerConfig) -> Self {
        let names = Names {
            p1: config.p1_name.clone(),
            p2: config.p2_name.clone(),
        };
        Context {
            client,
            config,
            names,
        }
    }

    /// Holidays and current assignments, fetched concurrently.
    pub async fn load_year(&self, year: i32) -> Result<(HolidayCalendar, Assignments)> {
        let spinner = create_spinner(format!("Loading {year}"));
        let result = tokio::try_join!(self.client.holidays(year), self.client.list_vacations());
        spinner.finish_and_clear();

        let (holidays, records) = result?;
        Ok((holidays, Assignments::from_records(&records)))
    }

    pub async fn assignments(&self) -> Result<Assignments> {
        let records = self.client.list_vacations().await?;
        Ok(Assignments::from_records(&records))
    }
}

/// Unattended days of `year` with `assignments` in place.
pub fn unattended_count(
    ctx: &Context,
    year: i32,
    holidays: &HolidayCalendar,
    assignments: &Assignments,
) -> Result<u32> {
    let settings = ctx.config.coverage_settings()?;
    let engine = CoverageEngine::new(year, holidays, assignments, settings);
    Ok(engine.compute_year_stats().unattended_count)
}

/// `ferien set` invocations that restore every date the update changes.
pub fn undo_commands(update: &OptimisticUpdate) -> Vec<String> {
    undo_for(update.undo_writes(), update.applied())
}

fn undo_for(previous: &[DateWrite], applied: &Assignments) -> Vec<String> {
    previous
        .iter()
        .filter(|w| w.assignee != applied.get(w.date.as_str()))
        .map(|w| {
            let tag = w.assignee.map(|a| a.as_str()).unwrap_or("none");
            format!("ferien set {} {tag}", w.date)
        })
        .collect()
}

/// Parse an assignee argument; `none` clears the day.
pub fn parse_assignment(value: &str) -> Result<Option<Assignee>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}
