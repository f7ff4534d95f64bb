mod client;
mod commands;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use ferien_core::Assignee;
use ferien_core::config::PlannerConfig;

use crate::client::Client;
use crate::commands::Context;

#[derive(Parser)]
#[command(name = "ferien")]
#[command(about = "Plan who looks after the children during the Bavarian school holidays")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Yearly totals and per-month coverage
    Stats {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Every day of one month with its classification
    Month {
        /// Month number, 1 = January
        month: u32,

        #[arg(short, long)]
        year: Option<i32>,
    },
    /// School holiday workdays nobody covers
    Gaps {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Public holidays and school holiday ranges
    Holidays {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Assign one day (p1, p2, both, care or none)
    Set { date: String, assignee: String },
    /// Assign every day from start to end, inclusive
    Range {
        start: String,
        end: String,
        assignee: Assignee,
    },
    /// Cycle the assignment of one day as a calendar click would
    Click {
        date: String,

        /// Who is clicking (p1, p2, both or care)
        #[arg(long = "as")]
        clicking: Assignee,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = PlannerConfig::load()?;
    let client = Client::connect(config.port).await?;
    let ctx = Context::new(client, config);

    match cli.command {
        Commands::Stats { year } => commands::stats::run(&ctx, resolve_year(year)).await,
        Commands::Month { month, year } => {
            commands::month::run(&ctx, resolve_year(year), month).await
        }
        Commands::Gaps { year } => commands::gaps::run(&ctx, resolve_year(year)).await,
        Commands::Holidays { year } => commands::holidays::run(&ctx, resolve_year(year)).await,
        Commands::Set { date, assignee } => commands::set::run(&ctx, &date, &assignee).await,
        Commands::Range {
            start,
            end,
            assignee,
        } => commands::range::run(&ctx, &start, &end, assignee).await,
        Commands::Click { date, clicking } => commands::click::run(&ctx, &date, clicking).await,
    }
}

fn resolve_year(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| chrono::Local::now().year())
}
