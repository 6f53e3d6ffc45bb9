use clap::Subcommand;
use growday_core::{Config, ManualTicks, Reconciliation};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// XP, streak and today's task progress
    Show {
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Zero XP, streak and today's count
    Reset,
}

pub fn run(action: StatsAction) -> CliResult {
    let mut app = open_app(Config::load()?, ManualTicks::new())?;

    match action {
        StatsAction::Show { json } => {
            if json {
                print_json(&app.summary())?;
            } else {
                let summary = app.summary();
                if let Reconciliation::Broken { previous_streak } = app.reconciliation() {
                    println!("Streak of {previous_streak} day(s) lost");
                }
                println!("XP: {}", summary.xp);
                println!(
                    "Streak: {} day(s) • {}% done",
                    summary.streak, summary.tasks.percent
                );
                println!("Completed today: {}", summary.completed_today);
                println!("\"{}\"", app.quote());
            }
        }
        StatsAction::Reset => {
            app.reset_stats();
            println!("stats reset");
        }
    }
    Ok(())
}

/// `growday reset`: wipe every collection.
pub fn reset_everything(confirmed: bool) -> CliResult {
    if !confirmed {
        return Err("refusing to delete all data without --yes".into());
    }
    let mut app = open_app(Config::load()?, ManualTicks::new())?;
    app.reset_all();
    println!("all data reset");
    Ok(())
}
