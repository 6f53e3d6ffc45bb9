use clap::Subcommand;
use growday_core::{Config, ManualTicks};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        /// Goal name (e.g. "Pass TOEFL")
        name: String,
    },
    /// List goals as JSON
    List,
}

pub fn run(action: GoalAction) -> CliResult {
    let mut app = open_app(Config::load()?, ManualTicks::new())?;

    match action {
        GoalAction::Add { name } => {
            let goal = app.add_goal(&name)?;
            println!("Goal saved: {}", goal.name);
        }
        GoalAction::List => print_json(app.goals())?,
    }
    Ok(())
}
