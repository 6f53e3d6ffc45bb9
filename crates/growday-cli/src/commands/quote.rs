use clap::Subcommand;
use growday_core::{Config, ManualTicks};

use super::{open_app, CliResult};

#[derive(Subcommand)]
pub enum QuoteAction {
    /// Print the current quote
    Show,
    /// Pick a new random quote
    Next,
}

pub fn run(action: QuoteAction) -> CliResult {
    let mut app = open_app(Config::load()?, ManualTicks::new())?;

    match action {
        QuoteAction::Show => println!("{}", app.quote()),
        QuoteAction::Next => println!("{}", app.next_quote(&mut rand::thread_rng())),
    }
    Ok(())
}
