use chrono::Local;
use clap::Subcommand;
use growday_core::reflection::MAX_REFLECTION_CHARS;
use growday_core::{Config, ManualTicks};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum ReflectAction {
    /// Save a reflection
    Add {
        /// Reflection text
        text: String,
    },
    /// List reflections, newest first
    List {
        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ReflectAction) -> CliResult {
    let mut app = open_app(Config::load()?, ManualTicks::new())?;

    match action {
        ReflectAction::Add { text } => {
            let reflection = app.add_reflection(&text)?;
            println!(
                "Reflection saved ({} / {MAX_REFLECTION_CHARS})",
                reflection.text.chars().count()
            );
        }
        ReflectAction::List { json } => {
            if json {
                let all: Vec<_> = app.reflections().collect();
                print_json(&all)?;
            } else {
                for r in app.reflections() {
                    let when = r.date.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                    println!("{when}  {}", r.text);
                }
            }
        }
    }
    Ok(())
}
