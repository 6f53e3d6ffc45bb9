//! Task management commands for CLI.

use clap::Subcommand;
use growday_core::{Config, ManualTicks};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Goal the task belongs to (must already exist)
        #[arg(long)]
        goal: Option<String>,
    },
    /// List tasks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID (or a unique prefix)
        id: String,
    },
    /// Mark a task not done
    Undo {
        /// Task ID (or a unique prefix)
        id: String,
    },
    /// Change a task's title
    Rename {
        /// Task ID (or a unique prefix)
        id: String,
        /// New title
        title: String,
    },
    /// Attach a short note to a task
    Note {
        /// Task ID (or a unique prefix)
        id: String,
        /// Note text (empty clears it)
        note: String,
    },
    /// Delete a task
    Remove {
        /// Task ID (or a unique prefix)
        id: String,
    },
    /// Delete all finished tasks
    Clear,
}

pub fn run(action: TaskAction) -> CliResult {
    let mut app = open_app(Config::load()?, ManualTicks::new())?;

    match action {
        TaskAction::Add { title, goal } => {
            let task = app.add_task(&title, goal.as_deref())?;
            println!("Task added: {}", task.id);
        }
        TaskAction::List { json } => {
            if json {
                print_json(app.tasks())?;
            } else {
                for task in app.tasks() {
                    let mark = if task.done { "x" } else { " " };
                    let goal = if task.has_goal() {
                        format!("  [{}]", task.goal)
                    } else {
                        String::new()
                    };
                    let note = if task.note.is_empty() {
                        String::new()
                    } else {
                        format!("  • {}", task.note)
                    };
                    println!("[{mark}] {}  {}{goal}{note}", task.id, task.title);
                }
                let summary = app.summary();
                println!(
                    "{} tasks • {} done • XP: {}",
                    summary.tasks.total, summary.tasks.done, summary.xp
                );
            }
        }
        TaskAction::Done { id } => {
            let xp = app.set_task_done(&id, true)?;
            if xp > 0 {
                println!("Task done (+{xp} XP, total {})", app.stats().xp);
            } else {
                println!("Task already done");
            }
        }
        TaskAction::Undo { id } => {
            app.set_task_done(&id, false)?;
            println!("Task reopened");
        }
        TaskAction::Rename { id, title } => {
            let task = app.rename_task(&id, &title)?;
            println!("Task renamed: {}", task.title);
        }
        TaskAction::Note { id, note } => {
            app.set_task_note(&id, &note)?;
            println!("Task note updated");
        }
        TaskAction::Remove { id } => {
            let task = app.remove_task(&id)?;
            println!("Task removed: {}", task.title);
        }
        TaskAction::Clear => {
            let removed = app.clear_completed();
            println!("Cleared {removed} finished task(s)");
        }
    }
    Ok(())
}
