use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "growday", version, about = "GrowDay daily productivity tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work/break countdown
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task list
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Goals tasks can belong to
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Daily reflections
    Reflect {
        #[command(subcommand)]
        action: commands::reflect::ReflectAction,
    },
    /// Quote of the day
    Quote {
        #[command(subcommand)]
        action: commands::quote::QuoteAction,
    },
    /// XP and streak
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Delete all tasks, goals, reflections and progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GROWDAY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("growday_core=warn,growday=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Reflect { action } => commands::reflect::run(action),
        Commands::Quote { action } => commands::quote::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::stats::reset_everything(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
