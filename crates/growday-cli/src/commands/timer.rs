use std::io::Write;

use clap::Subcommand;
use growday_core::{App, Config, Event, IntervalTicks, ManualTicks};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a live work/break countdown until Ctrl-C
    Run {
        /// Work phase length in minutes (overrides config)
        #[arg(long)]
        work_min: Option<u32>,
        /// Break phase length in minutes (overrides config)
        #[arg(long)]
        break_min: Option<u32>,
        /// Stop after this many completed work rounds
        #[arg(long)]
        rounds: Option<u32>,
        /// Begin with a break instead of work
        #[arg(long)]
        on_break: bool,
        /// Do not draw the live clock on stderr
        #[arg(long)]
        quiet: bool,
    },
    /// Print the initial timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> CliResult {
    match action {
        TimerAction::Run {
            work_min,
            break_min,
            rounds,
            on_break,
            quiet,
        } => {
            let mut config = Config::load()?;
            if let Some(m) = work_min {
                config.apply("timer.work_minutes", &m.to_string())?;
            }
            if let Some(m) = break_min {
                config.apply("timer.break_minutes", &m.to_string())?;
            }

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let mut app = open_app(config, IntervalTicks::new())?;
                if on_break {
                    app.switch_mode();
                }
                countdown(&mut app, rounds, quiet).await
            })
        }
        TimerAction::Status => {
            let app = open_app(Config::load()?, ManualTicks::new())?;
            print_json(&app.timer_state())
        }
    }
}

/// Drive the engine from its interval until Ctrl-C or the round limit.
async fn countdown(app: &mut App<IntervalTicks>, rounds: Option<u32>, quiet: bool) -> CliResult {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if let Some(event) = app.start_timer() {
        print_event(&event)?;
    }

    loop {
        let fired = tokio::select! {
            _ = app.timer_mut().ticks_mut().next_tick() => true,
            _ = &mut ctrl_c => false,
        };
        if !fired {
            if !quiet {
                eprintln!();
            }
            if let Some(event) = app.pause_timer() {
                print_event(&event)?;
            }
            break;
        }

        match app.tick() {
            Some(event) => {
                if !quiet {
                    eprintln!();
                }
                print_event(&event)?;
                let done = event.is_round_completed()
                    && rounds.is_some_and(|n| app.timer_state().rounds_completed >= n);
                if done {
                    if let Some(event) = app.pause_timer() {
                        print_event(&event)?;
                    }
                    break;
                }
            }
            None if !quiet => {
                let state = app.timer_state();
                eprint!("\r{:<5} {}", state.mode.label(), state.clock());
                std::io::stderr().flush()?;
            }
            None => {}
        }
    }

    tracing::info!(xp = app.stats().xp, "countdown stopped");
    Ok(())
}

fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
