pub mod config;
pub mod goal;
pub mod quote;
pub mod reflect;
pub mod stats;
pub mod task;
pub mod timer;

use std::rc::Rc;

use growday_core::{App, Config, Database, SystemClock, TickSource};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store and load a session over it.
pub fn open_app<S: TickSource>(config: Config, ticks: S) -> Result<App<S>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let app = App::load(Rc::new(db), Rc::new(SystemClock), config, ticks)?;
    Ok(app)
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
