// A tiny logger for the `log` crate that writes to stderr. Filtering is left
// entirely to `log::set_max_level`.

use chrono::{SecondsFormat, Utc};
use log::{LevelFilter, Log};

static LOGGER: Logger = Logger;

#[derive(Debug)]
pub struct Logger;

impl Logger {
    /// Install the stderr logger as the global logger, filtering at the
    /// level selected by the number of `-v` flags.
    pub fn init(verbose: u8) -> Result<(), log::SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level(verbose));
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{}|{}|{}:{}: {}",
                    now,
                    record.level(),
                    file,
                    line,
                    record.args()
                );
            }
            _ => {
                eprintln!("{}|{}: {}", now, record.level(), record.args());
            }
        }
    }

    fn flush(&self) {
        // eprintln! is unbuffered.
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
