// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Writes level-tagged lines to stderr so stdout stays free for data.
struct ConsoleLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Picks the level from `-v` / `-q` counts: warn by default, info at -v,
/// debug at -vv, trace beyond; -q silences everything but errors.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
  if quiet {
    return LevelFilter::Error;
  }
  match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn tag(level: Level) -> &'static str {
  match level {
    Level::Error => "error",
    Level::Warn => "warn ",
    Level::Info => "info ",
    Level::Debug => "debug",
    Level::Trace => "trace",
  }
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      // Format: "[warn ] No config found"
      let mut err = std::io::stderr().lock();
      let _ = writeln!(err, "[{}] {}", tag(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
