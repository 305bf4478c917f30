//! Logger.
//!
//! Every module logs through the `log` facade; this is the colored stdout sink installed by the
//! binary.

use chrono::{Datelike, Local, Timelike};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StdoutLogger {
  level: LevelFilter,
}

impl StdoutLogger {
  pub fn new(level: LevelFilter) -> Self {
    StdoutLogger { level }
  }

  /// Install the logger as the global `log` sink.
  pub fn init(self) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(self))?;
    log::set_max_level(self.level);
    Ok(())
  }
}

fn color(level: Level) -> &'static str {
  match level {
    Level::Error => "\x1b[1;31m",
    Level::Warn => "\x1b[33m",
    Level::Info => "\x1b[34m",
    Level::Debug => "\x1b[36m",
    Level::Trace => "\x1b[90m",
  }
}

impl Log for StdoutLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= self.level
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      println!("\x1b[90m{} {}> {}\x1b[0m", now(), color(record.level()), record.args());
    }
  }

  fn flush(&self) {
    let _ = io::stdout().flush();
  }
}

pub fn now() -> String {
  let t = Local::now();

  format!("{month:0>2}/{day:0>2}/{year} {hour:0>2}:{min:0>2}:{secs:0>2}:{nsecs:0>9}",
          month = t.month(),
          day = t.day(),
          year = t.year(),
          hour = t.hour(),
          min = t.minute(),
          secs = t.second(),
          nsecs = t.nanosecond())
}

/// Map a verbosity count and a quiet switch to a level filter.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
  if quiet {
    return LevelFilter::Error;
  }

  match verbosity {
    0 => LevelFilter::Info,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}
