//! Command-line options.

use log::LevelFilter;
use structopt::StructOpt;

use crate::app::runner::Clock;
use crate::demos::DemoKind;
use crate::logger::level_filter;
use crate::time::{DurationSpec, Time};
use crate::window::{ContextVersion, WindowOpt};

#[derive(StructOpt, Debug)]
#[structopt(name = "shaderbook", about = "OpenGL SuperBible tutorial demos")]
pub struct Opt {
  /// Demo to run; use --list to see them all.
  #[structopt(required_unless = "list")]
  pub demo: Option<DemoKind>,

  /// List the available demos and exit.
  #[structopt(short = "l", long = "list")]
  pub list: bool,

  /// Width of the window.
  #[structopt(short = "w", long = "width", default_value = "640")]
  pub width: u32,

  /// Height of the window.
  #[structopt(short = "H", long = "height", default_value = "480")]
  pub height: u32,

  /// Title of the window. Defaults to the demo’s title.
  #[structopt(short = "t", long = "title")]
  pub title: Option<String>,

  /// OpenGL context version, as MAJOR.MINOR. Never lower than what the demo needs.
  #[structopt(long = "gl")]
  pub gl: Option<ContextVersion>,

  /// Number of MSAA samples.
  #[structopt(long = "samples")]
  pub samples: Option<u32>,

  /// Start the demo at a given time.
  ///
  /// The syntax is “MmSs”, where M is optional. M must be a natural specifiying the number of
  /// minutes and S a natural specifying the number of seconds. 30s will then be 30 seconds and 1m42s
  /// will be 1 minute and 42 seconds.
  #[structopt(short = "s", long = "start-at", default_value = "0s")]
  pub start_at: DurationSpec,

  /// Wrap time around after a given duration, with the same syntax as --start-at.
  #[structopt(short = "z", long = "wrap-at")]
  pub wrap_at: Option<DurationSpec>,

  /// Log more; repeat for even more.
  #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
  pub verbose: u8,

  /// Only log errors.
  #[structopt(short = "q", long = "quiet")]
  pub quiet: bool,
}

impl Opt {
  /// Window options for a demo with a given title and context version requirement.
  pub fn window_opt(&self, title: &str, required: ContextVersion) -> WindowOpt {
    WindowOpt {
      width: self.width,
      height: self.height,
      title: self.title.clone().unwrap_or_else(|| title.to_owned()),
      version: self.gl.map_or(required, |v| v.max(required)),
      samples: self.samples,
    }
  }

  pub fn clock(&self) -> Clock {
    Clock {
      start_at: self.start_at.into(),
      wrap_at: self.wrap_at.map(Time::from),
    }
  }

  pub fn log_level(&self) -> LevelFilter {
    level_filter(self.verbose, self.quiet)
  }
}
