//! Demo applications.

use std::fmt::Display;

use crate::gpu::RenderBackend;
use crate::time::Time;
use crate::window::ContextVersion;

pub mod runner;

/// Class of demo applications.
///
/// A demo is a render strategy plugged into a [`runner::Runner`]: it acquires its resources once,
/// draws a frame for a given time and gives everything back when the runner is done.
pub trait Demo<B>: Sized where B: RenderBackend {
  /// Startup error that might occur.
  type Error: Display;

  /// Title of the demo, used as default window title.
  fn title(&self) -> &'static str;

  /// Minimal context version the demo’s shaders need.
  fn context_version(&self) -> ContextVersion {
    ContextVersion::default()
  }

  /// Acquire resources. Called once, before the first frame.
  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error>;

  /// Render a frame at a given time.
  fn render(&mut self, backend: &mut B, t: Time);

  /// Release resources. Must be safe to call more than once.
  fn shutdown(&mut self, backend: &mut B);
}
