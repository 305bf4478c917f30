//! Animate the clear color over time.

use log::trace;

use crate::app::Demo;
use crate::demos::DemoError;
use crate::gpu::RenderBackend;
use crate::time::Time;

#[derive(Clone, Copy, Debug, Default)]
pub struct ColorAnimation;

/// Clear color at a given time; red and green channels oscillate in opposite phase.
pub fn color_at(t: Time) -> [f32; 4] {
  let t = t.as_secs();
  [(t.sin() * 0.5 + 0.5) as f32, (t.cos() * 0.5 + 0.5) as f32, 0., 1.]
}

impl<B> Demo<B> for ColorAnimation where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Color Animation"
  }

  fn startup(&mut self, _: &mut B) -> Result<(), Self::Error> {
    Ok(())
  }

  fn render(&mut self, backend: &mut B, t: Time) {
    trace!("t = {}", t);
    backend.clear_color(color_at(t));
  }

  fn shutdown(&mut self, _: &mut B) {}
}
