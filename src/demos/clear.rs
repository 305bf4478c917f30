//! Clear the back buffer to a solid color.

use crate::app::Demo;
use crate::demos::{DemoError, RED};
use crate::gpu::RenderBackend;
use crate::time::Time;

#[derive(Clone, Copy, Debug, Default)]
pub struct Clear;

impl<B> Demo<B> for Clear where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Hello OpenGL"
  }

  fn startup(&mut self, _: &mut B) -> Result<(), Self::Error> {
    Ok(())
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(RED);
  }

  fn shutdown(&mut self, _: &mut B) {}
}
