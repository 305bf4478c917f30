//! First shaders: a single big point in the middle of the screen.

use crate::app::Demo;
use crate::demos::{DemoError, Resources, DARK_GREEN};
use crate::gpu::{Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

void main(void) {
  gl_Position = vec4(0.0, 0.0, 0.5, 1.0);
}
";

const FS_SRC: &str = "\
#version 330 core

out vec4 color;

void main(void) {
  color = vec4(0.0, 0.8, 1.0, 1.0);
}
";

#[derive(Debug, Default)]
pub struct Point {
  res: Resources,
}

impl<B> Demo<B> for Point where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Hello Shaders"
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.res = Resources::acquire(backend, &[Stage::vertex(VS_SRC), Stage::fragment(FS_SRC)])?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.point_size(40.);
    backend.draw_arrays(Primitive::Points, 0, 1);
  }

  fn shutdown(&mut self, backend: &mut B) {
    self.res.release(backend);
  }
}
