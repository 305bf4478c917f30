//! Per-vertex colors, interpolated across the triangle by the rasterizer.

use crate::app::Demo;
use crate::demos::{DemoError, Resources, DARK_GREEN};
use crate::gpu::{Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

out vec4 vs_color;

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));
  const vec4 colors[3] = vec4[3](vec4(1.0, 0.0, 0.0, 1.0),
                                 vec4(0.0, 1.0, 0.0, 1.0),
                                 vec4(0.0, 0.0, 1.0, 1.0));

  gl_Position = vertices[gl_VertexID];
  vs_color = colors[gl_VertexID];
}
";

const FS_SRC: &str = "\
#version 330 core

in vec4 vs_color;

out vec4 color;

void main(void) {
  color = vs_color;
}
";

#[derive(Debug, Default)]
pub struct FragmentInterpolation {
  res: Resources,
}

impl<B> Demo<B> for FragmentInterpolation where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Fragment Interpolation"
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.res = Resources::acquire(backend, &[Stage::vertex(VS_SRC), Stage::fragment(FS_SRC)])?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.draw_arrays(Primitive::Triangles, 0, 3);
  }

  fn shutdown(&mut self, backend: &mut B) {
    self.res.release(backend);
  }
}
