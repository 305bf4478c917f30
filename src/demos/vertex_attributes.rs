//! Feeding the vertex stage through a vertex attribute.
//!
//! The attribute at location 0 isn’t backed by any buffer: its constant value is set right before
//! drawing and offsets every vertex of the triangle.

use crate::app::Demo;
use crate::demos::{orbit, DemoError, Resources, DARK_GREEN};
use crate::gpu::{Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

layout (location = 0) in vec4 offset;

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));

  gl_Position = vertices[gl_VertexID] + offset;
}
";

const FS_SRC: &str = "\
#version 330 core

out vec4 color;

void main(void) {
  color = vec4(0.0, 1.0, 1.0, 1.0);
}
";

#[derive(Debug, Default)]
pub struct VertexAttributes {
  res: Resources,
}

impl<B> Demo<B> for VertexAttributes where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Pipeline: Vertex Attributes"
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.res = Resources::acquire(backend, &[Stage::vertex(VS_SRC), Stage::fragment(FS_SRC)])?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, t: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.vertex_attrib(0, orbit(t.as_secs()));
    backend.draw_arrays(Primitive::Triangles, 0, 3);
  }

  fn shutdown(&mut self, backend: &mut B) {
    self.res.release(backend);
  }
}
