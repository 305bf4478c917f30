//! The first triangle, read from a vertex buffer.
//!
//! Unlike the other triangles, the vertex positions live in an array buffer filled once at startup.
//! Attribute 0 is pointed at that buffer for the duration of the draw.

use crate::app::Demo;
use crate::demos::{DemoError, Resources, DARK_GREEN};
use crate::gpu::{Buffer, Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

layout (location = 0) in vec3 position;

void main(void) {
  gl_Position = vec4(position, 1.0);
}
";

const FS_SRC: &str = "\
#version 330 core

out vec4 color;

void main(void) {
  color = vec4(1.0, 0.0, 0.0, 1.0);
}
";

/// Three (x, y, z) vertices.
const VERTICES: [f32; 9] = [
  -1., -1., 0.,
  1., -1., 0.,
  0., 1., 0.,
];

const POSITION: u32 = 0;

#[derive(Debug, Default)]
pub struct FirstTriangle {
  res: Resources,
  vertices: Option<Buffer>,
}

impl<B> Demo<B> for FirstTriangle where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "The First Triangle"
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.res = Resources::acquire(backend, &[Stage::vertex(VS_SRC), Stage::fragment(FS_SRC)])?;

    match Buffer::from_slice(backend, &VERTICES) {
      Some(buffer) => {
        self.vertices = Some(buffer);
        Ok(())
      }

      None => {
        self.res.release(backend);
        Err(DemoError::CannotCreateBuffer)
      }
    }
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());

    if let Some(ref vertices) = self.vertices {
      backend.enable_vertex_attrib_array(POSITION);
      vertices.bind(backend);
      backend.vertex_attrib_pointer(POSITION, 3);
      backend.draw_arrays(Primitive::Triangles, 0, 3);
      backend.disable_vertex_attrib_array(POSITION);
    }
  }

  fn shutdown(&mut self, backend: &mut B) {
    if let Some(ref mut vertices) = self.vertices {
      vertices.release(backend);
    }

    self.res.release(backend);
  }
}
