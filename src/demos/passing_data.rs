//! Passing data from the vertex stage to the fragment stage.
//!
//! A second attribute carries a color, which the vertex shader forwards to the fragment shader
//! through the `vs_color` output.

use crate::app::Demo;
use crate::demos::{orbit, DemoError, Resources, DARK_GREEN};
use crate::gpu::{Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

layout (location = 0) in vec4 offset;
layout (location = 1) in vec4 color;

out vec4 vs_color;

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));

  gl_Position = vertices[gl_VertexID] + offset;
  vs_color = color;
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

/// Triangle color at a given time.
pub fn tint(t: f64) -> [f32; 4] {
  [(t.sin() * 0.5 + 0.5) as f32, (t.cos() * 0.5 + 0.5) as f32, 0., 1.]
}

#[derive(Debug, Default)]
pub struct PassingData {
  res: Resources,
}

impl<B> Demo<B> for PassingData where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Pipeline: Passing Data"
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.res = Resources::acquire(backend, &[Stage::vertex(VS_SRC), Stage::fragment(FS_SRC)])?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, t: Time) {
    let t = t.as_secs();

    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.vertex_attrib(0, orbit(t));
    backend.vertex_attrib(1, tint(t));
    backend.draw_arrays(Primitive::Triangles, 0, 3);
  }

  fn shutdown(&mut self, backend: &mut B) {
    self.res.release(backend);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::demos::tests::exercise;
  use crate::gpu::tests::Call;
  use crate::shader::tests::BackendImpl;
  use crate::shader::{build_program, BuildError};

  #[test]
  fn both_attributes_are_set() {
    let calls = exercise(PassingData::default(), 0.5);

    assert_eq!(calls[2], Call::VertexAttrib(0, orbit(0.5)));
    assert_eq!(calls[3], Call::VertexAttrib(1, tint(0.5)));
  }

  #[test]
  fn fragment_input_needs_the_vertex_output() {
    let vs = VS_SRC.replace("out vec4 vs_color;", "").replace("vs_color = color;", "");
    let mut backend = BackendImpl::new();

    match build_program(&mut backend, &[Stage::vertex(&vs), Stage::fragment(FS_SRC)]) {
      Err(BuildError::Link { log }) => assert!(log.contains("vs_color")),
      r => panic!("expected a link error, got {:?}", r),
    }

    assert!(!backend.leaks());
  }
}
