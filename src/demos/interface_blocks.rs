//! Grouping stage outputs in an interface block.
//!
//! Same pipeline as the passing-data demo, except the color travels in a `VS_OUT` block. Blocks
//! are matched by block name across stages; instance names are free to differ.

use crate::app::Demo;
use crate::demos::passing_data::tint;
use crate::demos::{orbit, DemoError, Resources, DARK_GREEN};
use crate::gpu::{Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;

const VS_SRC: &str = "\
#version 330 core

layout (location = 0) in vec4 offset;
layout (location = 1) in vec4 color;

out VS_OUT {
  vec4 color;
} vs_out;

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));

  gl_Position = vertices[gl_VertexID] + offset;
  vs_out.color = color;
}
";

const FS_SRC: &str = "\
#version 330 core

in VS_OUT {
  vec4 color;
} fs_in;

out vec4 color;

void main(void) {
  color = fs_in.color;
}
";

#[derive(Debug, Default)]
pub struct InterfaceBlocks {
  res: Resources,
}

impl<B> Demo<B> for InterfaceBlocks where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Pipeline: Interface Blocks"
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

  #[test]
  fn draws_with_block_program() {
    let calls = exercise(InterfaceBlocks::default(), 3.);

    assert!(matches!(calls[1], Call::UseProgram(Some(_))));
    assert_eq!(calls.last(), Some(&Call::Draw(Primitive::Triangles, 0, 3)));
  }
}
