//! Tessellation.
//!
//! The triangle is submitted as a three-vertex patch. The control stage sets every tessellation
//! level to 5, the fixed-function tessellator subdivides the patch and the evaluation stage places
//! the generated vertices from their barycentric coordinates. Drawn in wireframe so that the
//! subdivision is visible, and moved around with the same offset attribute as the vertex
//! attributes demo.

use crate::app::Demo;
use crate::demos::{orbit, DemoError, Resources, DARK_GREEN};
use crate::gpu::{PolygonMode, Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;
use crate::window::ContextVersion;

const VS_SRC: &str = "\
#version 410 core

layout (location = 0) in vec4 offset;

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));

  gl_Position = vertices[gl_VertexID] + offset;
}
";

pub(crate) const TCS_SRC: &str = "\
#version 410 core

layout (vertices = 3) out;

void main(void) {
  if (gl_InvocationID == 0) {
    gl_TessLevelInner[0] = 5.0;
    gl_TessLevelOuter[0] = 5.0;
    gl_TessLevelOuter[1] = 5.0;
    gl_TessLevelOuter[2] = 5.0;
  }

  gl_out[gl_InvocationID].gl_Position = gl_in[gl_InvocationID].gl_Position;
}
";

pub(crate) const TES_SRC: &str = "\
#version 410 core

layout (triangles, equal_spacing, cw) in;

void main(void) {
  gl_Position = gl_TessCoord.x * gl_in[0].gl_Position +
                gl_TessCoord.y * gl_in[1].gl_Position +
                gl_TessCoord.z * gl_in[2].gl_Position;
}
";

pub(crate) const FS_SRC: &str = "\
#version 410 core

out vec4 color;

void main(void) {
  color = vec4(0.0, 1.0, 1.0, 1.0);
}
";

/// Control points per patch.
pub(crate) const PATCH_VERTICES: u32 = 3;

#[derive(Debug, Default)]
pub struct Tessellation {
  res: Resources,
}

impl<B> Demo<B> for Tessellation where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Tessellation"
  }

  fn context_version(&self) -> ContextVersion {
    ContextVersion::new(4, 1)
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    let stages = [
      Stage::vertex(VS_SRC),
      Stage::tess_control(TCS_SRC),
      Stage::tess_evaluation(TES_SRC),
      Stage::fragment(FS_SRC),
    ];

    self.res = Resources::acquire(backend, &stages)?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, t: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.vertex_attrib(0, orbit(t.as_secs()));
    backend.polygon_mode(PolygonMode::Line);
    backend.patch_vertices(PATCH_VERTICES);
    backend.draw_arrays(Primitive::Patches, 0, PATCH_VERTICES);
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

  #[test]
  fn draws_wireframe_patches() {
    let calls = exercise(Tessellation::default(), 1.5);

    assert_eq!(
      &calls[2..],
      &[
        Call::VertexAttrib(0, orbit(1.5)),
        Call::PolygonMode(PolygonMode::Line),
        Call::PatchVertices(3),
        Call::Draw(Primitive::Patches, 0, 3),
      ]
    );
  }

  #[test]
  fn needs_gl_41() {
    let demo = Tessellation::default();
    assert_eq!(Demo::<BackendImpl>::context_version(&demo), ContextVersion::new(4, 1));
  }
}
