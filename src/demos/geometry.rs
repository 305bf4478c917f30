//! Geometry shader.
//!
//! Runs once per primitive, after tessellation and before rasterization. Here it turns every
//! tessellated triangle into its three corner points, drawn 5 pixels wide.

use crate::app::Demo;
use crate::demos::tessellation::{FS_SRC, PATCH_VERTICES, TCS_SRC, TES_SRC};
use crate::demos::{DemoError, Resources, DARK_GREEN};
use crate::gpu::{PolygonMode, Primitive, RenderBackend};
use crate::shader::Stage;
use crate::time::Time;
use crate::window::ContextVersion;

const VS_SRC: &str = "\
#version 410 core

void main(void) {
  const vec4 vertices[3] = vec4[3](vec4(0.25, -0.25, 0.5, 1.0),
                                   vec4(-0.25, -0.25, 0.5, 1.0),
                                   vec4(0.25, 0.25, 0.5, 1.0));

  gl_Position = vertices[gl_VertexID];
}
";

const GS_SRC: &str = "\
#version 410 core

layout (triangles) in;
layout (points, max_vertices = 3) out;

void main(void) {
  for (int i = 0; i < gl_in.length(); i++) {
    gl_Position = gl_in[i].gl_Position;
    EmitVertex();
  }
}
";

#[derive(Debug, Default)]
pub struct Geometry {
  res: Resources,
}

impl<B> Demo<B> for Geometry where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Geometry Shader"
  }

  fn context_version(&self) -> ContextVersion {
    ContextVersion::new(4, 1)
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    let stages = [
      Stage::vertex(VS_SRC),
      Stage::tess_control(TCS_SRC),
      Stage::tess_evaluation(TES_SRC),
      Stage::geometry(GS_SRC),
      Stage::fragment(FS_SRC),
    ];

    self.res = Resources::acquire(backend, &stages)?;
    Ok(())
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.res.program());
    backend.polygon_mode(PolygonMode::Line);
    backend.point_size(5.);
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

  #[test]
  fn draws_enlarged_points_from_patches() {
    let calls = exercise(Geometry::default(), 0.);

    assert!(calls.contains(&Call::PointSize(5.)));
    assert_eq!(calls.last(), Some(&Call::Draw(Primitive::Patches, 0, 3)));
  }
}
