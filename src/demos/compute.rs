//! Compute shader stub.
//!
//! A compute program stands on its own: no other stage can be linked with it. The shader declares
//! a 32×32 local work group and does nothing; it’s dispatched once per frame.

use crate::app::Demo;
use crate::demos::{DemoError, DARK_GREEN};
use crate::gpu::RenderBackend;
use crate::shader::{build_program, Program, Stage};
use crate::time::Time;
use crate::window::ContextVersion;

const CS_SRC: &str = "\
#version 430 core

layout (local_size_x = 32, local_size_y = 32) in;

void main(void) {
}
";

#[derive(Debug, Default)]
pub struct Compute {
  program: Option<Program>,
}

impl<B> Demo<B> for Compute where B: RenderBackend {
  type Error = DemoError;

  fn title(&self) -> &'static str {
    "Compute Shader"
  }

  fn context_version(&self) -> ContextVersion {
    ContextVersion::new(4, 3)
  }

  fn startup(&mut self, backend: &mut B) -> Result<(), Self::Error> {
    self.program = Some(build_program(backend, &[Stage::compute(CS_SRC)])?);
    Ok(())
  }

  fn render(&mut self, backend: &mut B, _: Time) {
    backend.clear_color(DARK_GREEN);
    backend.use_program(self.program.as_ref());
    backend.dispatch_compute([1, 1, 1]);
  }

  fn shutdown(&mut self, backend: &mut B) {
    if let Some(ref mut program) = self.program {
      program.release(backend);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::demos::tests::exercise;
  use crate::gpu::tests::Call;

  #[test]
  fn dispatches_one_group() {
    let calls = exercise(Compute::default(), 0.);
    assert_eq!(calls.last(), Some(&Call::Dispatch([1, 1, 1])));
  }
}
