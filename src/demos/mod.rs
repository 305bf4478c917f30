//! Tutorial demos.
//!
//! Each demo follows a chapter of the OpenGL SuperBible: starting from clearing the back buffer up
//! to tessellation, geometry and compute shaders. Demos are picked by name on the command line;
//! see [`DemoKind`].

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::gpu::{RenderBackend, VertexArray};
use crate::shader::{build_program, BuildError, Program, Stage};

pub mod clear;
pub mod color_animation;
pub mod compute;
pub mod first_triangle;
pub mod fragment_interpolation;
pub mod geometry;
pub mod interface_blocks;
pub mod passing_data;
pub mod point;
pub mod tessellation;
pub mod triangle;
pub mod vertex_attributes;

pub use self::clear::Clear;
pub use self::color_animation::ColorAnimation;
pub use self::compute::Compute;
pub use self::first_triangle::FirstTriangle;
pub use self::fragment_interpolation::FragmentInterpolation;
pub use self::geometry::Geometry;
pub use self::interface_blocks::InterfaceBlocks;
pub use self::passing_data::PassingData;
pub use self::point::Point;
pub use self::tessellation::Tessellation;
pub use self::triangle::Triangle;
pub use self::vertex_attributes::VertexAttributes;

pub const RED: [f32; 4] = [1., 0., 0., 1.];
pub const DARK_GREEN: [f32; 4] = [0., 0.25, 0., 1.];

/// Offset moving the triangle around over time.
pub fn orbit(t: f64) -> [f32; 4] {
  [(t.sin() * 0.5) as f32, (t.cos() * 0.6) as f32, 0., 0.]
}

/// Errors that can occur while starting a demo up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DemoError {
  Build(BuildError),
  CannotCreateVertexArray,
  CannotCreateBuffer,
}

impl fmt::Display for DemoError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      DemoError::Build(ref e) => e.fmt(f),
      DemoError::CannotCreateVertexArray => f.write_str("cannot create vertex array object"),
      DemoError::CannotCreateBuffer => f.write_str("cannot create buffer object"),
    }
  }
}

impl Error for DemoError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match *self {
      DemoError::Build(ref e) => Some(e),
      DemoError::CannotCreateVertexArray | DemoError::CannotCreateBuffer => None,
    }
  }
}

impl From<BuildError> for DemoError {
  fn from(e: BuildError) -> Self {
    DemoError::Build(e)
  }
}

/// Program and bound vertex array most demos draw with.
#[derive(Debug, Default)]
pub struct Resources {
  program: Option<Program>,
  vao: Option<VertexArray>,
}

impl Resources {
  /// Build a program from stages and bind a fresh vertex array.
  ///
  /// The program is released again if the vertex array can’t be created.
  pub fn acquire<B>(backend: &mut B, stages: &[Stage]) -> Result<Self, DemoError> where B: RenderBackend {
    let mut program = build_program(backend, stages)?;

    match VertexArray::bound(backend) {
      Some(vao) => Ok(Resources { program: Some(program), vao: Some(vao) }),
      None => {
        program.release(backend);
        Err(DemoError::CannotCreateVertexArray)
      }
    }
  }

  pub fn program(&self) -> Option<&Program> {
    self.program.as_ref()
  }

  pub fn release<B>(&mut self, backend: &mut B) where B: RenderBackend {
    if let Some(ref mut vao) = self.vao {
      vao.release(backend);
    }

    if let Some(ref mut program) = self.program {
      program.release(backend);
    }
  }
}

/// All the demos, in tutorial order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DemoKind {
  Clear,
  ColorAnimation,
  Point,
  Triangle,
  FirstTriangle,
  VertexAttributes,
  PassingData,
  InterfaceBlocks,
  FragmentInterpolation,
  Tessellation,
  Geometry,
  Compute,
}

impl DemoKind {
  pub const ALL: [DemoKind; 12] = [
    DemoKind::Clear,
    DemoKind::ColorAnimation,
    DemoKind::Point,
    DemoKind::Triangle,
    DemoKind::FirstTriangle,
    DemoKind::VertexAttributes,
    DemoKind::PassingData,
    DemoKind::InterfaceBlocks,
    DemoKind::FragmentInterpolation,
    DemoKind::Tessellation,
    DemoKind::Geometry,
    DemoKind::Compute,
  ];

  pub fn name(self) -> &'static str {
    match self {
      DemoKind::Clear => "clear",
      DemoKind::ColorAnimation => "color-animation",
      DemoKind::Point => "point",
      DemoKind::Triangle => "triangle",
      DemoKind::FirstTriangle => "first-triangle",
      DemoKind::VertexAttributes => "vertex-attributes",
      DemoKind::PassingData => "passing-data",
      DemoKind::InterfaceBlocks => "interface-blocks",
      DemoKind::FragmentInterpolation => "fragment-interpolation",
      DemoKind::Tessellation => "tessellation",
      DemoKind::Geometry => "geometry",
      DemoKind::Compute => "compute",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      DemoKind::Clear => "clear the window to red",
      DemoKind::ColorAnimation => "animate the clear color over time",
      DemoKind::Point => "draw a single big point",
      DemoKind::Triangle => "draw a hard-coded triangle",
      DemoKind::FirstTriangle => "draw a triangle read from a vertex buffer",
      DemoKind::VertexAttributes => "move the triangle with a vertex attribute",
      DemoKind::PassingData => "forward a color from the vertex to the fragment stage",
      DemoKind::InterfaceBlocks => "forward stage outputs through an interface block",
      DemoKind::FragmentInterpolation => "interpolate per-vertex colors",
      DemoKind::Tessellation => "tessellate a triangle patch (OpenGL 4.1)",
      DemoKind::Geometry => "turn tessellated triangles into points (OpenGL 4.1)",
      DemoKind::Compute => "dispatch an empty compute shader (OpenGL 4.3)",
    }
  }
}

impl fmt::Display for DemoKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.write_str(self.name())
  }
}

impl FromStr for DemoKind {
  type Err = UnknownDemo;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DemoKind::ALL
      .iter()
      .cloned()
      .find(|kind| kind.name() == s)
      .ok_or_else(|| UnknownDemo(s.to_owned()))
  }
}

/// Error raised when a demo name doesn’t exist.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownDemo(pub String);

impl fmt::Display for UnknownDemo {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "unknown demo {}; available demos:", self.0)?;

    for kind in &DemoKind::ALL {
      write!(f, " {}", kind)?;
    }

    Ok(())
  }
}

impl Error for UnknownDemo {}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::app::Demo;
  use crate::gpu::tests::Call;
  use crate::shader::tests::BackendImpl;
  use crate::time::Time;

  /// Start a demo up, render one frame at `t`, shut it down twice and check nothing leaked.
  ///
  /// Returns the calls issued by the rendered frame.
  pub fn exercise<D>(mut demo: D, t: f64) -> Vec<Call> where D: Demo<BackendImpl> {
    let mut backend = BackendImpl::new();

    assert!(demo.startup(&mut backend).is_ok(), "{} failed to start", demo.title());
    assert_eq!(backend.live_shaders(), 0);

    backend.calls.clear();
    demo.render(&mut backend, Time::from_secs(t));
    let calls = backend.calls.clone();

    demo.shutdown(&mut backend);
    demo.shutdown(&mut backend);

    assert!(!backend.leaks(), "{} leaked objects", demo.title());
    assert_eq!(backend.double_deletes, 0);

    calls
  }

  #[test]
  fn demo_names_round_trip() {
    for kind in &DemoKind::ALL {
      assert_eq!(kind.name().parse(), Ok(*kind));
    }

    let err = "hello".parse::<DemoKind>().unwrap_err();
    assert!(err.to_string().contains("tessellation"));
  }

  #[test]
  fn resources_are_released_when_build_fails() {
    let mut backend = BackendImpl::new();
    let stages = [Stage::vertex(crate::shader::tests::BROKEN_SRC)];

    match Resources::acquire(&mut backend, &stages) {
      Err(DemoError::Build(e)) => assert_eq!(e.compile_errors().len(), 1),
      r => panic!("expected a build error, got {:?}", r),
    }

    assert!(!backend.leaks());
  }

  #[test]
  fn orbit_follows_time() {
    assert_eq!(orbit(0.), [0., 0.6, 0., 0.]);
  }
}
