//! OpenGL SuperBible tutorial demos.
//!
//! Every demo is a small render strategy (see [`app::Demo`]) run by a shared lifecycle host
//! ([`app::runner::Runner`]) on top of a windowing [`window::Platform`]. The only piece with some
//! logic in it is the shader program builder in [`shader`].

pub mod app;
pub mod demos;
pub mod gl33;
pub mod gpu;
pub mod logger;
pub mod opt;
pub mod shader;
pub mod time;
pub mod window;

pub use app::runner::{Clock, Error, Runner, State};
pub use app::Demo;
pub use demos::{DemoError, DemoKind};
pub use gl33::Gl33;
pub use gpu::{Buffer, PolygonMode, Primitive, RenderBackend, VertexArray};
pub use logger::StdoutLogger;
pub use opt::Opt;
pub use shader::{build_program, BuildError, CompileError, Program, ShaderBackend, Stage, StageKind};
pub use time::{DurationSpec, Time};
#[cfg(feature = "glfw-platform")]
pub use window::glfw::GlfwPlatform;
pub use window::{ContextVersion, Platform, PlatformError, WindowOpt};
