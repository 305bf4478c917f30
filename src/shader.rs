//! Shader programs.
//!
//! A shader program is a piece of code that runs on GPU, consuming vertices, patches, primitives
//! and fragments (or, for compute programs, arbitrary work groups). You never build shader objects
//! by hand: you hand a list of *stages* to [`build_program`] and are given back a linked
//! [`Program`], or a [`BuildError`] carrying the driver’s diagnostics.
//!
//! Shader objects only live for the duration of a build. Once linking has been attempted, they’re
//! all destroyed; the program is the only thing that survives.

use log::{debug, error};
use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Kind of a shader stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageKind {
  Vertex,
  TessellationControl,
  TessellationEvaluation,
  Geometry,
  Fragment,
  Compute,
}

impl StageKind {
  /// Short name of the stage, as used in diagnostics and accepted by `FromStr`.
  pub fn name(self) -> &'static str {
    match self {
      StageKind::Vertex => "vertex",
      StageKind::TessellationControl => "tess-control",
      StageKind::TessellationEvaluation => "tess-evaluation",
      StageKind::Geometry => "geometry",
      StageKind::Fragment => "fragment",
      StageKind::Compute => "compute",
    }
  }
}

impl fmt::Display for StageKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.write_str(self.name())
  }
}

impl FromStr for StageKind {
  type Err = UnknownStageKind;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "vertex" => Ok(StageKind::Vertex),
      "tess-control" => Ok(StageKind::TessellationControl),
      "tess-evaluation" => Ok(StageKind::TessellationEvaluation),
      "geometry" => Ok(StageKind::Geometry),
      "fragment" => Ok(StageKind::Fragment),
      "compute" => Ok(StageKind::Compute),
      _ => Err(UnknownStageKind(s.to_owned())),
    }
  }
}

/// Error raised when parsing an unknown stage name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownStageKind(pub String);

impl fmt::Display for UnknownStageKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "unknown shader stage: {}", self.0)
  }
}

impl Error for UnknownStageKind {}

/// Source of a single stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stage<'a> {
  pub kind: StageKind,
  pub src: &'a str,
}

impl<'a> Stage<'a> {
  pub fn new(kind: StageKind, src: &'a str) -> Self {
    Stage { kind, src }
  }

  pub fn vertex(src: &'a str) -> Self {
    Self::new(StageKind::Vertex, src)
  }

  pub fn tess_control(src: &'a str) -> Self {
    Self::new(StageKind::TessellationControl, src)
  }

  pub fn tess_evaluation(src: &'a str) -> Self {
    Self::new(StageKind::TessellationEvaluation, src)
  }

  pub fn geometry(src: &'a str) -> Self {
    Self::new(StageKind::Geometry, src)
  }

  pub fn fragment(src: &'a str) -> Self {
    Self::new(StageKind::Fragment, src)
  }

  pub fn compute(src: &'a str) -> Self {
    Self::new(StageKind::Compute, src)
  }
}

/// Native name of a shader object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ShaderId(pub NonZeroU32);

/// Native name of a program object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ProgramId(pub NonZeroU32);

/// Shader and program object operations of a graphics API.
///
/// Creation functions return `None` when the API hands back the null name.
pub trait ShaderBackend {
  fn create_shader(&mut self, kind: StageKind) -> Option<ShaderId>;

  fn shader_source(&mut self, shader: ShaderId, src: &str);

  fn compile_shader(&mut self, shader: ShaderId);

  fn shader_compile_status(&mut self, shader: ShaderId) -> bool;

  /// Full information log of a shader object; empty if the driver has nothing to say.
  fn shader_info_log(&mut self, shader: ShaderId) -> String;

  fn delete_shader(&mut self, shader: ShaderId);

  fn create_program(&mut self) -> Option<ProgramId>;

  fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

  fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);

  fn link_program(&mut self, program: ProgramId);

  fn program_link_status(&mut self, program: ProgramId) -> bool;

  fn program_info_log(&mut self, program: ProgramId) -> String;

  fn delete_program(&mut self, program: ProgramId);
}

/// Linked shader program.
///
/// The program is alive until [`Program::release`] is called. Releasing is idempotent: the native
/// object is deleted on the first call only.
#[derive(Debug, Eq, PartialEq)]
pub struct Program {
  id: Option<ProgramId>,
}

impl Program {
  fn new(id: ProgramId) -> Self {
    Program { id: Some(id) }
  }

  /// Native name of the program, if it hasn’t been released yet.
  pub fn id(&self) -> Option<ProgramId> {
    self.id
  }

  pub fn is_live(&self) -> bool {
    self.id.is_some()
  }

  pub fn release<B>(&mut self, backend: &mut B) where B: ?Sized + ShaderBackend {
    if let Some(id) = self.id.take() {
      debug!("deleting program {}", id.0);
      backend.delete_program(id);
    }
  }
}

/// Native object kinds the builder creates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind {
  Shader(StageKind),
  Program,
}

impl fmt::Display for ObjectKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ObjectKind::Shader(kind) => write!(f, "{} shader object", kind),
      ObjectKind::Program => f.write_str("program object"),
    }
  }
}

/// Reasons a set of stages cannot form a program.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageSetError {
  NoStage,
  MissingVertexStage,
  ComputeNotAlone,
  DuplicateStage(StageKind),
}

impl fmt::Display for StageSetError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageSetError::NoStage => f.write_str("no stage"),
      StageSetError::MissingVertexStage => f.write_str("graphics programs need a vertex stage"),
      StageSetError::ComputeNotAlone => f.write_str("a compute stage must be the only stage"),
      StageSetError::DuplicateStage(kind) => write!(f, "{} stage given more than once", kind),
    }
  }
}

/// Compilation failure of a single stage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileError {
  pub kind: StageKind,
  pub log: String,
}

impl fmt::Display for CompileError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{} stage failed to compile:\n{}", self.kind, self.log)
  }
}

impl Error for CompileError {}

/// Errors that can be risen while building a program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
  InvalidStages(StageSetError),
  CannotCreate(ObjectKind),
  /// One entry per stage that failed, in submission order.
  Compile(Vec<CompileError>),
  Link { log: String },
}

impl BuildError {
  /// Stages that failed to compile, if that’s what happened.
  pub fn compile_errors(&self) -> &[CompileError] {
    match *self {
      BuildError::Compile(ref errors) => errors,
      _ => &[],
    }
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BuildError::InvalidStages(ref e) => write!(f, "invalid stages: {}", e),
      BuildError::CannotCreate(kind) => write!(f, "cannot create {}", kind),
      BuildError::Compile(ref errors) => {
        write!(f, "{} stage(s) failed to compile", errors.len())?;

        for e in errors {
          write!(f, "\n{}", e)?;
        }

        Ok(())
      }
      BuildError::Link { ref log } => write!(f, "program failed to link:\n{}", log),
    }
  }
}

impl Error for BuildError {}

impl From<StageSetError> for BuildError {
  fn from(e: StageSetError) -> Self {
    BuildError::InvalidStages(e)
  }
}

fn check_stages(stages: &[Stage]) -> Result<(), StageSetError> {
  if stages.is_empty() {
    return Err(StageSetError::NoStage);
  }

  for (i, stage) in stages.iter().enumerate() {
    if stages[..i].iter().any(|s| s.kind == stage.kind) {
      return Err(StageSetError::DuplicateStage(stage.kind));
    }
  }

  let has_compute = stages.iter().any(|s| s.kind == StageKind::Compute);

  if has_compute {
    if stages.len() > 1 {
      return Err(StageSetError::ComputeNotAlone);
    }
  } else if !stages.iter().any(|s| s.kind == StageKind::Vertex) {
    return Err(StageSetError::MissingVertexStage);
  }

  Ok(())
}

/// Create a shader object for a stage and compile it.
///
/// On failure the shader object is destroyed and its log is returned.
pub fn compile_stage<B>(backend: &mut B, stage: &Stage) -> Result<Option<ShaderId>, CompileError>
where B: ?Sized + ShaderBackend {
  let shader = match backend.create_shader(stage.kind) {
    Some(shader) => shader,
    None => return Ok(None),
  };

  backend.shader_source(shader, stage.src);
  backend.compile_shader(shader);

  if backend.shader_compile_status(shader) {
    debug!("compiled {} stage", stage.kind);
    Ok(Some(shader))
  } else {
    let log = backend.shader_info_log(shader);
    backend.delete_shader(shader);

    error!("{} stage failed to compile", stage.kind);
    for line in log.lines() {
      error!("  {}", line);
    }

    Err(CompileError { kind: stage.kind, log })
  }
}

/// Compile and link a set of stages into a program.
///
/// Every stage is compiled before anything gets attached, so that all compilation errors are
/// reported at once. No shader object outlives this call.
pub fn build_program<B>(backend: &mut B, stages: &[Stage]) -> Result<Program, BuildError>
where B: ?Sized + ShaderBackend {
  check_stages(stages)?;

  let mut shaders = Vec::with_capacity(stages.len());
  let mut errors = Vec::new();

  for stage in stages {
    match compile_stage(backend, stage) {
      Ok(Some(shader)) => shaders.push(shader),
      Ok(None) => {
        delete_shaders(backend, &shaders);
        return Err(BuildError::CannotCreate(ObjectKind::Shader(stage.kind)));
      }
      Err(e) => errors.push(e),
    }
  }

  if !errors.is_empty() {
    delete_shaders(backend, &shaders);
    return Err(BuildError::Compile(errors));
  }

  let program = match backend.create_program() {
    Some(program) => program,
    None => {
      delete_shaders(backend, &shaders);
      return Err(BuildError::CannotCreate(ObjectKind::Program));
    }
  };

  for &shader in &shaders {
    backend.attach_shader(program, shader);
  }

  backend.link_program(program);

  // the program owns the compiled code now
  for &shader in &shaders {
    backend.detach_shader(program, shader);
  }

  delete_shaders(backend, &shaders);

  if backend.program_link_status(program) {
    debug!("linked program {} from {} stage(s)", program.0, stages.len());
    Ok(Program::new(program))
  } else {
    let log = backend.program_info_log(program);
    backend.delete_program(program);

    error!("program failed to link");
    for line in log.lines() {
      error!("  {}", line);
    }

    Err(BuildError::Link { log })
  }
}

fn delete_shaders<B>(backend: &mut B, shaders: &[ShaderId]) where B: ?Sized + ShaderBackend {
  for &shader in shaders {
    backend.delete_shader(shader);
  }
}
