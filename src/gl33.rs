//! OpenGL backend.
//!
//! Thin layer over the `gl` crate’s function pointers. Requires a current context and loaded
//! pointers; the only way to get a [`Gl33`] is [`Gl33::load_with`].

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use std::mem;
use std::num::NonZeroU32;
use std::os::raw::c_void;
use std::ptr;

use crate::gpu::{BufferId, PolygonMode, Primitive, RenderBackend, VertexArrayId};
use crate::shader::{Program, ProgramId, ShaderBackend, ShaderId, StageKind};

#[derive(Debug)]
pub struct Gl33 {
  _priv: (),
}

impl Gl33 {
  /// Load the OpenGL function pointers of the current context.
  pub fn load_with<F>(loader: F) -> Self where F: FnMut(&'static str) -> *const c_void {
    gl::load_with(loader);
    Gl33 { _priv: () }
  }
}

fn stage_type(kind: StageKind) -> GLenum {
  match kind {
    StageKind::Vertex => gl::VERTEX_SHADER,
    StageKind::TessellationControl => gl::TESS_CONTROL_SHADER,
    StageKind::TessellationEvaluation => gl::TESS_EVALUATION_SHADER,
    StageKind::Geometry => gl::GEOMETRY_SHADER,
    StageKind::Fragment => gl::FRAGMENT_SHADER,
    StageKind::Compute => gl::COMPUTE_SHADER,
  }
}

fn primitive_mode(primitive: Primitive) -> GLenum {
  match primitive {
    Primitive::Points => gl::POINTS,
    Primitive::Lines => gl::LINES,
    Primitive::Triangles => gl::TRIANGLES,
    Primitive::Patches => gl::PATCHES,
  }
}

/// Turn a raw info log into a string, dropping the trailing NUL.
fn log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
  buf.truncate(written.max(0) as usize);
  String::from_utf8_lossy(&buf).into_owned()
}

impl ShaderBackend for Gl33 {
  fn create_shader(&mut self, kind: StageKind) -> Option<ShaderId> {
    let name = unsafe { gl::CreateShader(stage_type(kind)) };
    NonZeroU32::new(name).map(ShaderId)
  }

  fn shader_source(&mut self, shader: ShaderId, src: &str) {
    let ptr = src.as_ptr() as *const GLchar;
    let len = src.len() as GLint;

    unsafe { gl::ShaderSource(shader.0.get(), 1, &ptr, &len) };
  }

  fn compile_shader(&mut self, shader: ShaderId) {
    unsafe { gl::CompileShader(shader.0.get()) };
  }

  fn shader_compile_status(&mut self, shader: ShaderId) -> bool {
    let mut status: GLint = gl::FALSE as GLint;
    unsafe { gl::GetShaderiv(shader.0.get(), gl::COMPILE_STATUS, &mut status) };

    status == gl::TRUE as GLint
  }

  fn shader_info_log(&mut self, shader: ShaderId) -> String {
    let mut len: GLint = 0;
    unsafe { gl::GetShaderiv(shader.0.get(), gl::INFO_LOG_LENGTH, &mut len) };

    if len <= 0 {
      return String::new();
    }

    // the length includes the NUL terminator
    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    unsafe { gl::GetShaderInfoLog(shader.0.get(), len, &mut written, buf.as_mut_ptr() as *mut GLchar) };

    log_to_string(buf, written)
  }

  fn delete_shader(&mut self, shader: ShaderId) {
    unsafe { gl::DeleteShader(shader.0.get()) };
  }

  fn create_program(&mut self) -> Option<ProgramId> {
    let name = unsafe { gl::CreateProgram() };
    NonZeroU32::new(name).map(ProgramId)
  }

  fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
    unsafe { gl::AttachShader(program.0.get(), shader.0.get()) };
  }

  fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
    unsafe { gl::DetachShader(program.0.get(), shader.0.get()) };
  }

  fn link_program(&mut self, program: ProgramId) {
    unsafe { gl::LinkProgram(program.0.get()) };
  }

  fn program_link_status(&mut self, program: ProgramId) -> bool {
    let mut status: GLint = gl::FALSE as GLint;
    unsafe { gl::GetProgramiv(program.0.get(), gl::LINK_STATUS, &mut status) };

    status == gl::TRUE as GLint
  }

  fn program_info_log(&mut self, program: ProgramId) -> String {
    let mut len: GLint = 0;
    unsafe { gl::GetProgramiv(program.0.get(), gl::INFO_LOG_LENGTH, &mut len) };

    if len <= 0 {
      return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    unsafe { gl::GetProgramInfoLog(program.0.get(), len, &mut written, buf.as_mut_ptr() as *mut GLchar) };

    log_to_string(buf, written)
  }

  fn delete_program(&mut self, program: ProgramId) {
    unsafe { gl::DeleteProgram(program.0.get()) };
  }
}

impl RenderBackend for Gl33 {
  fn clear_color(&mut self, rgba: [f32; 4]) {
    unsafe { gl::ClearBufferfv(gl::COLOR, 0, rgba.as_ptr()) };
  }

  fn use_program(&mut self, program: Option<&Program>) {
    let name = program.and_then(Program::id).map_or(0, |id| id.0.get());
    unsafe { gl::UseProgram(name) };
  }

  fn create_vertex_array(&mut self) -> Option<VertexArrayId> {
    let mut name: GLuint = 0;
    unsafe { gl::GenVertexArrays(1, &mut name) };

    NonZeroU32::new(name).map(VertexArrayId)
  }

  fn bind_vertex_array(&mut self, vao: VertexArrayId) {
    unsafe { gl::BindVertexArray(vao.0.get()) };
  }

  fn delete_vertex_array(&mut self, vao: VertexArrayId) {
    let name = vao.0.get();
    unsafe { gl::DeleteVertexArrays(1, &name) };
  }

  fn create_buffer(&mut self) -> Option<BufferId> {
    let mut name: GLuint = 0;
    unsafe { gl::GenBuffers(1, &mut name) };

    NonZeroU32::new(name).map(BufferId)
  }

  fn bind_array_buffer(&mut self, buffer: BufferId) {
    unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer.0.get()) };
  }

  fn array_buffer_data(&mut self, data: &[f32]) {
    let size = (data.len() * mem::size_of::<f32>()) as GLsizeiptr;
    unsafe { gl::BufferData(gl::ARRAY_BUFFER, size, data.as_ptr() as *const c_void, gl::STATIC_DRAW) };
  }

  fn delete_buffer(&mut self, buffer: BufferId) {
    let name = buffer.0.get();
    unsafe { gl::DeleteBuffers(1, &name) };
  }

  fn vertex_attrib(&mut self, index: u32, value: [f32; 4]) {
    unsafe { gl::VertexAttrib4fv(index, value.as_ptr()) };
  }

  fn enable_vertex_attrib_array(&mut self, index: u32) {
    unsafe { gl::EnableVertexAttribArray(index) };
  }

  fn disable_vertex_attrib_array(&mut self, index: u32) {
    unsafe { gl::DisableVertexAttribArray(index) };
  }

  fn vertex_attrib_pointer(&mut self, index: u32, components: u32) {
    unsafe { gl::VertexAttribPointer(index, components as GLint, gl::FLOAT, gl::FALSE, 0, ptr::null()) };
  }

  fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) {
    unsafe { gl::DrawArrays(primitive_mode(primitive), first as GLint, count as GLsizei) };
  }

  fn polygon_mode(&mut self, mode: PolygonMode) {
    let mode = match mode {
      PolygonMode::Point => gl::POINT,
      PolygonMode::Line => gl::LINE,
      PolygonMode::Fill => gl::FILL,
    };

    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) };
  }

  fn point_size(&mut self, size: f32) {
    unsafe { gl::PointSize(size) };
  }

  fn patch_vertices(&mut self, count: u32) {
    unsafe { gl::PatchParameteri(gl::PATCH_VERTICES, count as GLint) };
  }

  fn dispatch_compute(&mut self, groups: [u32; 3]) {
    unsafe {
      gl::DispatchCompute(groups[0], groups[1], groups[2]);
      gl::MemoryBarrier(gl::ALL_BARRIER_BITS);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn info_log_drops_terminator() {
    let raw = b"0:1(1): error: syntax error\0".to_vec();
    let written = (raw.len() - 1) as GLsizei;

    assert_eq!(log_to_string(raw, written), "0:1(1): error: syntax error");
  }

  #[test]
  fn negative_length_yields_empty_log() {
    assert_eq!(log_to_string(vec![0; 4], -1), "");
  }
}
