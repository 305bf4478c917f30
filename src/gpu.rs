//! Render state and draw commands.
//!
//! This is the small slice of a graphics API the demos need on top of [`ShaderBackend`]: clearing
//! the back buffer, binding programs, vertex arrays and vertex buffers, feeding vertex attributes
//! and issuing draws or compute dispatches.

use log::debug;
use std::num::NonZeroU32;

use crate::shader::{Program, ShaderBackend};

/// Native name of a vertex array object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexArrayId(pub NonZeroU32);

/// Native name of a buffer object.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BufferId(pub NonZeroU32);

/// Primitive used to interpret vertices in a draw call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Primitive {
  Points,
  Lines,
  Triangles,
  Patches,
}

/// How polygons get rasterized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PolygonMode {
  Point,
  Line,
  Fill,
}

pub trait RenderBackend: ShaderBackend {
  /// Clear the color attachment of the back buffer.
  fn clear_color(&mut self, rgba: [f32; 4]);

  /// Bind a program for subsequent draws; `None` unbinds.
  fn use_program(&mut self, program: Option<&Program>);

  fn create_vertex_array(&mut self) -> Option<VertexArrayId>;

  fn bind_vertex_array(&mut self, vao: VertexArrayId);

  fn delete_vertex_array(&mut self, vao: VertexArrayId);

  fn create_buffer(&mut self) -> Option<BufferId>;

  /// Bind a buffer as the array buffer vertex attributes get sourced from.
  fn bind_array_buffer(&mut self, buffer: BufferId);

  /// Upload static vertex data into the currently bound array buffer.
  fn array_buffer_data(&mut self, data: &[f32]);

  fn delete_buffer(&mut self, buffer: BufferId);

  /// Set the constant value of a vertex attribute.
  fn vertex_attrib(&mut self, index: u32, value: [f32; 4]);

  fn enable_vertex_attrib_array(&mut self, index: u32);

  fn disable_vertex_attrib_array(&mut self, index: u32);

  /// Source a float attribute of `components` components from the bound array buffer, tightly
  /// packed from its start.
  fn vertex_attrib_pointer(&mut self, index: u32, components: u32);

  fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32);

  fn polygon_mode(&mut self, mode: PolygonMode);

  fn point_size(&mut self, size: f32);

  /// Number of control points per patch.
  fn patch_vertices(&mut self, count: u32);

  fn dispatch_compute(&mut self, groups: [u32; 3]);
}

/// Vertex array object, released exactly once.
#[derive(Debug, Eq, PartialEq)]
pub struct VertexArray {
  id: Option<VertexArrayId>,
}

impl VertexArray {
  /// Create a vertex array and bind it.
  pub fn bound<B>(backend: &mut B) -> Option<Self> where B: ?Sized + RenderBackend {
    let id = backend.create_vertex_array()?;
    backend.bind_vertex_array(id);

    Some(VertexArray { id: Some(id) })
  }

  pub fn id(&self) -> Option<VertexArrayId> {
    self.id
  }

  pub fn release<B>(&mut self, backend: &mut B) where B: ?Sized + RenderBackend {
    if let Some(id) = self.id.take() {
      debug!("deleting vertex array {}", id.0);
      backend.delete_vertex_array(id);
    }
  }
}

/// Array buffer holding static vertex data, released exactly once.
#[derive(Debug, Eq, PartialEq)]
pub struct Buffer {
  id: Option<BufferId>,
}

impl Buffer {
  /// Create an array buffer and fill it with vertex data. The buffer is left bound.
  pub fn from_slice<B>(backend: &mut B, data: &[f32]) -> Option<Self> where B: ?Sized + RenderBackend {
    let id = backend.create_buffer()?;
    backend.bind_array_buffer(id);
    backend.array_buffer_data(data);

    Some(Buffer { id: Some(id) })
  }

  pub fn id(&self) -> Option<BufferId> {
    self.id
  }

  /// Bind as array buffer; no-op once released.
  pub fn bind<B>(&self, backend: &mut B) where B: ?Sized + RenderBackend {
    if let Some(id) = self.id {
      backend.bind_array_buffer(id);
    }
  }

  pub fn release<B>(&mut self, backend: &mut B) where B: ?Sized + RenderBackend {
    if let Some(id) = self.id.take() {
      debug!("deleting buffer {}", id.0);
      backend.delete_buffer(id);
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::shader::tests::BackendImpl;
  use crate::shader::ProgramId;

  /// Render call recorded by the fake backend.
  #[derive(Clone, Debug, PartialEq)]
  pub enum Call {
    Clear([f32; 4]),
    UseProgram(Option<ProgramId>),
    BindVertexArray(VertexArrayId),
    BindArrayBuffer(BufferId),
    BufferData(Vec<f32>),
    VertexAttrib(u32, [f32; 4]),
    EnableAttribArray(u32),
    DisableAttribArray(u32),
    AttribPointer(u32, u32),
    Draw(Primitive, u32, u32),
    PolygonMode(PolygonMode),
    PointSize(f32),
    PatchVertices(u32),
    Dispatch([u32; 3]),
  }

  impl RenderBackend for BackendImpl {
    fn clear_color(&mut self, rgba: [f32; 4]) {
      self.calls.push(Call::Clear(rgba));
    }

    fn use_program(&mut self, program: Option<&Program>) {
      self.calls.push(Call::UseProgram(program.and_then(Program::id)));
    }

    fn create_vertex_array(&mut self) -> Option<VertexArrayId> {
      let id = VertexArrayId(self.fresh_name());
      self.vertex_arrays.insert(id);
      Some(id)
    }

    fn bind_vertex_array(&mut self, vao: VertexArrayId) {
      self.calls.push(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayId) {
      if !self.vertex_arrays.remove(&vao) {
        self.double_deletes += 1;
      }
    }

    fn create_buffer(&mut self) -> Option<BufferId> {
      let id = BufferId(self.fresh_name());
      self.buffers.insert(id, Vec::new());
      Some(id)
    }

    fn bind_array_buffer(&mut self, buffer: BufferId) {
      self.array_buffer = Some(buffer);
      self.calls.push(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&mut self, data: &[f32]) {
      if let Some(contents) = self.array_buffer.and_then(|id| self.buffers.get_mut(&id)) {
        *contents = data.to_vec();
      }

      self.calls.push(Call::BufferData(data.to_vec()));
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
      if self.buffers.remove(&buffer).is_none() {
        self.double_deletes += 1;
      }

      if self.array_buffer == Some(buffer) {
        self.array_buffer = None;
      }
    }

    fn vertex_attrib(&mut self, index: u32, value: [f32; 4]) {
      self.calls.push(Call::VertexAttrib(index, value));
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
      self.calls.push(Call::EnableAttribArray(index));
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
      self.calls.push(Call::DisableAttribArray(index));
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: u32) {
      self.calls.push(Call::AttribPointer(index, components));
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: u32, count: u32) {
      self.calls.push(Call::Draw(primitive, first, count));
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
      self.calls.push(Call::PolygonMode(mode));
    }

    fn point_size(&mut self, size: f32) {
      self.calls.push(Call::PointSize(size));
    }

    fn patch_vertices(&mut self, count: u32) {
      self.calls.push(Call::PatchVertices(count));
    }

    fn dispatch_compute(&mut self, groups: [u32; 3]) {
      self.calls.push(Call::Dispatch(groups));
    }
  }

  #[test]
  fn vertex_array_is_bound_and_released_once() {
    let mut backend = BackendImpl::new();
    let mut vao = VertexArray::bound(&mut backend).unwrap();
    let id = vao.id().unwrap();

    assert_eq!(backend.calls, vec![Call::BindVertexArray(id)]);

    vao.release(&mut backend);
    vao.release(&mut backend);

    assert!(backend.vertex_arrays.is_empty());
    assert_eq!(backend.double_deletes, 0);
  }

  #[test]
  fn buffer_holds_its_data_and_is_released_once() {
    let mut backend = BackendImpl::new();
    let mut buffer = Buffer::from_slice(&mut backend, &[1., 2., 3.]).unwrap();
    let id = buffer.id().unwrap();

    assert_eq!(backend.calls, vec![Call::BindArrayBuffer(id), Call::BufferData(vec![1., 2., 3.])]);
    assert_eq!(backend.buffers[&id], vec![1., 2., 3.]);

    buffer.release(&mut backend);
    buffer.release(&mut backend);
    backend.calls.clear();
    buffer.bind(&mut backend);

    assert!(backend.buffers.is_empty());
    assert!(backend.calls.is_empty());
    assert_eq!(backend.double_deletes, 0);
    assert!(!backend.leaks());
  }
}
