//! GLFW platform.

use ::glfw::{self as glfw_sys, Action, Context, Glfw, GlfwReceiver, Key, OpenGlProfileHint, PWindow, WindowEvent,
             WindowHint, WindowMode};
use log::{debug, error, info, trace};

use crate::gl33::Gl33;
use crate::time::Time;
use crate::window::{Platform, PlatformError, WindowOpt};

fn error_callback(err: glfw_sys::Error, description: String) {
  error!("GLFW error {:?}: {}", err, description);
}

/// GLFW window with an OpenGL core context.
///
/// Fields drop in declaration order: the window goes away before the library is terminated.
pub struct GlfwPlatform {
  backend: Gl33,
  events: GlfwReceiver<(f64, WindowEvent)>,
  window: PWindow,
  glfw: Glfw,
}

impl Platform for GlfwPlatform {
  type Backend = Gl33;
  type Library = Glfw;

  fn init() -> Result<Self::Library, PlatformError> {
    let glfw = glfw_sys::init(error_callback).map_err(|e| PlatformError::CannotInitialize(format!("{:?}", e)))?;
    info!("GLFW initialized");

    Ok(glfw)
  }

  fn open(mut glfw: Self::Library, opt: &WindowOpt) -> Result<Self, PlatformError> {
    glfw.window_hint(WindowHint::ContextVersion(opt.version.major, opt.version.minor));
    glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
    glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(WindowHint::Samples(opt.samples));

    let (mut window, events) = glfw
      .create_window(opt.width, opt.height, &opt.title, WindowMode::Windowed)
      .ok_or_else(|| {
        PlatformError::CannotCreateWindow(format!(
          "{}x{} window with an OpenGL {} core context",
          opt.width, opt.height, opt.version
        ))
      })?;

    info!("window and OpenGL {} context created ({}x{})", opt.version, opt.width, opt.height);

    window.make_current();

    debug!("initializing OpenGL pointers");
    let backend = Gl33::load_with(|s| window.get_proc_address(s) as *const _);

    Ok(GlfwPlatform { backend, events, window, glfw })
  }

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }

  fn should_close(&self) -> bool {
    self.window.should_close()
  }

  fn set_should_close(&mut self, close: bool) {
    self.window.set_should_close(close);
  }

  fn exit_key_pressed(&self) -> bool {
    self.window.get_key(Key::Escape) == Action::Press
  }

  fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }

  fn poll_events(&mut self) {
    self.glfw.poll_events();

    for (_, event) in glfw_sys::flush_messages(&self.events) {
      trace!("window event: {:?}", event);
    }
  }

  fn time(&self) -> Time {
    Time::from_secs(self.glfw.get_time())
  }
}

impl Drop for GlfwPlatform {
  fn drop(&mut self) {
    debug!("destroying window and terminating GLFW");
  }
}
