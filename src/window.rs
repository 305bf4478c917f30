//! Windowing platform.
//!
//! A platform owns the windowing library, one window with its graphics context and the backend
//! bound to that context. The library is initialized when the platform is created and terminated
//! when it’s dropped.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::gpu::RenderBackend;
use crate::time::Time;

#[cfg(feature = "glfw-platform")]
pub mod glfw;

/// Requested graphics context version.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ContextVersion {
  pub major: u32,
  pub minor: u32,
}

impl ContextVersion {
  pub const fn new(major: u32, minor: u32) -> Self {
    ContextVersion { major, minor }
  }
}

impl Default for ContextVersion {
  fn default() -> Self {
    ContextVersion::new(3, 3)
  }
}

impl fmt::Display for ContextVersion {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl FromStr for ContextVersion {
  type Err = ContextVersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut iter = s.splitn(2, '.');
    let major = iter.next().and_then(|x| x.parse().ok()).ok_or(ContextVersionError::CannotParseMajor)?;
    let minor = iter.next().ok_or(ContextVersionError::MissingMinor)?;
    let minor = minor.parse().map_err(|_| ContextVersionError::CannotParseMinor)?;

    Ok(ContextVersion { major, minor })
  }
}

/// Possible errors when parsing a `MAJOR.MINOR` context version.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContextVersionError {
  CannotParseMajor,
  MissingMinor,
  CannotParseMinor,
}

impl fmt::Display for ContextVersionError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ContextVersionError::CannotParseMajor => f.write_str("cannot parse major version"),
      ContextVersionError::MissingMinor => f.write_str("missing minor version (expected MAJOR.MINOR)"),
      ContextVersionError::CannotParseMinor => f.write_str("cannot parse minor version"),
    }
  }
}

impl Error for ContextVersionError {}

/// Window and context options.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  pub width: u32,
  pub height: u32,
  pub title: String,
  /// Core profile, forward-compatible.
  pub version: ContextVersion,
  /// MSAA sample count.
  pub samples: Option<u32>,
}

impl Default for WindowOpt {
  fn default() -> Self {
    WindowOpt {
      width: 640,
      height: 480,
      title: "Untitled Application".to_owned(),
      version: ContextVersion::default(),
      samples: None,
    }
  }
}

/// Platform creation errors. Both are fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlatformError {
  CannotInitialize(String),
  CannotCreateWindow(String),
}

impl fmt::Display for PlatformError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      PlatformError::CannotInitialize(ref reason) => write!(f, "cannot initialize windowing library: {}", reason),
      PlatformError::CannotCreateWindow(ref reason) => write!(f, "cannot create window or context: {}", reason),
    }
  }
}

impl Error for PlatformError {}

/// Class of windowing platforms.
///
/// Getting a platform is a two-step process: the library is initialized first, then a window is
/// opened with it.
pub trait Platform: Sized {
  type Backend: RenderBackend;

  /// Initialized library, before any window exists.
  type Library;

  /// Initialize the windowing library.
  fn init() -> Result<Self::Library, PlatformError>;

  /// Open a window with a current context.
  fn open(library: Self::Library, opt: &WindowOpt) -> Result<Self, PlatformError>;

  fn backend(&mut self) -> &mut Self::Backend;

  fn should_close(&self) -> bool;

  fn set_should_close(&mut self, close: bool);

  /// Whether the exit key is currently held down.
  fn exit_key_pressed(&self) -> bool;

  /// Present the back buffer.
  fn swap_buffers(&mut self);

  fn poll_events(&mut self);

  /// Time elapsed since the library was initialized.
  fn time(&self) -> Time;
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::shader::tests::BackendImpl;

  /// Platform running on the fake backend.
  ///
  /// Escape is reported as pressed from frame `escape_at` on; the clock advances by a 60th of a
  /// second on every event poll.
  #[derive(Debug, Default)]
  pub struct PlatformImpl {
    pub backend: BackendImpl,
    pub escape_at: Option<usize>,
    pub closed: bool,
    pub swaps: usize,
    pub polls: usize,
  }

  impl PlatformImpl {
    pub fn closing_at(frame: usize) -> Self {
      PlatformImpl { escape_at: Some(frame), ..Default::default() }
    }

    pub fn already_closed() -> Self {
      PlatformImpl { closed: true, ..Default::default() }
    }
  }

  impl Platform for PlatformImpl {
    type Backend = BackendImpl;
    type Library = ();

    fn init() -> Result<Self::Library, PlatformError> {
      Ok(())
    }

    fn open(_: Self::Library, _: &WindowOpt) -> Result<Self, PlatformError> {
      Ok(PlatformImpl::closing_at(1))
    }

    fn backend(&mut self) -> &mut Self::Backend {
      &mut self.backend
    }

    fn should_close(&self) -> bool {
      self.closed
    }

    fn set_should_close(&mut self, close: bool) {
      self.closed = close;
    }

    fn exit_key_pressed(&self) -> bool {
      self.escape_at.map_or(false, |frame| self.swaps >= frame)
    }

    fn swap_buffers(&mut self) {
      self.swaps += 1;
    }

    fn poll_events(&mut self) {
      self.polls += 1;
    }

    fn time(&self) -> Time {
      Time::from_secs(self.polls as f64 / 60.)
    }
  }

  #[test]
  fn parse_context_version() {
    assert_eq!("4.1".parse(), Ok(ContextVersion::new(4, 1)));
    assert_eq!("4".parse::<ContextVersion>(), Err(ContextVersionError::MissingMinor));
    assert_eq!("a.1".parse::<ContextVersion>(), Err(ContextVersionError::CannotParseMajor));
    assert_eq!("4.x".parse::<ContextVersion>(), Err(ContextVersionError::CannotParseMinor));
    assert!(ContextVersion::new(4, 3) > ContextVersion::new(3, 3));
    assert_eq!(ContextVersion::new(4, 1).to_string(), "4.1");
  }
}
