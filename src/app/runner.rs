//! Demo runner.
//!
//! The runner drives a [`Demo`] on a [`Platform`]: it starts the demo up, renders frames until the
//! window gets closed (or escape gets pressed), then shuts the demo down. A runner goes through
//! its states only once; it can’t be restarted.

use log::{debug, error, info};
use std::error::Error as StdError;
use std::fmt;

use crate::app::Demo;
use crate::time::Time;
use crate::window::{Platform, PlatformError, WindowOpt};

/// Lifecycle state of a runner.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum State {
  Uninitialized,
  Initialized,
  WindowCreated,
  Running,
  ShuttingDown,
  Terminated,
}

/// Possible runner errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
  CannotInitialize(String),
  CannotCreateWindow(String),
  StartupFailure(String),
  /// A lifecycle step was requested from the wrong state.
  InvalidState(State),
  AlreadyTerminated,
}

impl Error {
  pub(crate) fn startup_failure<R>(reason: R) -> Self where R: Into<String> {
    Error::StartupFailure(reason.into())
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Error::CannotInitialize(ref reason) => write!(f, "cannot initialize windowing library: {}", reason),
      Error::CannotCreateWindow(ref reason) => write!(f, "cannot create window: {}", reason),
      Error::StartupFailure(ref reason) => write!(f, "demo failed to start: {}", reason),
      Error::InvalidState(state) => write!(f, "runner cannot proceed from state {:?}", state),
      Error::AlreadyTerminated => f.write_str("runner already terminated"),
    }
  }
}

impl StdError for Error {}

impl From<PlatformError> for Error {
  fn from(e: PlatformError) -> Self {
    match e {
      PlatformError::CannotInitialize(reason) => Error::CannotInitialize(reason),
      PlatformError::CannotCreateWindow(reason) => Error::CannotCreateWindow(reason),
    }
  }
}

/// Mapping from platform time to demo time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
  /// Time the demo starts at.
  pub start_at: Time,
  /// Maximum runtime; time wraps around to `start_at` when reaching it.
  pub wrap_at: Option<Time>,
}

impl Clock {
  pub fn at(&self, t: Time) -> Time {
    let t = if let Some(wrap_t) = self.wrap_at { t.wrap_around(wrap_t) } else { t };
    t.offset(self.start_at)
  }
}

impl Default for Clock {
  fn default() -> Self {
    Clock { start_at: Time::from_secs(0.), wrap_at: None }
  }
}

fn transition(state: &mut State, to: State) {
  debug!("runner state: {:?} -> {:?}", state, to);
  *state = to;
}

/// Lifecycle host.
pub struct Runner<P, D> where P: Platform {
  library: Option<P::Library>,
  platform: Option<P>,
  demo: D,
  clock: Clock,
  state: State,
  frames: u64,
}

impl<P, D> Runner<P, D> where P: Platform, D: Demo<P::Backend> {
  /// A runner that hasn’t touched the windowing library yet.
  pub fn new(demo: D) -> Self {
    Runner {
      library: None,
      platform: None,
      demo,
      clock: Clock::default(),
      state: State::Uninitialized,
      frames: 0,
    }
  }

  /// Wrap an already opened platform.
  pub fn with_platform(platform: P, demo: D) -> Self {
    Runner {
      platform: Some(platform),
      state: State::WindowCreated,
      ..Runner::new(demo)
    }
  }

  pub fn with_clock(self, clock: Clock) -> Self {
    Runner { clock, ..self }
  }

  /// Initialize the library, open a window and run a demo in it.
  ///
  /// The window is destroyed and the windowing library terminated when this function returns.
  pub fn launch(opt: &WindowOpt, demo: D, clock: Clock) -> Result<(), Error> {
    info!("starting {}", opt.title);

    let mut runner = Runner::<P, D>::new(demo).with_clock(clock);
    runner.init()?;
    runner.open(opt)?;
    runner.run()
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn demo(&self) -> &D {
    &self.demo
  }

  /// The platform, once a window is open.
  pub fn platform(&self) -> Option<&P> {
    self.platform.as_ref()
  }

  /// Number of frames rendered so far.
  pub fn frames(&self) -> u64 {
    self.frames
  }

  /// Initialize the windowing library.
  pub fn init(&mut self) -> Result<(), Error> {
    if self.state != State::Uninitialized {
      return Err(Error::InvalidState(self.state));
    }

    let library = P::init().map_err(|e| {
      error!("{}", e);
      Error::from(e)
    })?;

    self.library = Some(library);
    transition(&mut self.state, State::Initialized);

    Ok(())
  }

  /// Open the window and its context.
  pub fn open(&mut self, opt: &WindowOpt) -> Result<(), Error> {
    let library = match (self.state, self.library.take()) {
      (State::Initialized, Some(library)) => library,
      (state, _) => return Err(Error::InvalidState(state)),
    };

    let platform = P::open(library, opt).map_err(|e| {
      error!("{}", e);
      Error::from(e)
    })?;

    self.platform = Some(platform);
    transition(&mut self.state, State::WindowCreated);

    Ok(())
  }

  /// Start the demo up, loop over frames until asked to close, then shut it down.
  pub fn run(&mut self) -> Result<(), Error> {
    match self.state {
      State::WindowCreated => (),
      State::ShuttingDown | State::Terminated => return Err(Error::AlreadyTerminated),
      state => return Err(Error::InvalidState(state)),
    }

    let platform = match self.platform {
      Some(ref mut platform) => platform,
      None => return Err(Error::InvalidState(self.state)),
    };

    if let Err(e) = self.demo.startup(platform.backend()) {
      error!("{} failed to start: {}", self.demo.title(), e);
      let reason = e.to_string();

      self.terminate();
      return Err(Error::startup_failure(reason));
    }

    transition(&mut self.state, State::Running);
    info!("running {} ...", self.demo.title());

    while !platform.should_close() {
      if platform.exit_key_pressed() {
        info!("closing window");
        platform.set_should_close(true);
      }

      let t = self.clock.at(platform.time());

      self.demo.render(platform.backend(), t);
      platform.swap_buffers();
      platform.poll_events();
      self.frames += 1;
    }

    info!("{} frame(s) rendered", self.frames);
    self.terminate();

    Ok(())
  }

  fn terminate(&mut self) {
    transition(&mut self.state, State::ShuttingDown);

    if let Some(ref mut platform) = self.platform {
      self.demo.shutdown(platform.backend());
    }

    transition(&mut self.state, State::Terminated);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gpu::RenderBackend;
  use crate::shader::tests::{BackendImpl, BROKEN_SRC, VALID_FS, VALID_VS};
  use crate::shader::{build_program, BuildError, Program, Stage};
  use crate::window::tests::PlatformImpl;

  #[derive(Debug, Default)]
  struct DemoImpl {
    broken: bool,
    program: Option<Program>,
    startups: usize,
    renders: Vec<Time>,
    shutdowns: usize,
  }

  impl Demo<BackendImpl> for DemoImpl {
    type Error = BuildError;

    fn title(&self) -> &'static str {
      "test demo"
    }

    fn startup(&mut self, backend: &mut BackendImpl) -> Result<(), Self::Error> {
      self.startups += 1;

      let vs = if self.broken { BROKEN_SRC } else { VALID_VS };
      self.program = Some(build_program(backend, &[Stage::vertex(vs), Stage::fragment(VALID_FS)])?);

      Ok(())
    }

    fn render(&mut self, backend: &mut BackendImpl, t: Time) {
      backend.clear_color([0., 0.25, 0., 1.]);
      backend.use_program(self.program.as_ref());
      self.renders.push(t);
    }

    fn shutdown(&mut self, backend: &mut BackendImpl) {
      self.shutdowns += 1;

      if let Some(ref mut program) = self.program {
        program.release(backend);
      }
    }
  }

  struct NoWindow;

  impl Platform for NoWindow {
    type Backend = BackendImpl;
    type Library = ();

    fn init() -> Result<Self::Library, PlatformError> {
      Ok(())
    }

    fn open(_: Self::Library, _: &WindowOpt) -> Result<Self, PlatformError> {
      Err(PlatformError::CannotCreateWindow("no display".to_owned()))
    }

    fn backend(&mut self) -> &mut Self::Backend {
      unreachable!()
    }

    fn should_close(&self) -> bool {
      true
    }

    fn set_should_close(&mut self, _: bool) {}

    fn exit_key_pressed(&self) -> bool {
      false
    }

    fn swap_buffers(&mut self) {}

    fn poll_events(&mut self) {}

    fn time(&self) -> Time {
      Time::from_secs(0.)
    }
  }

  struct NoLibrary;

  impl Platform for NoLibrary {
    type Backend = BackendImpl;
    type Library = ();

    fn init() -> Result<Self::Library, PlatformError> {
      Err(PlatformError::CannotInitialize("no display server".to_owned()))
    }

    fn open(_: Self::Library, _: &WindowOpt) -> Result<Self, PlatformError> {
      unreachable!()
    }

    fn backend(&mut self) -> &mut Self::Backend {
      unreachable!()
    }

    fn should_close(&self) -> bool {
      true
    }

    fn set_should_close(&mut self, _: bool) {}

    fn exit_key_pressed(&self) -> bool {
      false
    }

    fn swap_buffers(&mut self) {}

    fn poll_events(&mut self) {}

    fn time(&self) -> Time {
      Time::from_secs(0.)
    }
  }

  fn platform(runner: &Runner<PlatformImpl, DemoImpl>) -> &PlatformImpl {
    runner.platform().unwrap()
  }

  #[test]
  fn closed_before_first_frame() {
    let mut runner = Runner::with_platform(PlatformImpl::already_closed(), DemoImpl::default());

    assert_eq!(runner.run(), Ok(()));
    assert_eq!(runner.state(), State::Terminated);
    assert_eq!(runner.frames(), 0);
    assert!(runner.demo().renders.is_empty());
    assert_eq!(runner.demo().startups, 1);
    assert_eq!(runner.demo().shutdowns, 1);
    assert!(!platform(&runner).backend.leaks());
  }

  #[test]
  fn escape_closes_after_the_current_frame() {
    let mut runner = Runner::with_platform(PlatformImpl::closing_at(2), DemoImpl::default());

    assert_eq!(runner.run(), Ok(()));
    assert_eq!(runner.frames(), 3);
    assert_eq!(runner.demo().renders.len(), 3);
    assert_eq!(platform(&runner).swaps, 3);
    assert_eq!(platform(&runner).polls, 3);
    assert_eq!(runner.demo().shutdowns, 1);
    assert!(!platform(&runner).backend.leaks());
    assert_eq!(platform(&runner).backend.double_deletes, 0);
  }

  #[test]
  fn render_receives_elapsed_time() {
    let mut runner = Runner::with_platform(PlatformImpl::closing_at(3), DemoImpl::default());
    runner.run().unwrap();

    let secs: Vec<_> = runner.demo().renders.iter().map(|t| t.as_secs()).collect();
    assert_eq!(secs, vec![0., 1. / 60., 2. / 60., 3. / 60.]);
  }

  #[test]
  fn clock_offsets_and_wraps() {
    let clock = Clock { start_at: Time::from_secs(10.), wrap_at: Some(Time::from_secs(2. / 60.)) };
    let mut runner = Runner::with_platform(PlatformImpl::closing_at(3), DemoImpl::default()).with_clock(clock);
    runner.run().unwrap();

    let renders = &runner.demo().renders;
    assert_eq!(renders[0], Time::from_secs(10.));
    assert!(renders.iter().all(|t| t.as_secs() >= 10. && t.as_secs() < 10. + 2. / 60.));
  }

  #[test]
  fn failed_startup_blocks_rendering() {
    let demo = DemoImpl { broken: true, ..Default::default() };
    let mut runner = Runner::with_platform(PlatformImpl::closing_at(5), demo);

    match runner.run() {
      Err(Error::StartupFailure(reason)) => assert!(reason.contains("vertex")),
      r => panic!("expected a startup failure, got {:?}", r),
    }

    assert_eq!(runner.state(), State::Terminated);
    assert!(runner.demo().renders.is_empty());
    assert_eq!(runner.demo().shutdowns, 1);
    assert!(!platform(&runner).backend.leaks());
  }

  #[test]
  fn runner_cannot_restart() {
    let mut runner = Runner::with_platform(PlatformImpl::already_closed(), DemoImpl::default());

    assert_eq!(runner.run(), Ok(()));
    assert_eq!(runner.run(), Err(Error::AlreadyTerminated));
    assert_eq!(runner.demo().startups, 1);
    assert_eq!(runner.demo().shutdowns, 1);
  }

  #[test]
  fn states_are_walked_in_order() {
    let mut runner = Runner::<PlatformImpl, DemoImpl>::new(DemoImpl::default());
    assert_eq!(runner.state(), State::Uninitialized);
    assert!(runner.platform().is_none());

    assert_eq!(runner.run(), Err(Error::InvalidState(State::Uninitialized)));
    assert_eq!(runner.open(&WindowOpt::default()), Err(Error::InvalidState(State::Uninitialized)));

    runner.init().unwrap();
    assert_eq!(runner.state(), State::Initialized);
    assert_eq!(runner.init(), Err(Error::InvalidState(State::Initialized)));

    runner.open(&WindowOpt::default()).unwrap();
    assert_eq!(runner.state(), State::WindowCreated);
    assert!(runner.platform().is_some());

    runner.run().unwrap();
    assert_eq!(runner.state(), State::Terminated);
    assert_eq!(runner.demo().startups, 1);
  }

  #[test]
  fn launch_reports_init_failure() {
    let r = Runner::<NoLibrary, DemoImpl>::launch(&WindowOpt::default(), DemoImpl::default(), Clock::default());
    assert_eq!(r, Err(Error::CannotInitialize("no display server".to_owned())));

    let mut runner = Runner::<NoLibrary, DemoImpl>::new(DemoImpl::default());
    assert!(runner.init().is_err());
    assert_eq!(runner.state(), State::Uninitialized);
    assert_eq!(runner.demo().startups, 0);
  }

  #[test]
  fn launch_reports_window_failure() {
    let mut runner = Runner::<NoWindow, DemoImpl>::new(DemoImpl::default());
    runner.init().unwrap();

    assert_eq!(runner.open(&WindowOpt::default()), Err(Error::CannotCreateWindow("no display".to_owned())));
    assert_eq!(runner.state(), State::Initialized);

    let r = Runner::<NoWindow, DemoImpl>::launch(&WindowOpt::default(), DemoImpl::default(), Clock::default());
    assert_eq!(r, Err(Error::CannotCreateWindow("no display".to_owned())));
  }

  #[test]
  fn launch_runs_to_completion() {
    let r = Runner::<PlatformImpl, DemoImpl>::launch(&WindowOpt::default(), DemoImpl::default(), Clock::default());
    assert_eq!(r, Ok(()));
  }
}
