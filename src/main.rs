use log::error;
use std::process::exit;
use structopt::StructOpt;

use shaderbook::demos::{
  Clear, ColorAnimation, Compute, FirstTriangle, FragmentInterpolation, Geometry, InterfaceBlocks, PassingData, Point,
  Tessellation, Triangle, VertexAttributes,
};
use shaderbook::{Demo, DemoKind, Error, Gl33, GlfwPlatform, Opt, Runner, StdoutLogger};

fn main() {
  let opt = Opt::from_args();

  if let Err(e) = StdoutLogger::new(opt.log_level()).init() {
    eprintln!("cannot install logger: {}", e);
  }

  if opt.list {
    for kind in &DemoKind::ALL {
      println!("{:<24}{}", kind.name(), kind.description());
    }

    return;
  }

  let kind = match opt.demo {
    Some(kind) => kind,
    None => {
      error!("no demo given; try --list");
      exit(1);
    }
  };

  let result = match kind {
    DemoKind::Clear => run(&opt, Clear),
    DemoKind::ColorAnimation => run(&opt, ColorAnimation),
    DemoKind::Point => run(&opt, Point::default()),
    DemoKind::Triangle => run(&opt, Triangle::default()),
    DemoKind::FirstTriangle => run(&opt, FirstTriangle::default()),
    DemoKind::VertexAttributes => run(&opt, VertexAttributes::default()),
    DemoKind::PassingData => run(&opt, PassingData::default()),
    DemoKind::InterfaceBlocks => run(&opt, InterfaceBlocks::default()),
    DemoKind::FragmentInterpolation => run(&opt, FragmentInterpolation::default()),
    DemoKind::Tessellation => run(&opt, Tessellation::default()),
    DemoKind::Geometry => run(&opt, Geometry::default()),
    DemoKind::Compute => run(&opt, Compute::default()),
  };

  if let Err(e) = result {
    error!("{}", e);
    exit(1);
  }
}

fn run<D>(opt: &Opt, demo: D) -> Result<(), Error> where D: Demo<Gl33> {
  let window_opt = opt.window_opt(demo.title(), demo.context_version());
  Runner::<GlfwPlatform, D>::launch(&window_opt, demo, opt.clock())
}
