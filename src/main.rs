mod charts;
mod cli;
mod render;
mod table;
mod watch;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use common::file::{self, LoadError};
use common::series;

use crate::cli::{Args, Config};

fn run_once(config: &Config) -> Result<ExitCode> {
  let snapshots = match file::load_snapshots(&config.input) {
    Ok(snapshots) => snapshots,
    Err(LoadError::NotFound(path)) => {
      eprintln!("Error: File {} not found. Run the price monitor first.", path.display());
      return Ok(ExitCode::FAILURE);
    }
    Err(err @ LoadError::Json { .. }) => {
      eprintln!("Error: {} contains {err}", config.input.display());
      return Ok(ExitCode::FAILURE);
    }
    Err(err) => return Err(err.into()),
  };
  if snapshots.is_empty() {
    println!("No price data in {}", config.input.display());
    return Ok(ExitCode::SUCCESS);
  }
  let mut series_map = series::group_by_symbol(&snapshots);
  series::apply_window(&mut series_map, config.window);
  log::info!("{} snapshots across {} symbols", snapshots.len(), series_map.len());
  render::render(config, &series_map)?;
  return Ok(ExitCode::SUCCESS);
}

fn run(config: Config) -> Result<ExitCode> {
  if config.watch == false {
    return run_once(&config);
  }
  // runtime
  let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
  rt.block_on(watch::watch(&config))?;
  return Ok(ExitCode::SUCCESS);
}

fn main() -> ExitCode {
  // logger
  let logger = simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).env().init();
  if let Err(err) = logger {
    eprintln!("failed to init logger: {err}");
  }
  // config
  let config = Config::from_args(Args::parse());
  log::debug!("{:?}", config);
  // run
  match run(config) {
    Ok(code) => return code,
    Err(err) => {
      log::error!("{err:#}");
      return ExitCode::FAILURE;
    }
  }
}
