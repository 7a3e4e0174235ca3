use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use common::series::DEFAULT_WINDOW;

#[derive(Parser, Debug, Clone)]
#[command(name = "crypto_charts", version, about = "Charts and summaries for cryptocurrency price snapshots")]
pub struct Args {
  /// Price snapshot file (JSON array or JSON-lines)
  #[arg(short, long, env = "CRYPTO_CHARTS_INPUT", default_value = "crypto_prices.json")]
  pub input: PathBuf,

  /// Directory the SVG charts are written to
  #[arg(short, long, env = "CRYPTO_CHARTS_OUTPUT", default_value = ".")]
  pub output: PathBuf,

  /// Print the performance summary (first vs latest price)
  #[arg(short, long)]
  pub summary: bool,

  /// Draw every symbol on one trend chart
  #[arg(long)]
  pub combined: bool,

  /// Draw one trend chart per symbol
  #[arg(long)]
  pub individual: bool,

  /// Print the latest price table (previous vs latest price)
  #[arg(long)]
  pub table: bool,

  /// Points kept per symbol, oldest dropped first (0 keeps everything)
  #[arg(long, env = "CRYPTO_CHARTS_WINDOW", default_value_t = DEFAULT_WINDOW)]
  pub window: usize,

  /// Keep reloading the input and redrawing until interrupted
  #[arg(long)]
  pub watch: bool,

  /// Seconds between reloads in watch mode
  #[arg(long, env = "CRYPTO_CHARTS_INTERVAL_SECS", default_value_t = 60)]
  pub interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
  pub summary: bool,
  pub table: bool,
  pub combined: bool,
  pub individual: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
  pub input: PathBuf,
  pub output_dir: PathBuf,
  pub window: usize,
  pub watch: bool,
  pub interval: Duration,
  pub outputs: Outputs,
}

impl Config {
  pub fn from_args(args: Args) -> Config {
    // nothing requested: combined chart, plus the table once or the summary while watching
    let nothing_requested = !(args.summary || args.table || args.combined || args.individual);
    let outputs = Outputs {
      summary: args.summary || (nothing_requested && args.watch),
      table: args.table || (nothing_requested && args.watch == false),
      combined: args.combined || nothing_requested,
      individual: args.individual,
    };
    return Config {
      input: args.input,
      output_dir: args.output,
      window: args.window,
      watch: args.watch,
      interval: Duration::from_secs(args.interval_secs.max(1)),
      outputs,
    };
  }
}
