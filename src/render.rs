use anyhow::{Context, Result};
use common::{series, structs::*, summary};

use crate::charts;
use crate::cli::Config;
use crate::table;

/// Draws and prints whatever `config.outputs` asks for from one set of series.
pub fn render(config: &Config, series_map: &SeriesMap) -> Result<()> {
  let outputs = &config.outputs;
  if outputs.combined || outputs.individual {
    std::fs::create_dir_all(&config.output_dir)
      .with_context(|| format!("failed to create output directory {}", config.output_dir.display()))?;
  }
  if outputs.combined {
    let latest = series::latest_snapshots(series_map);
    charts::current_prices_chart(&latest, &config.output_dir.join(charts::CURRENT_PRICES_FILE))?;
    charts::trend_chart(series_map, &config.output_dir.join(charts::PRICE_TRENDS_FILE))?;
  }
  if outputs.individual {
    let written = charts::individual_charts(series_map, &config.output_dir)?;
    log::info!("wrote {} individual charts", written.len());
  }
  if outputs.table {
    let summaries = summary::summarize(series_map, ChangeBasis::PreviousToLast);
    print!("{}", table::price_table(&summaries));
  }
  if outputs.summary {
    let summaries = summary::summarize(series_map, ChangeBasis::FirstToLast);
    print!("{}", table::performance_summary(&summaries));
  }
  return Ok(());
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::Outputs;
  use common::json_time::parse_time_str;
  use std::path::Path;
  use std::time::Duration;

  fn config(output_dir: &Path, outputs: Outputs) -> Config {
    return Config {
      input: output_dir.join("crypto_prices.json"),
      output_dir: output_dir.to_path_buf(),
      window: 50,
      watch: false,
      interval: Duration::from_secs(60),
      outputs,
    };
  }

  fn sample_map() -> SeriesMap {
    let snapshots: Vec<PriceSnapshot> = ["10:30:00", "10:31:00"]
      .iter()
      .enumerate()
      .map(|(index, time)| PriceSnapshot {
        symbol: String::from("bitcoin"),
        price: 43000.0 + index as f64 * 100.0,
        time: parse_time_str(&format!("2024-01-15 {time}")).unwrap(),
      })
      .collect();
    return series::group_by_symbol(&snapshots);
  }

  #[test]
  fn should_write_combined_charts_into_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("charts");
    let outputs = Outputs {
      summary: true,
      table: true,
      combined: true,
      individual: false,
    };
    render(&config(&output_dir, outputs), &sample_map()).unwrap();
    assert!(output_dir.join(charts::CURRENT_PRICES_FILE).exists());
    assert!(output_dir.join(charts::PRICE_TRENDS_FILE).exists());
    assert!(output_dir.join("bitcoin_price.svg").exists() == false);
  }

  #[test]
  fn should_write_individual_charts_only_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let outputs = Outputs {
      summary: false,
      table: false,
      combined: false,
      individual: true,
    };
    render(&config(dir.path(), outputs), &sample_map()).unwrap();
    assert!(dir.path().join("bitcoin_price.svg").exists());
    assert!(dir.path().join(charts::PRICE_TRENDS_FILE).exists() == false);
  }
}
