use std::future::Future;

use anyhow::Result;
use common::{file, series, structs::SeriesMap};

use crate::cli::Config;
use crate::render;

/// Loads the input once and folds it into `history`. Returns how many
/// snapshots the file held.
pub fn poll_once(config: &Config, history: &mut SeriesMap) -> Result<usize> {
  let batch = file::load_snapshots_or_empty(&config.input)?;
  if batch.is_empty() {
    log::warn!("no snapshots in {}", config.input.display());
    return Ok(0);
  }
  series::extend_history(history, &batch, config.window);
  render::render(config, history)?;
  return Ok(batch.len());
}

pub async fn watch(config: &Config) -> Result<()> {
  return watch_until(config, tokio::signal::ctrl_c()).await;
}

/// Polls until `shutdown` completes. `shutdown` is created once and polled
/// across every sleep, so a signal that arrives during a poll is still seen.
pub async fn watch_until<F: Future>(config: &Config, shutdown: F) -> Result<()> {
  println!("Cryptocurrency Chart Generator Started...");
  println!("Monitoring {} every {}s", config.input.display(), config.interval.as_secs());
  println!("Press Ctrl+C to stop\n");
  let mut history = SeriesMap::new();
  tokio::pin!(shutdown);
  loop {
    let result = poll_once(config, &mut history);
    if let Err(err) = result {
      log::error!("poll failed: {err:#}");
    }
    tokio::select! {
      _ = &mut shutdown => {
        println!("\nChart generator stopped.");
        return Ok(());
      }
      _ = tokio::time::sleep(config.interval) => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::Outputs;
  use std::time::Duration;

  fn config(dir: &std::path::Path, window: usize) -> Config {
    return Config {
      input: dir.join("crypto_prices.json"),
      output_dir: dir.join("charts"),
      window,
      watch: true,
      interval: Duration::from_secs(60),
      outputs: Outputs {
        summary: true,
        table: false,
        combined: true,
        individual: false,
      },
    };
  }

  fn write_prices(config: &Config, prices: &[(&str, f64)], time: &str) {
    let records: Vec<String> = prices
      .iter()
      .map(|(symbol, price)| format!("{{\"symbol\": \"{symbol}\", \"price\": \"{price}\", \"time\": \"{time}\"}}"))
      .collect();
    std::fs::write(&config.input, format!("[{}]", records.join(","))).unwrap();
  }

  #[test]
  fn should_treat_missing_file_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), 50);
    let mut history = SeriesMap::new();
    assert_eq!(poll_once(&config, &mut history).unwrap(), 0);
    assert!(history.is_empty());
  }

  #[test]
  fn should_accumulate_history_between_polls() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), 2);
    let mut history = SeriesMap::new();
    write_prices(&config, &[("bitcoin", 43000.0), ("ethereum", 2500.0)], "2024-01-15 10:30:00");
    assert_eq!(poll_once(&config, &mut history).unwrap(), 2);
    // unchanged file adds nothing
    assert_eq!(poll_once(&config, &mut history).unwrap(), 2);
    assert_eq!(history["bitcoin"].len(), 1);
    write_prices(&config, &[("bitcoin", 43100.0)], "2024-01-15 10:31:00");
    poll_once(&config, &mut history).unwrap();
    write_prices(&config, &[("bitcoin", 43200.0)], "2024-01-15 10:32:00");
    poll_once(&config, &mut history).unwrap();
    let prices: Vec<f64> = history["bitcoin"].points.iter().map(|point| point.price).collect();
    assert_eq!(prices, vec![43100.0, 43200.0]);
    assert!(config.output_dir.join(crate::charts::PRICE_TRENDS_FILE).exists());
  }

  #[tokio::test]
  async fn should_stop_when_shutdown_fired_during_first_poll() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), 50);
    write_prices(&config, &[("bitcoin", 43000.0)], "2024-01-15 10:30:00");
    // already complete, as if ctrl-c hit while the first poll ran
    let shutdown = std::future::ready(());
    let stopped = tokio::time::timeout(Duration::from_secs(5), watch_until(&config, shutdown)).await;
    assert!(matches!(stopped, Ok(Ok(()))));
    assert!(config.output_dir.join(crate::charts::CURRENT_PRICES_FILE).exists());
  }
}
