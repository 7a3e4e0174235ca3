use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::json_time::RawTime;
use crate::structs::*;

#[derive(Error, Debug)]
pub enum LoadError {
  #[error("file {0} not found")]
  NotFound(PathBuf),

  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed json (line {line}): {source}")]
  Json {
    line: usize,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum RawPrice {
  Number(f64),
  Text(String),
}

/// One record as written by the monitor, before validation.
#[derive(Deserialize, Debug, Clone)]
struct RawSnapshot {
  symbol: String,
  price: RawPrice,
  time: RawTime,
}

impl RawSnapshot {
  fn validate(self) -> Result<PriceSnapshot, String> {
    let price = match &self.price {
      RawPrice::Number(value) => *value,
      RawPrice::Text(text) => text.trim().parse::<f64>().map_err(|err| format!("invalid price {text:?}: {err}"))?,
    };
    if price.is_finite() == false || price < 0.0 {
      return Err(format!("price out of range: {price}"));
    }
    let time = self.time.to_naive()?;
    return Ok(PriceSnapshot {
      symbol: self.symbol,
      price,
      time,
    });
  }
}

// position is the 1-based array index or json-lines line number
fn collect_valid(raw_snapshots: Vec<(usize, RawSnapshot)>) -> Vec<PriceSnapshot> {
  let mut snapshots = vec![];
  for (position, raw_snapshot) in raw_snapshots {
    let symbol = raw_snapshot.symbol.clone();
    match raw_snapshot.validate() {
      Ok(snapshot) => snapshots.push(snapshot),
      Err(reason) => log::warn!("skipping record {position} symbol = {symbol}: {reason}"),
    }
  }
  return snapshots;
}

/// Parses either a JSON array or newline-delimited JSON, picked by the first
/// non-whitespace character.
pub fn parse_snapshots(text: &str) -> Result<Vec<PriceSnapshot>, LoadError> {
  let trimmed = text.trim_start();
  if trimmed.is_empty() {
    return Ok(vec![]);
  }
  if trimmed.starts_with('[') {
    let raw_snapshots: Vec<RawSnapshot> = serde_json::from_str(text).map_err(|source| LoadError::Json {
      line: source.line(),
      source,
    })?;
    let numbered = raw_snapshots
      .into_iter()
      .enumerate()
      .map(|(index, raw_snapshot)| (index + 1, raw_snapshot))
      .collect();
    return Ok(collect_valid(numbered));
  }
  let mut raw_snapshots = vec![];
  for (index, line) in text.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    let raw_snapshot: RawSnapshot = serde_json::from_str(line).map_err(|source| LoadError::Json {
      line: index + 1,
      source,
    })?;
    raw_snapshots.push((index + 1, raw_snapshot));
  }
  return Ok(collect_valid(raw_snapshots));
}

pub fn load_snapshots(path: &Path) -> Result<Vec<PriceSnapshot>, LoadError> {
  let text = match std::fs::read_to_string(path) {
    Ok(text) => text,
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
      return Err(LoadError::NotFound(path.to_path_buf()));
    }
    Err(source) => {
      return Err(LoadError::Io {
        path: path.to_path_buf(),
        source,
      });
    }
  };
  let snapshots = parse_snapshots(&text)?;
  log::info!("loaded {} snapshots from {}", snapshots.len(), path.display());
  return Ok(snapshots);
}

/// Like `load_snapshots`, but a missing file or malformed JSON yields an
/// empty batch.
pub fn load_snapshots_or_empty(path: &Path) -> Result<Vec<PriceSnapshot>, LoadError> {
  match load_snapshots(path) {
    Ok(snapshots) => return Ok(snapshots),
    Err(LoadError::NotFound(path)) => {
      log::warn!("{} not found, treating as empty", path.display());
      return Ok(vec![]);
    }
    Err(err @ LoadError::Json { .. }) => {
      log::warn!("{err}, treating as empty");
      return Ok(vec![]);
    }
    Err(err) => return Err(err),
  }
}
