use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::structs::*;

pub const DEFAULT_WINDOW: usize = 50;

impl SymbolSeries {
  pub fn new(symbol: &str) -> SymbolSeries {
    return SymbolSeries {
      symbol: symbol.to_string(),
      points: vec![],
    };
  }

  pub fn len(&self) -> usize {
    return self.points.len();
  }

  pub fn is_empty(&self) -> bool {
    return self.points.is_empty();
  }

  pub fn first(&self) -> Option<&PricePoint> {
    return self.points.first();
  }

  pub fn last(&self) -> Option<&PricePoint> {
    return self.points.last();
  }

  /// Inserts after every point with an equal or earlier time, so arrivals
  /// that are out of order still leave the series sorted.
  pub fn push(&mut self, point: PricePoint) {
    let index = self.points.partition_point(|existing| existing.time <= point.time);
    self.points.insert(index, point);
  }

  /// Drops the oldest points until at most `window` remain. A window of 0
  /// means unbounded.
  pub fn truncate_to(&mut self, window: usize) {
    if window == 0 || self.points.len() <= window {
      return;
    }
    let excess = self.points.len() - window;
    self.points.drain(..excess);
  }
}

pub fn group_by_symbol(snapshots: &[PriceSnapshot]) -> SeriesMap {
  let mut series_map = SeriesMap::new();
  for snapshot in snapshots {
    let series = series_map
      .entry(snapshot.symbol.clone())
      .or_insert_with(|| SymbolSeries::new(&snapshot.symbol));
    series.push(PricePoint {
      time: snapshot.time,
      price: snapshot.price,
    });
  }
  return series_map;
}

pub fn apply_window(series_map: &mut SeriesMap, window: usize) {
  for series in series_map.values_mut() {
    series.truncate_to(window);
  }
}

/// Appends a freshly loaded batch to history kept from earlier polls. A
/// reading already held before this batch (same time and price) is not added
/// again. Identical readings inside one batch are all kept, as
/// `group_by_symbol` keeps them.
pub fn extend_history(series_map: &mut SeriesMap, snapshots: &[PriceSnapshot], window: usize) {
  let held: HashSet<(String, NaiveDateTime, u64)> = series_map
    .values()
    .flat_map(|series| {
      series
        .points
        .iter()
        .map(|point| (series.symbol.clone(), point.time, point.price.to_bits()))
    })
    .collect();
  for snapshot in snapshots {
    if held.contains(&(snapshot.symbol.clone(), snapshot.time, snapshot.price.to_bits())) {
      continue;
    }
    let series = series_map
      .entry(snapshot.symbol.clone())
      .or_insert_with(|| SymbolSeries::new(&snapshot.symbol));
    series.push(PricePoint {
      time: snapshot.time,
      price: snapshot.price,
    });
  }
  apply_window(series_map, window);
}

pub fn flatten(series_map: &SeriesMap) -> Vec<PriceSnapshot> {
  let mut snapshots = vec![];
  for series in series_map.values() {
    for point in &series.points {
      snapshots.push(PriceSnapshot {
        symbol: series.symbol.clone(),
        price: point.price,
        time: point.time,
      });
    }
  }
  return snapshots;
}

pub fn latest_snapshots(series_map: &SeriesMap) -> Vec<PriceSnapshot> {
  return series_map
    .values()
    .filter_map(|series| {
      let point = series.last()?;
      return Some(PriceSnapshot {
        symbol: series.symbol.clone(),
        price: point.price,
        time: point.time,
      });
    })
    .collect();
}
