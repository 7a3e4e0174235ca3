use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::json_time;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct PriceSnapshot {
  pub symbol: String,
  pub price: f64,
  #[serde(with = "json_time")]
  pub time: NaiveDateTime,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PricePoint {
  pub time: NaiveDateTime,
  pub price: f64,
}

/// Time-ordered price history for one symbol.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SymbolSeries {
  pub symbol: String,
  pub points: Vec<PricePoint>,
}

/// Series keyed by symbol so tables and legends come out in a stable order.
pub type SeriesMap = BTreeMap<String, SymbolSeries>;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PriceChange {
  Percent(f64),
  Undefined,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ChangeBasis {
  // oldest retained point -> newest
  FirstToLast,
  // second newest point -> newest
  PreviousToLast,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SymbolSummary {
  pub symbol: String,
  pub latest_price: f64,
  pub change: PriceChange,
}
