use crate::math;
use crate::structs::*;

pub fn series_change(series: &SymbolSeries, basis: ChangeBasis) -> PriceChange {
  let num_points = series.points.len();
  if num_points < 2 {
    return PriceChange::Undefined;
  }
  let latest = &series.points[num_points - 1];
  let base = match basis {
    ChangeBasis::FirstToLast => &series.points[0],
    ChangeBasis::PreviousToLast => &series.points[num_points - 2],
  };
  return match math::percentage_change(base.price, latest.price) {
    Some(percent) => PriceChange::Percent(percent),
    None => PriceChange::Undefined,
  };
}

pub fn summarize(series_map: &SeriesMap, basis: ChangeBasis) -> Vec<SymbolSummary> {
  let mut summaries = vec![];
  for series in series_map.values() {
    let latest = match series.last() {
      Some(latest) => latest,
      None => continue,
    };
    summaries.push(SymbolSummary {
      symbol: series.symbol.clone(),
      latest_price: latest.price,
      change: series_change(series, basis),
    });
  }
  return summaries;
}
