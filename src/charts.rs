use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use common::structs::*;
use plotters::prelude::*;

pub const CURRENT_PRICES_FILE: &str = "current_prices.svg";
pub const PRICE_TRENDS_FILE: &str = "price_trends.svg";

const FONT: &str = "sans-serif";
const PALETTE: [RGBColor; 5] = [
  RGBColor(0xFF, 0x6B, 0x6B),
  RGBColor(0x4E, 0xCD, 0xC4),
  RGBColor(0x45, 0xB7, 0xD1),
  RGBColor(0x96, 0xCE, 0xB4),
  RGBColor(0xFF, 0xEA, 0xA7),
];

fn pick_color(index: usize) -> RGBColor {
  return PALETTE[index % PALETTE.len()];
}

fn to_millis(time: &NaiveDateTime) -> i64 {
  return time.and_utc().timestamp_millis();
}

fn format_millis(millis: i64) -> String {
  match DateTime::from_timestamp_millis(millis) {
    Some(time) => return time.format("%H:%M").to_string(),
    None => return String::new(),
  }
}

fn time_range(series_list: &[&SymbolSeries]) -> Range<i64> {
  let millis = series_list.iter().flat_map(|series| series.points.iter().map(|point| to_millis(&point.time)));
  let min = millis.clone().min().unwrap_or(0);
  let max = millis.max().unwrap_or(0);
  // single instant: widen to a minute each side
  if min == max {
    return (min - 60_000)..(max + 60_000);
  }
  return min..max;
}

fn price_range(series_list: &[&SymbolSeries]) -> Range<f64> {
  let prices = series_list.iter().flat_map(|series| series.points.iter().map(|point| point.price));
  let min = prices.clone().fold(f64::INFINITY, f64::min);
  let max = prices.fold(f64::NEG_INFINITY, f64::max);
  if min.is_finite() == false || max.is_finite() == false {
    return 0.0..1.0;
  }
  let span = max - min;
  let padding = if span > 0.0 { span * 0.05 } else { (max.abs() * 0.01).max(1.0) };
  return (min - padding).max(0.0)..(max + padding);
}

/// Replaces anything that is not safe in a file name.
fn file_stem(symbol: &str) -> String {
  return symbol
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
    .collect();
}

/// Bar chart of the newest price per symbol. Returns false when there was
/// nothing to draw.
pub fn current_prices_chart(latest: &[PriceSnapshot], path: &Path) -> Result<bool> {
  if latest.is_empty() {
    log::warn!("no data available for current prices chart");
    return Ok(false);
  }
  let max_price = latest.iter().fold(0.0_f64, |max, snapshot| max.max(snapshot.price));
  let y_max = if max_price > 0.0 { max_price * 1.1 } else { 1.0 };
  let num_symbols = latest.len() as i32;
  let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
  root.fill(&WHITE)?;
  let mut chart = ChartBuilder::on(&root)
    .caption("Current Cryptocurrency Prices", (FONT, 28).into_font())
    .margin(20)
    .x_label_area_size(50)
    .y_label_area_size(90)
    .build_cartesian_2d((0..num_symbols).into_segmented(), 0.0..y_max)?;
  chart
    .configure_mesh()
    .disable_x_mesh()
    .x_labels(latest.len())
    .x_label_formatter(&|value: &SegmentValue<i32>| match value {
      SegmentValue::CenterOf(index) => latest
        .get(*index as usize)
        .map(|snapshot| snapshot.symbol.clone())
        .unwrap_or_default(),
      _ => String::new(),
    })
    .y_desc("Price (USD)")
    .draw()?;
  chart.draw_series(latest.iter().enumerate().map(|(index, snapshot)| {
    let position = index as i32;
    let mut bar = Rectangle::new(
      [(SegmentValue::Exact(position), 0.0), (SegmentValue::Exact(position + 1), snapshot.price)],
      pick_color(index).filled(),
    );
    bar.set_margin(0, 0, 10, 10);
    return bar;
  }))?;
  chart.draw_series(latest.iter().enumerate().map(|(index, snapshot)| {
    return Text::new(
      format!("${:.2}", snapshot.price),
      (SegmentValue::CenterOf(index as i32), snapshot.price + y_max * 0.01),
      (FONT, 14).into_font(),
    );
  }))?;
  root.present()?;
  log::info!("current prices chart saved as {}", path.display());
  return Ok(true);
}

fn line_chart(series_list: &[&SymbolSeries], caption: &str, annotate_latest: bool, path: &Path) -> Result<()> {
  let root = SVGBackend::new(path, (1400, 800)).into_drawing_area();
  root.fill(&WHITE)?;
  let mut chart = ChartBuilder::on(&root)
    .caption(caption, (FONT, 28).into_font())
    .margin(20)
    .x_label_area_size(50)
    .y_label_area_size(90)
    .build_cartesian_2d(time_range(series_list), price_range(series_list))?;
  chart
    .configure_mesh()
    .x_labels(12)
    .x_label_formatter(&|millis: &i64| format_millis(*millis))
    .x_desc("Time")
    .y_desc("Price (USD)")
    .draw()?;
  for (index, series) in series_list.iter().enumerate() {
    let color = pick_color(index);
    let points: Vec<(i64, f64)> = series.points.iter().map(|point| (to_millis(&point.time), point.price)).collect();
    chart
      .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
      .label(series.symbol.to_uppercase())
      .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    chart.draw_series(points.iter().map(|(x, y)| Circle::new((*x, *y), 3, color.filled())))?;
    if annotate_latest {
      if let Some(&(x, y)) = points.last() {
        let label = EmptyElement::at((x, y)) + Text::new(format!("${y:.2}"), (10, 0), (FONT, 14).into_font());
        chart.draw_series(std::iter::once(label))?;
      }
    }
  }
  chart
    .configure_series_labels()
    .background_style(&WHITE.mix(0.8))
    .border_style(&BLACK)
    .draw()?;
  root.present()?;
  return Ok(());
}

/// Every symbol with at least two points on one chart, newest price
/// annotated.
pub fn trend_chart(series_map: &SeriesMap, path: &Path) -> Result<bool> {
  let series_list: Vec<&SymbolSeries> = series_map.values().filter(|series| series.len() >= 2).collect();
  if series_list.is_empty() {
    log::warn!("no historical data available for trend chart");
    return Ok(false);
  }
  line_chart(&series_list, "Cryptocurrency Price Trends", true, path)?;
  log::info!("price trends chart saved as {}", path.display());
  return Ok(true);
}

/// One chart per symbol, written as `<symbol>_price.svg` under `output_dir`.
pub fn individual_charts(series_map: &SeriesMap, output_dir: &Path) -> Result<Vec<PathBuf>> {
  let mut written = vec![];
  for series in series_map.values() {
    if series.is_empty() {
      continue;
    }
    let path = output_dir.join(format!("{}_price.svg", file_stem(&series.symbol)));
    let caption = format!("{} Price Chart", series.symbol.to_uppercase());
    line_chart(&[series], &caption, false, &path)?;
    log::info!("{} chart saved as {}", series.symbol, path.display());
    written.push(path);
  }
  return Ok(written);
}
