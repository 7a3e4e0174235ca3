use std::fmt::Write;

use common::structs::*;

fn format_change(change: &PriceChange, undefined_label: &str) -> String {
  match change {
    PriceChange::Percent(percent) => return format!("{percent:+.2}%"),
    PriceChange::Undefined => return undefined_label.to_string(),
  }
}

/// First-vs-latest summary, printed after every redraw.
pub fn performance_summary(summaries: &[SymbolSummary]) -> String {
  let rule = "=".repeat(50);
  let mut output = String::new();
  writeln!(output, "\n{rule}").ok();
  writeln!(output, "CRYPTO PERFORMANCE SUMMARY").ok();
  writeln!(output, "{rule}").ok();
  for summary in summaries {
    let change = format_change(&summary.change, "New");
    writeln!(output, "{:12}: ${:8.2} ({change})", summary.symbol, summary.latest_price).ok();
  }
  writeln!(output, "{rule}").ok();
  return output;
}

/// Previous-vs-latest table.
pub fn price_table(summaries: &[SymbolSummary]) -> String {
  let rule = "-".repeat(40);
  let mut output = String::new();
  writeln!(output, "\nLatest Prices:").ok();
  writeln!(output, "{rule}").ok();
  writeln!(output, "{:<15} {:<12} {}", "Cryptocurrency", "Latest Price", "Change").ok();
  writeln!(output, "{rule}").ok();
  for summary in summaries {
    let change = format_change(&summary.change, "N/A");
    writeln!(output, "{:<15} ${:<11.2} {change}", summary.symbol.to_uppercase(), summary.latest_price).ok();
  }
  return output;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn summaries() -> Vec<SymbolSummary> {
    return vec![
      SymbolSummary {
        symbol: String::from("bitcoin"),
        latest_price: 43000.5,
        change: PriceChange::Percent(2.346),
      },
      SymbolSummary {
        symbol: String::from("cardano"),
        latest_price: 0.5,
        change: PriceChange::Percent(-1.5),
      },
      SymbolSummary {
        symbol: String::from("solana"),
        latest_price: 98.0,
        change: PriceChange::Undefined,
      },
    ];
  }

  #[test]
  fn should_format_performance_summary() {
    let output = performance_summary(&summaries());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[1], "=".repeat(50));
    assert_eq!(lines[2], "CRYPTO PERFORMANCE SUMMARY");
    assert_eq!(lines[4], "bitcoin     : $43000.50 (+2.35%)");
    assert_eq!(lines[5], "cardano     : $    0.50 (-1.50%)");
    assert_eq!(lines[6], "solana      : $   98.00 (New)");
  }

  #[test]
  fn should_format_price_table() {
    let output = price_table(&summaries());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[1], "Latest Prices:");
    assert_eq!(lines[3], "Cryptocurrency  Latest Price Change");
    assert_eq!(lines[5], "BITCOIN         $43000.50    +2.35%");
    assert_eq!(lines[7], "SOLANA          $98.00       N/A");
  }

  #[test]
  fn should_render_headers_for_empty_input() {
    assert_eq!(price_table(&[]).lines().count(), 5);
    assert!(performance_summary(&[]).contains("CRYPTO PERFORMANCE SUMMARY"));
  }
}
