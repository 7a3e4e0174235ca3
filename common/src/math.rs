pub fn round(x: f64, decimals: u32) -> f64 {
  let y = 10_i64.pow(decimals) as f64;
  return (x * y).round() / y;
}

/// Signed change from `old_value` to `new_value` in percent. `None` when the
/// base is zero or either side is not a finite number.
pub fn percentage_change(old_value: f64, new_value: f64) -> Option<f64> {
  if old_value == 0.0 || old_value.is_finite() == false || new_value.is_finite() == false {
    return None;
  }
  let delta = new_value - old_value;
  return Some(delta / old_value * 100.0);
}
