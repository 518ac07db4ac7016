/// Rounds `num` to `precision` decimal digits, half away from zero.
///
/// `to_fixed(2.345, 2)` is `2.35` and `to_fixed(-2.345, 2)` is `-2.35`.
pub fn to_fixed(num: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    round(num * scale) / scale
}

// Truncation after adding a signed half, not f64::round_ties_even.
fn round(num: f64) -> f64 {
    (num + 0.5f64.copysign(num)).trunc()
}
