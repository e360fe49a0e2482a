//! Rounding helpers shared by every calculator.
//!
//! One rule everywhere: round half up, ties go toward positive infinity for
//! negative amounts too (-0.005 rounds to 0.00, not -0.01).

/// Round a dollar amount to cents
pub fn round_cents(amount: f64) -> f64 {
    round_places(amount, 2)
}

/// Round to a fixed number of decimal places
pub fn round_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    half_up(value * scale) / scale
}

/// Round to an integer with ties toward positive infinity
fn half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // Avoid reporting -0.0
    rounded + 0.0
}

/// Round to the nearest multiple of `step` (e.g. $50 for indexed limits)
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    half_up(value / step) * step
}

/// Ratio that treats a zero denominator as "no ratio" rather than NaN/inf
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_up() {
        assert_eq!(round_cents(1.005_000_1), 1.01);
        assert_eq!(round_cents(2.675_000_1), 2.68);
        assert_eq!(round_cents(10.0), 10.0);
        assert_eq!(round_cents(0.004), 0.0);
    }

    #[test]
    fn test_negative_half_rounds_up() {
        assert_eq!(round_cents(-1.125), -1.12);
        assert_eq!(round_places(-2.5, 0), -2.0);
        assert_eq!(round_places(2.5, 0), 3.0);
        assert_eq!(round_cents(-1.126), -1.13);

        let tiny = round_cents(-0.004);
        assert_eq!(tiny, 0.0);
        assert!(tiny.is_sign_positive());
    }

    #[test]
    fn test_round_to_nearest_fifty() {
        assert_eq!(round_to_nearest(5124.99, 50.0), 5100.0);
        assert_eq!(round_to_nearest(5125.0, 50.0), 5150.0);
        assert_eq!(round_to_nearest(5000.0, 50.0), 5000.0);
    }

    #[test]
    fn test_safe_ratio_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert!((safe_ratio(1.0, 4.0) - 0.25).abs() < 1e-12);
    }
}
