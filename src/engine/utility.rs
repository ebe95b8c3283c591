/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Largest value, ignoring NaN. Returns `None` for empty input.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Smallest value, ignoring NaN. Returns `None` for empty input.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[50.0, 70.0]), Some(60.0));
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_min_max() {
        let v = [55.0, 31.0, 99.0];
        assert_eq!(max(&v), Some(99.0));
        assert_eq!(min(&v), Some(31.0));
        assert_eq!(max(&[]), None);
        assert_eq!(min(&[]), None);
    }
}
