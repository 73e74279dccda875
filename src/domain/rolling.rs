//! Trailing-window smoothing for chart series.

/// Rounds to two decimal places, the precision the charts consume.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trailing mean over up to `window` points.
///
/// At index `i` the mean covers `values[i + 1 - window ..= i]`; near the
/// start of the series the window shrinks to the points that exist
/// instead of padding with zeros. Each mean is rounded to two decimals.
/// A `window` of zero is treated as one.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let from = i.saturating_sub(window - 1);
            let slice = values.get(from..=i).unwrap_or_default();
            let len = slice.len().max(1);
            #[allow(clippy::cast_precision_loss)]
            let mean = slice.iter().sum::<f64>() / len as f64;
            round2(mean)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn first_point_is_its_own_mean() {
        let out = rolling_mean(&[5.0, 1.0], 7);
        assert_eq!(out.first().copied(), Some(5.0));
    }

    #[test]
    fn window_shrinks_at_the_series_start() {
        // 0, 1, 2, ... so the mean of 0..=i is i/2.
        let values: Vec<f64> = (0..12).map(f64::from).collect();
        let out = rolling_mean(&values, 7);

        // Index 6 covers elements 0..=6.
        assert_eq!(out.get(6).copied(), Some(3.0));
        // Index 10 covers the trailing window 4..=10.
        assert_eq!(out.get(10).copied(), Some(7.0));
        // Index 3 covers only the 4 available elements.
        assert_eq!(out.get(3).copied(), Some(1.5));
    }

    #[test]
    fn means_are_rounded_to_two_decimals() {
        let out = rolling_mean(&[1.0, 0.0, 0.0], 7);
        // 1/3 rounds to 0.33.
        assert_eq!(out.last().copied(), Some(0.33));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rolling_mean(&[], 7).is_empty());
    }

    #[test]
    fn window_of_one_is_the_identity() {
        let values = [3.0, 1.0, 4.0];
        assert_eq!(rolling_mean(&values, 1), values.to_vec());
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(2.0), 2.0);
    }
}
