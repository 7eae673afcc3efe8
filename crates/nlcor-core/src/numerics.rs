// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Computes a compensated sum using Kahan summation.
///
/// Empty input returns `0.0`.
pub fn kahan_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            c += (sum - t) + value;
        } else {
            c += (value - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Computes the mean using Welford's online update.
///
/// Empty input returns `NaN`.
pub fn stable_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut mean = 0.0;
    for (idx, &value) in values.iter().enumerate() {
        let n = (idx + 1) as f64;
        mean += (value - mean) / n;
    }
    mean
}

fn compensated_prefix<F>(len: usize, term: F) -> Vec<f64>
where
    F: Fn(usize) -> f64,
{
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0);

    let mut sum = 0.0;
    let mut c = 0.0;
    for idx in 0..len {
        let value = term(idx);
        let t = sum + value;
        if sum.abs() >= value.abs() {
            c += (sum - t) + value;
        } else {
            c += (value - t) + sum;
        }
        sum = t;
        prefix.push(sum + c);
    }

    prefix
}

/// Returns Kahan-compensated prefix sums with length `n + 1` and `prefix[0] = 0.0`.
pub fn prefix_sums(values: &[f64]) -> Vec<f64> {
    compensated_prefix(values.len(), |idx| values[idx])
}

/// Returns Kahan-compensated prefix sums of squares with length `n + 1`.
pub fn prefix_sum_squares(values: &[f64]) -> Vec<f64> {
    compensated_prefix(values.len(), |idx| values[idx] * values[idx])
}

/// Returns Kahan-compensated prefix sums of elementwise products with length `n + 1`.
///
/// Panics if the slices differ in length; callers pass the two halves of one
/// validated sample pair.
pub fn prefix_products(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    assert_eq!(
        xs.len(),
        ys.len(),
        "prefix_products length mismatch: xs={}, ys={}",
        xs.len(),
        ys.len()
    );
    compensated_prefix(xs.len(), |idx| xs[idx] * ys[idx])
}

#[cfg(test)]
mod tests {
    use super::{kahan_sum, prefix_products, prefix_sum_squares, prefix_sums, stable_mean};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "expected {expected}, got {actual}, |diff|={diff}, tol={tol}"
        );
    }

    #[test]
    fn stable_mean_known_values_and_empty() {
        assert_close(stable_mean(&[1.0, 2.0, 3.0, 4.0]), 2.5, 1e-12);
        assert!(stable_mean(&[]).is_nan());
    }

    #[test]
    fn stable_mean_near_constant_large_magnitude() {
        let values = [1e12 + 1.0, 1e12 + 2.0, 1e12 + 3.0, 1e12 + 4.0];
        let mean = stable_mean(&values);
        assert_close(mean, 1e12 + 2.5, 1e-3);
    }

    #[test]
    fn prefix_helpers_shape_and_empty_behavior() {
        assert_eq!(prefix_sums(&[]), vec![0.0]);
        assert_eq!(prefix_sum_squares(&[]), vec![0.0]);
        assert_eq!(prefix_products(&[], &[]), vec![0.0]);

        let values = [1.0, -2.0, 3.0];
        assert_eq!(prefix_sums(&values).len(), values.len() + 1);
        assert_eq!(prefix_sums(&values)[0], 0.0);
    }

    #[test]
    fn prefix_helpers_match_segment_identities() {
        let xs = [-2.0, 0.5, 1.25, -3.5, 7.0, 4.75];
        let ys = [1.5, -0.25, 2.0, 0.75, -1.0, 3.25];
        let prefix = prefix_sums(&xs);
        let prefix_sq = prefix_sum_squares(&xs);
        let prefix_xy = prefix_products(&xs, &ys);

        for start in 0..=xs.len() {
            for end in start..=xs.len() {
                let expected_sum: f64 = xs[start..end].iter().sum();
                assert_close(prefix[end] - prefix[start], expected_sum, 1e-12);

                let expected_sq: f64 = xs[start..end].iter().map(|v| v * v).sum();
                assert_close(prefix_sq[end] - prefix_sq[start], expected_sq, 1e-12);

                let expected_xy: f64 = xs[start..end]
                    .iter()
                    .zip(&ys[start..end])
                    .map(|(a, b)| a * b)
                    .sum();
                assert_close(prefix_xy[end] - prefix_xy[start], expected_xy, 1e-12);
            }
        }
    }

    #[test]
    fn kahan_sum_improves_cancellation_accuracy() {
        let values = [1e16, 1.0, -1e16];
        let naive_sum: f64 = values.iter().sum();
        assert_eq!(naive_sum, 0.0);
        assert_close(kahan_sum(&values), 1.0, 1e-12);
    }

    #[test]
    fn compensated_prefix_tracks_cancellation() {
        let values = [1e16, 1.0, -1e16];
        let prefix = prefix_sums(&values);
        assert_close(
            *prefix.last().expect("prefix is non-empty"),
            kahan_sum(&values),
            1e-12,
        );
    }

    #[test]
    #[should_panic(expected = "prefix_products length mismatch")]
    fn prefix_products_panics_on_length_mismatch() {
        prefix_products(&[1.0, 2.0], &[1.0]);
    }
}
