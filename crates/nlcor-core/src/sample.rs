// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::NlcorError;

/// Smallest sample the estimator accepts.
pub const MIN_SAMPLE_LEN: usize = 11;

/// A validated pair of sequences re-sorted by the causal variable.
///
/// `nlcor(x, y)` is directional: the index space every downstream component
/// works in is the order of `x` ascending (stable for ties), so swapping the
/// roles of the two sequences generally changes the partition and the
/// estimate. Indices are `0`-based; segments are half-open `[start, end)`
/// ranges over this sorted order.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedSample {
    x: Vec<f64>,
    y: Vec<f64>,
}

fn validate_finite(values: &[f64], name: &str) -> Result<(), NlcorError> {
    for (idx, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(NlcorError::invalid_input(format!(
                "{name}[{idx}] must be finite; got {value}"
            )));
        }
    }
    Ok(())
}

impl SortedSample {
    /// Validates the pair and sorts it by `x` ascending.
    ///
    /// Fails fast on mismatched lengths, samples of 10 or fewer points, and
    /// non-finite values; no missing-value imputation is attempted.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, NlcorError> {
        if x.len() != y.len() {
            return Err(NlcorError::invalid_input(format!(
                "x and y must have equal length; got x={}, y={}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < MIN_SAMPLE_LEN {
            return Err(NlcorError::invalid_input(format!(
                "sample length must be > 10; got n={}",
                x.len()
            )));
        }
        validate_finite(x, "x")?;
        validate_finite(y, "y")?;

        let mut order: Vec<usize> = (0..x.len()).collect();
        // Stable sort: ties in x keep their input order.
        order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

        let sorted_x = order.iter().map(|&idx| x[idx]).collect();
        let sorted_y = order.iter().map(|&idx| y[idx]).collect();
        Ok(Self {
            x: sorted_x,
            y: sorted_y,
        })
    }

    pub fn n(&self) -> usize {
        self.x.len()
    }

    /// The causal variable, sorted ascending.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// The dependent variable, in the order induced by `x`.
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_SAMPLE_LEN, SortedSample};
    use crate::NlcorError;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn from_xy_sorts_by_x_and_carries_y_along() {
        let x = [5.0, 1.0, 4.0, 2.0, 3.0, 9.0, 7.0, 6.0, 8.0, 11.0, 10.0];
        let y: Vec<f64> = x.iter().map(|&v| v * 2.0).collect();

        let sample = SortedSample::from_xy(&x, &y).expect("valid pair should be accepted");
        assert_eq!(sample.n(), x.len());
        for window in sample.x().windows(2) {
            assert!(window[0] <= window[1], "x must be sorted ascending");
        }
        for (&xv, &yv) in sample.x().iter().zip(sample.y()) {
            assert_eq!(yv, xv * 2.0, "pairing must survive the sort");
        }
    }

    #[test]
    fn from_xy_keeps_tie_order_stable() {
        let x = [1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let y = [0.0, 10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        let sample = SortedSample::from_xy(&x, &y).expect("valid pair should be accepted");
        assert_eq!(&sample.y()[1..4], &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn from_xy_rejects_mismatched_lengths() {
        let err = SortedSample::from_xy(&ramp(12), &ramp(11)).expect_err("mismatch must fail");
        assert!(matches!(err, NlcorError::InvalidInput(_)));
        assert!(err.to_string().contains("equal length"));
    }

    #[test]
    fn from_xy_rejects_short_samples() {
        let n = MIN_SAMPLE_LEN - 1;
        let err = SortedSample::from_xy(&ramp(n), &ramp(n)).expect_err("short sample must fail");
        assert!(err.to_string().contains("must be > 10"));
    }

    #[test]
    fn from_xy_rejects_non_finite_values() {
        let mut x = ramp(12);
        x[3] = f64::NAN;
        let err = SortedSample::from_xy(&x, &ramp(12)).expect_err("NaN must fail");
        assert!(err.to_string().contains("x[3]"));

        let mut y = ramp(12);
        y[7] = f64::INFINITY;
        let err = SortedSample::from_xy(&ramp(12), &y).expect_err("inf must fail");
        assert!(err.to_string().contains("y[7]"));
    }
}
