// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::merge::MergePolicy;
use crate::search::{fixed_refine_run, refinement_search};
use nlcor_core::{CorrelationEstimate, Diagnostics, NlcorError, SortedSample};
use nlcor_stats::{CorrelationPlot, PairCache, PlotStyle, correlation_plot};
use std::borrow::Cow;
use std::time::Instant;

/// Caller-facing configuration for one estimation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EstimatorOptions {
    /// Fixed granularity. `None` runs the refinement ladder; a small value
    /// such as `0.01` raises the resolution of local correlation and skips
    /// the search.
    pub refine: Option<f64>,
    /// Per-segment significance level used by merge decisions and the
    /// multiplicity correction.
    pub significance: f64,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            refine: None,
            significance: 0.05,
        }
    }
}

impl EstimatorOptions {
    pub fn validate(&self) -> Result<(), NlcorError> {
        MergePolicy {
            significance: self.significance,
        }
        .validate()?;
        if let Some(refine) = self.refine
            && (!refine.is_finite() || refine <= 0.0 || refine >= 1.0)
        {
            return Err(NlcorError::invalid_input(format!(
                "refine must lie in the open interval (0, 1); got {refine}"
            )));
        }
        Ok(())
    }
}

/// Estimates the nonlinear correlation of `y` on `x`.
///
/// `x` is the causal variable and `y` the dependent one; the two roles are not
/// interchangeable. Inputs must be equal-length sequences of more than 10
/// finite values. The returned estimate lies in `[0, 1]`; an adjusted p-value
/// above 0.05 means the estimate should be read as noise.
pub fn nlcor(
    x: &[f64],
    y: &[f64],
    options: &EstimatorOptions,
) -> Result<CorrelationEstimate, NlcorError> {
    let (_, estimate) = estimate_pair(x, y, options)?;
    Ok(estimate)
}

/// Like [`nlcor`], additionally producing the fitted-line hand-off data for an
/// external plotting collaborator.
///
/// Styling parameters pass through to the plot data untouched and never
/// influence the numeric result.
pub fn nlcor_with_plot(
    x: &[f64],
    y: &[f64],
    options: &EstimatorOptions,
    style: &PlotStyle,
) -> Result<(CorrelationEstimate, CorrelationPlot), NlcorError> {
    style.validate()?;
    let (sample, estimate) = estimate_pair(x, y, options)?;
    let plot = correlation_plot(&sample, &estimate.breakpoints, estimate.adjusted_p_value, style)?;
    Ok((estimate, plot))
}

fn estimate_pair(
    x: &[f64],
    y: &[f64],
    options: &EstimatorOptions,
) -> Result<(SortedSample, CorrelationEstimate), NlcorError> {
    options.validate()?;
    let started_at = Instant::now();

    let sample = SortedSample::from_xy(x, y)?;
    let cache = PairCache::new(&sample);
    let policy = MergePolicy {
        significance: options.significance,
    };

    let (outcome, algorithm) = match options.refine {
        Some(refine) => (fixed_refine_run(&cache, refine, &policy)?, "fixed_refine"),
        None => (refinement_search(&cache, &policy)?, "refinement_search"),
    };

    let runtime_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut diagnostics = Diagnostics {
        n: sample.n(),
        runtime_ms: Some(runtime_ms),
        algorithm: Cow::Borrowed(algorithm),
        notes: vec![],
        warnings: vec![],
    };
    match outcome.refine {
        Some(refine) => diagnostics.notes.push(format!(
            "refine={refine:.2} won after {} trial(s) with {} segment(s)",
            outcome.trials,
            outcome.breakpoints.len()
        )),
        None => diagnostics.notes.push(format!(
            "whole-sample linear baseline retained after {} trials",
            outcome.trials
        )),
    }

    let estimate = CorrelationEstimate::new(
        sample.n(),
        outcome.cor_estimate,
        outcome.adjusted_p_value,
        outcome.breakpoints,
        outcome.refine,
        diagnostics,
    )?;
    Ok((sample, estimate))
}

#[cfg(test)]
mod tests {
    use super::{EstimatorOptions, nlcor, nlcor_with_plot};
    use nlcor_core::NlcorError;
    use nlcor_stats::{LineStyle, PlotStyle};

    fn linear_pair(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 5.0).collect();
        (x, y)
    }

    #[test]
    fn options_default_and_validation() {
        let options = EstimatorOptions::default();
        assert_eq!(options.refine, None);
        assert_eq!(options.significance, 0.05);
        options.validate().expect("default options are valid");

        let err = EstimatorOptions {
            significance: 1.0,
            ..EstimatorOptions::default()
        }
        .validate()
        .expect_err("significance at 1.0 must fail");
        assert!(matches!(err, NlcorError::InvalidInput(_)));

        let err = EstimatorOptions {
            refine: Some(1.5),
            ..EstimatorOptions::default()
        }
        .validate()
        .expect_err("refine above 1 must fail");
        assert!(err.to_string().contains("refine"));
    }

    #[test]
    fn linear_pair_estimates_full_correlation() {
        let (x, y) = linear_pair(100);
        let estimate = nlcor(&x, &y, &EstimatorOptions::default())
            .expect("estimation should succeed");

        assert!(estimate.cor_estimate > 0.99);
        assert!(estimate.adjusted_p_value < 0.01);
        assert_eq!(estimate.breakpoints, vec![100]);
        assert_eq!(estimate.refine, None);
        assert_eq!(estimate.diagnostics.n, 100);
        assert_eq!(estimate.diagnostics.algorithm, "refinement_search");
        assert!(estimate.diagnostics.runtime_ms.is_some());
        assert!(!estimate.diagnostics.notes.is_empty());
    }

    #[test]
    fn fixed_refine_is_reported_in_the_result() {
        let (x, y) = linear_pair(100);
        let estimate = nlcor(
            &x,
            &y,
            &EstimatorOptions {
                refine: Some(0.1),
                ..EstimatorOptions::default()
            },
        )
        .expect("estimation should succeed");

        assert_eq!(estimate.refine, Some(0.1));
        assert_eq!(estimate.diagnostics.algorithm, "fixed_refine");
        assert_eq!(estimate.breakpoints, vec![100], "linear data fuses fully");
    }

    #[test]
    fn invalid_inputs_fail_before_any_segmentation() {
        let (x, y) = linear_pair(100);

        let err = nlcor(&x[..50], &y, &EstimatorOptions::default())
            .expect_err("length mismatch must fail");
        assert!(err.to_string().contains("equal length"));

        let err = nlcor(&x[..10], &y[..10], &EstimatorOptions::default())
            .expect_err("short sample must fail");
        assert!(err.to_string().contains("must be > 10"));

        let mut with_nan = x.clone();
        with_nan[3] = f64::NAN;
        let err = nlcor(&with_nan, &y, &EstimatorOptions::default())
            .expect_err("NaN input must fail");
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn plot_hand_off_uses_the_final_partition() {
        let (x, y) = linear_pair(60);
        let (estimate, plot) = nlcor_with_plot(
            &x,
            &y,
            &EstimatorOptions::default(),
            &PlotStyle::default(),
        )
        .expect("estimation with plot should succeed");

        assert_eq!(plot.points.len(), 60);
        let gaps = plot.fit.iter().filter(|f| f.is_none()).count();
        assert_eq!(gaps, estimate.breakpoints.len() - 1);
        assert_eq!(plot.line_style, LineStyle::Solid, "strong linear fit draws solid");
    }

    #[test]
    fn invalid_plot_style_fails_before_estimation() {
        let (x, y) = linear_pair(60);
        let err = nlcor_with_plot(
            &x,
            &y,
            &EstimatorOptions::default(),
            &PlotStyle {
                line_opacity: -0.5,
                ..PlotStyle::default()
            },
        )
        .expect_err("invalid opacity must fail");
        assert!(err.to_string().contains("line_opacity"));
    }
}
