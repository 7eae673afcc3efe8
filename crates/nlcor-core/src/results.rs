// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::NlcorError;
use std::borrow::Cow;

/// Linear correlation evidence for one segment of the sorted sample.
///
/// Degenerate segments (zero variance in either variable, or fewer than three
/// points) carry the convention `{ cor: 0.0, p_value: 1.0 }`: no evidence of
/// correlation, never an error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentCorrelation {
    /// Pearson coefficient in `[-1, 1]`.
    pub cor: f64,
    /// Two-sided p-value in `[0, 1]`.
    pub p_value: f64,
}

impl SegmentCorrelation {
    /// The no-evidence statistic used for degenerate and nulled segments.
    pub const fn degenerate() -> Self {
        Self {
            cor: 0.0,
            p_value: 1.0,
        }
    }
}

/// Aggregated correlation evidence across the retained segments of one merge run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct NetCorrelation {
    /// Mean absolute per-segment coefficient after multiplicity nulling, in `[0, 1]`.
    pub cor_estimate: f64,
    /// Joint significance of the surviving per-segment p-values, in `[0, 1]`.
    pub adjusted_p_value: f64,
    /// Per-segment statistics after nulling, one entry per retained segment.
    pub segment_cor: Vec<SegmentCorrelation>,
}

/// Execution metadata carried inside estimator results.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub n: usize,
    pub runtime_ms: Option<u64>,
    pub algorithm: Cow<'static, str>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            n: 0,
            runtime_ms: None,
            algorithm: Cow::Borrowed("unspecified"),
            notes: vec![],
            warnings: vec![],
        }
    }
}

/// Validates breakpoint conventions shared by the segmenter and the merger.
///
/// Breakpoints are strictly increasing segment end indices over the sorted
/// sample, with `n` as the mandatory final element.
pub fn validate_breakpoints(n: usize, breakpoints: &[usize]) -> Result<(), NlcorError> {
    if n == 0 {
        if breakpoints.is_empty() {
            return Ok(());
        }
        return Err(NlcorError::invalid_input(format!(
            "breakpoints must be empty when n=0; got breakpoints={breakpoints:?}"
        )));
    }

    if breakpoints.is_empty() {
        return Err(NlcorError::invalid_input(format!(
            "breakpoints must be non-empty and include n={n} as the final element"
        )));
    }

    let mut prev: Option<usize> = None;
    for (idx, &bp) in breakpoints.iter().enumerate() {
        if bp == 0 {
            return Err(NlcorError::invalid_input(format!(
                "breakpoints[{idx}] must be > 0; got 0"
            )));
        }
        if bp > n {
            return Err(NlcorError::invalid_input(format!(
                "breakpoints[{idx}] must be <= n; got breakpoint={bp}, n={n}"
            )));
        }
        if let Some(prev_bp) = prev
            && bp <= prev_bp
        {
            return Err(NlcorError::invalid_input(format!(
                "breakpoints must be strictly increasing and unique: breakpoints[{idx}]={bp}, previous={prev_bp}"
            )));
        }
        prev = Some(bp);
    }

    let last = *breakpoints.last().expect("checked non-empty above");
    if last != n {
        return Err(NlcorError::invalid_input(format!(
            "breakpoints must include n as the final element: last={last}, n={n}"
        )));
    }

    Ok(())
}

/// Converts validated breakpoints into contiguous `[start, end)` segments.
pub fn segments_from_breakpoints(n: usize, breakpoints: &[usize]) -> Vec<(usize, usize)> {
    debug_assert!(
        validate_breakpoints(n, breakpoints).is_ok(),
        "segments_from_breakpoints expects validated breakpoints"
    );

    if n == 0 {
        return vec![];
    }

    let mut segments = Vec::with_capacity(breakpoints.len());
    let mut start = 0usize;
    for &end in breakpoints {
        segments.push((start, end));
        start = end;
    }
    segments
}

/// Final result of one estimation call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationEstimate {
    /// Nonlinear correlation estimate in `[0, 1]`.
    pub cor_estimate: f64,
    /// Significance of the estimate in `[0, 1]`; values above 0.05 are noise.
    pub adjusted_p_value: f64,
    /// Final partition of the sorted sample as segment end indices.
    pub breakpoints: Vec<usize>,
    /// Effective granularity of the winning partition; `None` when the
    /// whole-sample baseline was retained.
    pub refine: Option<f64>,
    pub diagnostics: Diagnostics,
}

impl CorrelationEstimate {
    /// Constructs an estimate after validating bounds and the partition.
    pub fn new(
        n: usize,
        cor_estimate: f64,
        adjusted_p_value: f64,
        breakpoints: Vec<usize>,
        refine: Option<f64>,
        diagnostics: Diagnostics,
    ) -> Result<Self, NlcorError> {
        if !cor_estimate.is_finite() || !(0.0..=1.0).contains(&cor_estimate) {
            return Err(NlcorError::numerical_issue(format!(
                "cor_estimate must lie in [0, 1]; got {cor_estimate}"
            )));
        }
        if !adjusted_p_value.is_finite() || !(0.0..=1.0).contains(&adjusted_p_value) {
            return Err(NlcorError::numerical_issue(format!(
                "adjusted_p_value must lie in [0, 1]; got {adjusted_p_value}"
            )));
        }
        validate_breakpoints(n, &breakpoints)?;

        Ok(Self {
            cor_estimate,
            adjusted_p_value,
            breakpoints,
            refine,
            diagnostics,
        })
    }

    /// The final partition as `[start, end)` segments.
    pub fn segments(&self) -> Vec<(usize, usize)> {
        segments_from_breakpoints(self.diagnostics.n, &self.breakpoints)
    }
}
