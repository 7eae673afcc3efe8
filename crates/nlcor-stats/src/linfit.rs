// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nlcor_core::{
    NlcorError, SortedSample, segments_from_breakpoints, stable_mean, validate_breakpoints,
};

/// Overall p-value below which segment lines render solid.
const SOLID_LINE_SIGNIFICANCE: f64 = 0.05;

/// Rendering style for the fitted segment lines.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Pass-through styling for the external plotting collaborator.
///
/// These values never influence the numeric estimate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    pub line_thickness: f64,
    pub line_opacity: f64,
    pub title: Option<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            line_thickness: 1.0,
            line_opacity: 1.0,
            title: None,
        }
    }
}

impl PlotStyle {
    pub fn validate(&self) -> Result<(), NlcorError> {
        if !self.line_thickness.is_finite() || self.line_thickness <= 0.0 {
            return Err(NlcorError::invalid_input(format!(
                "line_thickness must be finite and > 0.0; got {}",
                self.line_thickness
            )));
        }
        if !self.line_opacity.is_finite() || !(0.0..=1.0).contains(&self.line_opacity) {
            return Err(NlcorError::invalid_input(format!(
                "line_opacity must lie in [0, 1]; got {}",
                self.line_opacity
            )));
        }
        Ok(())
    }
}

/// Hand-off data for the external renderer: the sorted scatter points plus one
/// least-squares line per final segment.
///
/// `fit` holds `(x, fitted)` points with a single `None` entry injected
/// between consecutive segments, so the rendered lines stay visually disjoint
/// instead of interpolating across segment boundaries.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationPlot {
    pub points: Vec<(f64, f64)>,
    pub fit: Vec<Option<(f64, f64)>>,
    pub line_style: LineStyle,
    pub style: PlotStyle,
}

/// Builds the per-segment fitted lines for a final partition.
///
/// A segment's own fit significance never changes the drawn values; the gap
/// convention is the only per-segment special-casing. The line style is solid
/// exactly when the overall adjusted p-value is below 0.05.
pub fn correlation_plot(
    sample: &SortedSample,
    breakpoints: &[usize],
    adjusted_p_value: f64,
    style: &PlotStyle,
) -> Result<CorrelationPlot, NlcorError> {
    style.validate()?;
    validate_breakpoints(sample.n(), breakpoints)?;
    if !adjusted_p_value.is_finite() || !(0.0..=1.0).contains(&adjusted_p_value) {
        return Err(NlcorError::invalid_input(format!(
            "adjusted_p_value must lie in [0, 1]; got {adjusted_p_value}"
        )));
    }

    let segments = segments_from_breakpoints(sample.n(), breakpoints);
    let mut fit = Vec::with_capacity(sample.n() + segments.len().saturating_sub(1));
    for (idx, &(start, end)) in segments.iter().enumerate() {
        let xs = &sample.x()[start..end];
        let ys = &sample.y()[start..end];
        let (intercept, slope) = least_squares_line(xs, ys);
        for &xv in xs {
            fit.push(Some((xv, intercept + slope * xv)));
        }
        if idx + 1 < segments.len() {
            fit.push(None);
        }
    }

    let line_style = if adjusted_p_value < SOLID_LINE_SIGNIFICANCE {
        LineStyle::Solid
    } else {
        LineStyle::Dashed
    };

    Ok(CorrelationPlot {
        points: sample.x().iter().copied().zip(sample.y().iter().copied()).collect(),
        fit,
        line_style,
        style: style.clone(),
    })
}

/// Ordinary least-squares line `(intercept, slope)` for one segment.
///
/// Segments with no spread in `x` fall back to a flat line at the mean `y`.
fn least_squares_line(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let mean_x = stable_mean(xs);
    let mean_y = stable_mean(ys);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xv, &yv) in xs.iter().zip(ys) {
        let dx = xv - mean_x;
        sxx += dx * dx;
        sxy += dx * (yv - mean_y);
    }

    if sxx == 0.0 {
        return (mean_y, 0.0);
    }
    let slope = sxy / sxx;
    (mean_y - slope * mean_x, slope)
}
