// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Segment-level Pearson statistics and per-segment fit data for nlcor.

pub mod linfit;
pub mod pearson;

pub use linfit::{CorrelationPlot, LineStyle, PlotStyle, correlation_plot};
pub use pearson::{MIN_CORRELATION_LEN, PairCache, segment_correlation};
