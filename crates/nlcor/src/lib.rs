// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Nonlinear correlation estimation via adaptive segmentation.
//!
//! The estimator sorts a sample pair by the causal variable, partitions the
//! sorted order into spatial windows, greedily fuses adjacent windows whose
//! linear correlation evidence is compatible or jointly stronger, and
//! aggregates the retained per-segment statistics into one estimate with a
//! multiplicity-corrected p-value. `nlcor(x, y)` is directional:
//! `nlcor(y, x)` generally differs.
//!
//! ```
//! use nlcor::{EstimatorOptions, nlcor};
//!
//! let x: Vec<f64> = (1..=100).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&v| (v / 10.0).sin()).collect();
//!
//! let estimate = nlcor(&x, &y, &EstimatorOptions::default()).unwrap();
//! assert!(estimate.cor_estimate > 0.5);
//! assert!(estimate.adjusted_p_value < 0.05);
//! ```

pub mod aggregate;
pub mod estimator;
pub mod merge;
pub mod search;
pub mod segmenter;

pub use aggregate::net_correlation;
pub use estimator::{EstimatorOptions, nlcor, nlcor_with_plot};
pub use merge::{MergeOutcome, MergePolicy, greedy_merge};
pub use search::{SearchOutcome, fixed_refine_run, refinement_search};
pub use segmenter::{MIN_SEGMENT_SIZE, segment_breakpoints, validate_refine};

pub use nlcor_core::{
    CorrelationEstimate, Diagnostics, NetCorrelation, NlcorError, SegmentCorrelation,
    SortedSample, segments_from_breakpoints, validate_breakpoints,
};
pub use nlcor_stats::{
    CorrelationPlot, LineStyle, PairCache, PlotStyle, correlation_plot, segment_correlation,
};
