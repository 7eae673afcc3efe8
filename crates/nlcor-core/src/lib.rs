// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared types and numerics for the nlcor estimator.

pub mod error;
pub mod numerics;
pub mod results;
pub mod sample;

pub use error::NlcorError;
pub use numerics::{kahan_sum, prefix_products, prefix_sum_squares, prefix_sums, stable_mean};
pub use results::{
    CorrelationEstimate, Diagnostics, NetCorrelation, SegmentCorrelation,
    segments_from_breakpoints, validate_breakpoints,
};
pub use sample::{MIN_SAMPLE_LEN, SortedSample};
