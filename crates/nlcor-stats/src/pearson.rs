// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nlcor_core::{
    SegmentCorrelation, SortedSample, prefix_products, prefix_sum_squares, prefix_sums,
};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Shortest segment with a defined correlation coefficient and t-test.
pub const MIN_CORRELATION_LEN: usize = 3;

/// Relative threshold below which a segment variance counts as zero.
const ZERO_VARIANCE_REL_EPS: f64 = 1e-12;

/// Prefix-stat cache for O(1) segment correlation queries over one sorted sample.
#[derive(Clone, Debug, PartialEq)]
pub struct PairCache {
    prefix_x: Vec<f64>,
    prefix_y: Vec<f64>,
    prefix_xx: Vec<f64>,
    prefix_yy: Vec<f64>,
    prefix_xy: Vec<f64>,
    n: usize,
}

impl PairCache {
    /// Materializes compensated prefix sums of `x`, `y`, `x²`, `y²`, and `x·y`.
    pub fn new(sample: &SortedSample) -> Self {
        Self {
            prefix_x: prefix_sums(sample.x()),
            prefix_y: prefix_sums(sample.y()),
            prefix_xx: prefix_sum_squares(sample.x()),
            prefix_yy: prefix_sum_squares(sample.y()),
            prefix_xy: prefix_products(sample.x(), sample.y()),
            n: sample.n(),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    fn range_sum(prefix: &[f64], start: usize, end: usize) -> f64 {
        prefix[end] - prefix[start]
    }
}

/// Returns the Pearson coefficient and two-sided p-value for segment `[start, end)`.
///
/// Degenerate input (fewer than [`MIN_CORRELATION_LEN`] points, or zero
/// variance in either variable) yields `{ cor: 0.0, p_value: 1.0 }`: a normal,
/// handled case rather than an error.
pub fn segment_correlation(cache: &PairCache, start: usize, end: usize) -> SegmentCorrelation {
    assert!(
        start < end,
        "segment_correlation requires start < end; got start={start}, end={end}"
    );
    assert!(
        end <= cache.n,
        "segment_correlation end out of bounds: end={end}, n={}",
        cache.n
    );

    let len = end - start;
    if len < MIN_CORRELATION_LEN {
        return SegmentCorrelation::degenerate();
    }

    let m = len as f64;
    let sum_x = PairCache::range_sum(&cache.prefix_x, start, end);
    let sum_y = PairCache::range_sum(&cache.prefix_y, start, end);
    let sum_xx = PairCache::range_sum(&cache.prefix_xx, start, end);
    let sum_yy = PairCache::range_sum(&cache.prefix_yy, start, end);
    let sum_xy = PairCache::range_sum(&cache.prefix_xy, start, end);

    let var_x = sum_xx - sum_x * sum_x / m;
    let var_y = sum_yy - sum_y * sum_y / m;
    // Relative test: the prefix-difference form cancels to round-off for
    // constant segments instead of reaching an exact zero.
    let var_x_floor = ZERO_VARIANCE_REL_EPS * (sum_xx.abs() + sum_x * sum_x / m);
    let var_y_floor = ZERO_VARIANCE_REL_EPS * (sum_yy.abs() + sum_y * sum_y / m);
    if var_x <= var_x_floor || var_y <= var_y_floor {
        return SegmentCorrelation::degenerate();
    }

    let cov = sum_xy - sum_x * sum_y / m;
    let cor = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);
    SegmentCorrelation {
        cor,
        p_value: correlation_p_value(cor, len),
    }
}

/// Two-sided p-value for a Pearson coefficient via the t-transform
/// `t = r·√(df / (1 - r²))` with `df = len - 2`.
fn correlation_p_value(cor: f64, len: usize) -> f64 {
    let df = (len - 2) as f64;
    let r2 = cor * cor;
    if r2 >= 1.0 - 1e-15 {
        return 0.0;
    }

    let t = cor * (df / (1.0 - r2)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}
