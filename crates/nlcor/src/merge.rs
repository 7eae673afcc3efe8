// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nlcor_core::{NlcorError, SegmentCorrelation, segments_from_breakpoints, validate_breakpoints};
use nlcor_stats::{PairCache, segment_correlation};

/// Decision thresholds for the greedy merge pass.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergePolicy {
    /// Per-segment significance level gating direction decisions.
    pub significance: f64,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self { significance: 0.05 }
    }
}

impl MergePolicy {
    pub fn validate(&self) -> Result<(), NlcorError> {
        if !self.significance.is_finite() || self.significance <= 0.0 || self.significance >= 1.0 {
            return Err(NlcorError::invalid_input(format!(
                "significance must lie in the open interval (0, 1); got {}",
                self.significance
            )));
        }
        Ok(())
    }
}

/// Result of one greedy merge pass: the fused partition plus the statistic of
/// each finalized segment, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    pub breakpoints: Vec<usize>,
    pub segment_cor: Vec<SegmentCorrelation>,
}

/// Three-valued direction of a coefficient; a zero coefficient is its own
/// class and never matches a nonzero one.
fn direction(cor: f64) -> i8 {
    if cor > 0.0 {
        1
    } else if cor < 0.0 {
        -1
    } else {
        0
    }
}

fn should_merge(
    prev: &SegmentCorrelation,
    cur: &SegmentCorrelation,
    combined: &SegmentCorrelation,
    significance: f64,
) -> bool {
    // The fusion threshold averages the previous magnitude with the *signed*
    // current coefficient: an opposing weak reversal lowers the bar to fuse.
    let strengthens = combined.cor.abs() >= (prev.cor.abs() + cur.cor) / 2.0;

    if direction(prev.cor) == direction(cur.cor) {
        // Same direction: significant agreement always fuses; ambiguous
        // agreement fuses only when the union does not weaken the signal.
        cur.p_value <= significance || strengthens
    } else {
        // A statistically significant reversal is a genuine boundary; an
        // insignificant one may be noise and falls back to the strength test.
        cur.p_value > significance && strengthens
    }
}

/// Greedily fuses adjacent raw windows left to right.
///
/// The working segment grows while [`should_merge`] accepts the next window;
/// on rejection its statistic (over the full fused range) is finalized and the
/// window starts a fresh working segment. The trailing working segment is
/// always finalized exactly once, so `segment_cor` carries one entry per
/// segment of the returned partition.
pub fn greedy_merge(
    cache: &PairCache,
    raw_breakpoints: &[usize],
    policy: &MergePolicy,
) -> Result<MergeOutcome, NlcorError> {
    policy.validate()?;
    validate_breakpoints(cache.n(), raw_breakpoints)?;

    let windows = segments_from_breakpoints(cache.n(), raw_breakpoints);
    let mut breakpoints = Vec::with_capacity(windows.len());
    let mut segment_cor = Vec::with_capacity(windows.len());

    let (mut working_start, mut working_end) = windows[0];
    for &(start, end) in &windows[1..] {
        let prev = segment_correlation(cache, working_start, working_end);
        let cur = segment_correlation(cache, start, end);
        let combined = segment_correlation(cache, working_start, end);

        if should_merge(&prev, &cur, &combined, policy.significance) {
            working_end = end;
        } else {
            breakpoints.push(working_end);
            segment_cor.push(prev);
            working_start = start;
            working_end = end;
        }
    }

    breakpoints.push(working_end);
    segment_cor.push(segment_correlation(cache, working_start, working_end));

    Ok(MergeOutcome {
        breakpoints,
        segment_cor,
    })
}
