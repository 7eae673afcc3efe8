// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::aggregate::net_correlation;
use crate::merge::{MergePolicy, greedy_merge};
use crate::segmenter::{segment_breakpoints, validate_refine};
use nlcor_core::NlcorError;
use nlcor_stats::{PairCache, segment_correlation};

/// Number of granularities on the fixed refinement ladder.
const LADDER_TRIALS: usize = 15;

/// The fixed granularity ladder `0.01, 0.02, …, 0.15`, ascending.
fn refine_ladder() -> impl Iterator<Item = f64> {
    (1..=LADDER_TRIALS).map(|step| step as f64 * 0.01)
}

/// Rounds to two decimals; all best-candidate comparisons happen at this
/// resolution.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Winning candidate of a refinement search or a single fixed-granularity run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub cor_estimate: f64,
    pub adjusted_p_value: f64,
    pub breakpoints: Vec<usize>,
    /// Effective granularity of the winning partition; `None` when the
    /// whole-sample baseline was retained.
    pub refine: Option<f64>,
    /// Ladder trials evaluated.
    pub trials: usize,
}

/// Runs the greedy merger across the granularity ladder and keeps the best
/// candidate relative to the whole-sample linear baseline.
///
/// The baseline enters as `(|r|, p)` with its p-value rounded to two decimals
/// and the trivial one-segment partition. A candidate replaces the incumbent
/// only when its rounded correlation is strictly larger and its rounded
/// p-value is no worse; ties keep the earlier winner, so sequential ascending
/// evaluation is first-improvement-wins.
pub fn refinement_search(
    cache: &PairCache,
    policy: &MergePolicy,
) -> Result<SearchOutcome, NlcorError> {
    let n = cache.n();
    let baseline = segment_correlation(cache, 0, n);

    let mut best = SearchOutcome {
        cor_estimate: baseline.cor.abs(),
        adjusted_p_value: round2(baseline.p_value),
        breakpoints: vec![n],
        refine: None,
        trials: 0,
    };

    for refine in refine_ladder() {
        let adjusted = validate_refine(n, refine)?;
        let raw = segment_breakpoints(n, adjusted)?;
        let merged = greedy_merge(cache, &raw, policy)?;
        let net = net_correlation(&merged.segment_cor, policy.significance)?;
        best.trials += 1;

        if round2(net.cor_estimate) > round2(best.cor_estimate)
            && round2(net.adjusted_p_value) <= round2(best.adjusted_p_value)
        {
            best = SearchOutcome {
                cor_estimate: net.cor_estimate,
                adjusted_p_value: net.adjusted_p_value,
                breakpoints: merged.breakpoints,
                refine: Some(adjusted),
                trials: best.trials,
            };
        }
    }

    Ok(best)
}

/// Runs the greedy merger exactly once at a caller-supplied granularity.
///
/// No ladder and no baseline comparison: the run's net correlation and
/// partition are used unconditionally.
pub fn fixed_refine_run(
    cache: &PairCache,
    refine: f64,
    policy: &MergePolicy,
) -> Result<SearchOutcome, NlcorError> {
    let n = cache.n();
    let adjusted = validate_refine(n, refine)?;
    let raw = segment_breakpoints(n, adjusted)?;
    let merged = greedy_merge(cache, &raw, policy)?;
    let net = net_correlation(&merged.segment_cor, policy.significance)?;

    Ok(SearchOutcome {
        cor_estimate: net.cor_estimate,
        adjusted_p_value: net.adjusted_p_value,
        breakpoints: merged.breakpoints,
        refine: Some(adjusted),
        trials: 1,
    })
}
