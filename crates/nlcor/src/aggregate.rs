// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nlcor_core::{NetCorrelation, NlcorError, SegmentCorrelation, stable_mean};

/// Reduces the retained per-segment statistics of one merge run into a single
/// estimate with a multiplicity-corrected significance value.
///
/// Each segment's p-value is tested against the Bonferroni-style threshold
/// `significance / k`; failing (or non-finite) entries are nulled to the
/// no-evidence statistic and contribute nothing beyond their slot in the mean.
/// The joint p-value `1 - Π(1 - pᵢ)` combines the survivors as the chance
/// that at least one segment shows real correlation.
pub fn net_correlation(
    segment_cor: &[SegmentCorrelation],
    significance: f64,
) -> Result<NetCorrelation, NlcorError> {
    if !significance.is_finite() || significance <= 0.0 || significance >= 1.0 {
        return Err(NlcorError::invalid_input(format!(
            "significance must lie in the open interval (0, 1); got {significance}"
        )));
    }
    if segment_cor.is_empty() {
        return Err(NlcorError::numerical_issue(
            "net correlation requires at least one segment statistic",
        ));
    }

    let k = segment_cor.len() as f64;
    let threshold = significance / k;

    let mut retained = Vec::with_capacity(segment_cor.len());
    let mut survivor_complement = 1.0;
    for stat in segment_cor {
        let survives = stat.p_value.is_finite() && stat.p_value <= threshold;
        if survives {
            survivor_complement *= 1.0 - stat.p_value;
            retained.push(*stat);
        } else {
            retained.push(SegmentCorrelation::degenerate());
        }
    }

    let magnitudes: Vec<f64> = retained.iter().map(|stat| stat.cor.abs()).collect();
    let cor_estimate = stable_mean(&magnitudes).clamp(0.0, 1.0);
    let adjusted_p_value = (1.0 - survivor_complement).clamp(0.0, 1.0);

    Ok(NetCorrelation {
        cor_estimate,
        adjusted_p_value,
        segment_cor: retained,
    })
}
