// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use nlcor_core::NlcorError;

/// Fewest points a spatial window may contain.
pub const MIN_SEGMENT_SIZE: usize = 3;

/// Increment applied while adjusting an undersized granularity.
const REFINE_STEP: f64 = 0.01;

fn window_len(l: usize, refine: f64) -> usize {
    (refine * l as f64).floor() as usize
}

/// Validates a granularity and adjusts it upward until windows hold at least
/// [`MIN_SEGMENT_SIZE`] points.
///
/// Rejects values outside `(0, 1)`; an in-range value that would produce
/// undersized windows is incremented in steps of `0.01` until
/// `floor(refine * l) >= MIN_SEGMENT_SIZE`.
pub fn validate_refine(l: usize, refine: f64) -> Result<f64, NlcorError> {
    if !refine.is_finite() || refine <= 0.0 || refine >= 1.0 {
        return Err(NlcorError::invalid_input(format!(
            "refine must lie in the open interval (0, 1); got {refine}"
        )));
    }

    let mut adjusted = refine;
    while window_len(l, adjusted) < MIN_SEGMENT_SIZE {
        adjusted += REFINE_STEP;
        if adjusted >= 1.0 {
            return Err(NlcorError::invalid_input(format!(
                "refine adjustment exceeded 1.0 for l={l}; sample too short for windows of {MIN_SEGMENT_SIZE}"
            )));
        }
    }
    Ok(adjusted)
}

/// Partitions `[0, l)` into contiguous windows of `floor(refine * l)` points.
///
/// Returns the raw partition as segment end indices. A nonzero remainder of at
/// most [`MIN_SEGMENT_SIZE`] points is absorbed into the last full window;
/// larger remainders stand as their own trailing window.
pub fn segment_breakpoints(l: usize, refine: f64) -> Result<Vec<usize>, NlcorError> {
    let w = window_len(l, refine);
    if w < MIN_SEGMENT_SIZE || w > l {
        return Err(NlcorError::invalid_input(format!(
            "window length must lie in [{MIN_SEGMENT_SIZE}, {l}]; got w={w} from refine={refine}"
        )));
    }

    let full_windows = l / w;
    let mut breakpoints: Vec<usize> = (1..=full_windows).map(|i| i * w).collect();

    let remainder = l % w;
    if remainder > 0 {
        if remainder <= MIN_SEGMENT_SIZE {
            *breakpoints
                .last_mut()
                .expect("l >= w guarantees at least one full window") = l;
        } else {
            breakpoints.push(l);
        }
    }

    Ok(breakpoints)
}
