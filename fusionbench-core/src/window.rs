//! Sliding-Window Reductions
//!
//! Explicit fixed-size window statistics over an indexable sample slice.
//! Each function returns one entry per input position; a position whose
//! window does not fully fit inside the slice yields `None`, and callers
//! decide what an incomplete window is worth (quality scoring counts it as 0).
//!
//! ## Centered Windows
//!
//! A centered window of length `W` at position `i` covers
//!
//! ```text
//! [i - (W - 1 - off), i + off]      off = (W - 1) / 2
//!
//! W = 5:  i-2 i-1 [i] i+1 i+2
//! W = 4:  i-2 i-1 [i] i+1          (even windows lean one sample left)
//! ```
//!
//! ## Spanning Windows
//!
//! The drift window at position `i` spans `[i - H, i + H)` clipped to the
//! slice, so it is `2H` wide in the interior and narrower at the edges.

use alloc::vec::Vec;

use crate::signal;

/// Inclusive-exclusive bounds of the centered window at `index`, or `None`
/// when the window runs off either end of a slice of length `len`
pub fn centered_bounds(index: usize, len: usize, window: usize) -> Option<(usize, usize)> {
    if window == 0 {
        return None;
    }
    let offset = (window - 1) / 2;
    let end = index + offset + 1;
    if end > len || end < window {
        return None;
    }
    Some((end - window, end))
}

/// Sample standard deviation (divisor `n - 1`) over each centered window
///
/// Windows shorter than 2 samples have no sample deviation and yield `None`
/// everywhere.
pub fn centered_rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window < 2 {
                return None;
            }
            let (start, end) = centered_bounds(i, values.len(), window)?;
            Some(sample_std(&values[start..end]))
        })
        .collect()
}

/// Mean over `[i - half_width, i + half_width)` clipped to the slice,
/// `None` where fewer than `half_width` samples remain after clipping
///
/// Every window is reduced on its own, so an outlier only affects the
/// positions whose window contains it.
pub fn spanning_means(values: &[f64], half_width: usize) -> Vec<Option<f64>> {
    let len = values.len();
    (0..len)
        .map(|i| {
            let start = i.saturating_sub(half_width);
            let end = (i + half_width).min(len);
            if end - start < half_width || end == start {
                return None;
            }
            Some(signal::mean(&values[start..end]))
        })
        .collect()
}

/// Two-pass sample standard deviation of one window
fn sample_std(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = signal::mean(window);
    let ss: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
    libm::sqrt(ss / (n - 1.0))
}
