//! Trailing-window statistics over series with explicit undefined values.
//!
//! Every function maps a series to a same-length series. Position `i` of the
//! output is defined only when the full window `[i + 1 - window, i]` exists and
//! every input in it is defined. Standard deviation is the sample form
//! (n - 1 denominator), so it needs a window of at least 2.

/// The defined window ending at `end`, or None if the window is incomplete or
/// contains an undefined value.
fn complete_window(values: &[Option<f64>], end: usize, window: usize) -> Option<&[Option<f64>]> {
    if window == 0 || end + 1 < window {
        return None;
    }
    let slice = &values[end + 1 - window..=end];
    if slice.iter().all(|v| v.is_some()) {
        Some(slice)
    } else {
        None
    }
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            complete_window(values, i, window)
                .map(|w| w.iter().flatten().sum::<f64>() / window as f64)
        })
        .collect()
}

pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            complete_window(values, i, window).map(|w| {
                let mean = w.iter().flatten().sum::<f64>() / window as f64;
                let sq_sum: f64 = w
                    .iter()
                    .flatten()
                    .map(|v| {
                        let diff = v - mean;
                        diff * diff
                    })
                    .sum();
                (sq_sum / (window - 1) as f64).sqrt()
            })
        })
        .collect()
}

pub fn rolling_median(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            complete_window(values, i, window).map(|w| {
                let mut sorted: Vec<f64> = w.iter().flatten().copied().collect();
                sorted.sort_unstable_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            })
        })
        .collect()
}
