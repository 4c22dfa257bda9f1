use serde::{Deserialize, Serialize};

use crate::error::SpectrumError;

/// Configuration for range cropping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropConfig {
    /// Extra indices kept on each side of the selected run (default: 5).
    pub pad: usize,
    /// Treat the bounds as literal array indices instead of axis values.
    pub by_index: bool,
    /// Suppress the warning logged when the selection comes up empty.
    pub suppress_warning: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        CropConfig {
            pad: 5,
            by_index: false,
            suppress_warning: false,
        }
    }
}

/// Finds the contiguous index run of `x` covered by the given bounds, padded
/// on both sides and clamped to the array.
///
/// `x` must be monotonic, ascending or descending; it does not have to be
/// evenly spaced. The bounds may be given in either order. With both bounds
/// the selection is inclusive on both ends; with a single bound it is strict
/// (`x > min` or `x < max`); without bounds the call fails with
/// [`SpectrumError::NoBounds`]. An empty selection fails with
/// [`SpectrumError::EmptyRange`] and logs a warning unless
/// `suppress_warning` is set.
///
/// The padding is clamped to `[0, x.len())`, so the returned indices are
/// always valid positions of the original, un-reordered array.
///
/// In index mode (`by_index`) both bounds are required; they are truncated
/// to integers and expanded to an inclusive index run directly, then padded
/// and clamped the same way.
///
/// # Examples
///
/// ```rust
/// # use speccore::algorithm::crop::{crop_indices, CropConfig};
/// let x: Vec<f64> = (0..=9).rev().map(|v| v as f64).collect();
/// let config = CropConfig { pad: 1, ..CropConfig::default() };
///
/// let indices = crop_indices(&x, Some(3.5), Some(6.5), &config).unwrap();
///
/// assert_eq!(indices, vec![2, 3, 4, 5, 6]);
/// ```
pub fn crop_indices(
    x: &[f64],
    min_x: Option<f64>,
    max_x: Option<f64>,
    config: &CropConfig,
) -> Result<Vec<usize>, SpectrumError> {
    let (first, last) = if config.by_index {
        let (a, b) = match (min_x, max_x) {
            (Some(a), Some(b)) => (a.trunc() as i64, b.trunc() as i64),
            _ => return Err(SpectrumError::NoBounds),
        };
        (a.min(b), a.max(b))
    } else {
        let selected = select_by_value(x, min_x, max_x)?;
        match (selected.first(), selected.last()) {
            (Some(&first), Some(&last)) => (first as i64, last as i64),
            _ => {
                if !config.suppress_warning {
                    log::warn!(
                        "crop_indices: no values selected between {:?} and {:?}",
                        min_x, max_x
                    );
                }
                return Err(SpectrumError::EmptyRange);
            }
        }
    };

    let start = (first - config.pad as i64).max(0);
    let end = (last + config.pad as i64).min(x.len() as i64 - 1);
    if start > end {
        if !config.suppress_warning {
            log::warn!(
                "crop_indices: index run {}-{} lies outside the array",
                first, last
            );
        }
        return Err(SpectrumError::EmptyRange);
    }

    Ok((start..=end).map(|i| i as usize).collect())
}

fn select_by_value(
    x: &[f64],
    min_x: Option<f64>,
    max_x: Option<f64>,
) -> Result<Vec<usize>, SpectrumError> {
    let indices = match (min_x, max_x) {
        (Some(a), Some(b)) => {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            collect_matching(x, |value| lo <= value && value <= hi)
        }
        (Some(lo), None) => collect_matching(x, |value| value > lo),
        (None, Some(hi)) => collect_matching(x, |value| value < hi),
        (None, None) => return Err(SpectrumError::NoBounds),
    };
    Ok(indices)
}

fn collect_matching<F: Fn(f64) -> bool>(x: &[f64], keep: F) -> Vec<usize> {
    x.iter()
        .enumerate()
        .filter(|&(_, &value)| keep(value))
        .map(|(i, _)| i)
        .collect()
}
