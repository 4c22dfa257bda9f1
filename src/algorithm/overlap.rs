use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

use crate::error::SpectrumError;

/// Minimum and maximum of a slice, ignoring NaN entries.
///
/// Returns `None` when the slice holds no comparable values at all.
pub fn nan_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let minmax = values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .map(OrderedFloat)
        .minmax();

    match minmax {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some((value.0, value.0)),
        MinMaxResult::MinMax(lo, hi) => Some((lo.0, hi.0)),
    }
}

/// Finds the coordinate interval covered by every one of the given axes.
///
/// Each axis contributes its NaN-ignoring extent; the overlap runs from the
/// largest minimum to the smallest maximum. Fewer than two axes, or an axis
/// without comparable values, fail with [`SpectrumError::NoData`]; axes that
/// do not overlap fail with [`SpectrumError::Disjoint`]. The result does not
/// depend on the order of the axes.
///
/// # Examples
///
/// ```rust
/// # use speccore::algorithm::overlap::find_overlap;
/// let a: Vec<f64> = (5..=100).map(|v| v as f64).collect();
/// let b: Vec<f64> = (50..=150).map(|v| v as f64).collect();
///
/// let (start, end) = find_overlap(&[a, b]).unwrap();
///
/// assert_eq!((start, end), (50.0, 100.0));
/// ```
pub fn find_overlap<A: AsRef<[f64]>>(axes: &[A]) -> Result<(f64, f64), SpectrumError> {
    if axes.len() < 2 {
        log::warn!("find_overlap: need at least two axes, got {}", axes.len());
        return Err(SpectrumError::NoData);
    }

    let mut start = f64::NEG_INFINITY;
    let mut end = f64::INFINITY;
    for axis in axes {
        let (lo, hi) = match nan_min_max(axis.as_ref()) {
            Some(extent) => extent,
            None => {
                log::warn!("find_overlap: an axis contains no comparable values");
                return Err(SpectrumError::NoData);
            }
        };
        start = start.max(lo);
        end = end.min(hi);
    }

    if start > end {
        log::warn!("find_overlap: axes do not overlap ({} > {})", start, end);
        return Err(SpectrumError::Disjoint);
    }

    Ok((start, end))
}
