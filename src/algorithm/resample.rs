use nalgebra::DMatrix;

use crate::algorithm::overlap::nan_min_max;
use crate::error::SpectrumError;

/// Marker for samples that fall outside every target bin.
pub const OUT_OF_RANGE: i32 = -1;

/// Builds a new evenly spaced axis of bin centers from a target resolution.
///
/// A missing bound is taken from the NaN-ignoring extent of `reference`; if a
/// needed bound is absent and no usable reference axis is given, the call
/// fails with [`SpectrumError::NoData`]. The axis starts at
/// `min + resolution / 2` (the first bin center) and stops short of
/// `max + resolution / 10`; the overshoot keeps the final center that
/// coincides with `max` inside the axis despite floating-point rounding.
///
/// `resolution` must be positive; the result for other values is undefined.
///
/// # Examples
///
/// ```rust
/// # use speccore::algorithm::resample::make_target_axis;
/// let axis = make_target_axis(2.0, Some(0.0), Some(9.0), None).unwrap();
/// assert_eq!(axis, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
/// ```
pub fn make_target_axis(
    resolution: f64,
    min_x: Option<f64>,
    max_x: Option<f64>,
    reference: Option<&[f64]>,
) -> Result<Vec<f64>, SpectrumError> {
    let extent = reference.and_then(nan_min_max);

    let min_x = match (min_x, extent) {
        (Some(value), _) => value,
        (None, Some((lo, _))) => lo,
        (None, None) => {
            log::warn!("make_target_axis: no lower bound and no reference axis");
            return Err(SpectrumError::NoData);
        }
    };
    let max_x = match (max_x, extent) {
        (Some(value), _) => value,
        (None, Some((_, hi))) => hi,
        (None, None) => {
            log::warn!("make_target_axis: no upper bound and no reference axis");
            return Err(SpectrumError::NoData);
        }
    };

    let start = min_x + resolution / 2.0;
    let end = max_x + resolution / 10.0;
    let steps = ((end - start) / resolution).ceil().max(0.0) as usize;

    Ok((0..steps).map(|i| start + i as f64 * resolution).collect())
}

/// Assigns every sample of `x` to the index of its target bin.
///
/// `new_x` holds the centers of evenly spaced bins; it must contain at least
/// two ascending centers, and the spacing is inferred from the first two
/// (uniform spacing is the caller's responsibility). Bin edges sit halfway
/// between consecutive centers, with one extra edge past the last center.
/// A sample exactly on a bin's left edge belongs to that bin; a sample below
/// the first edge, or at or above the last edge, maps to [`OUT_OF_RANGE`].
///
/// The samples are assigned independently, so `x` may be ascending or
/// descending.
///
/// # Examples
///
/// ```rust
/// # use speccore::algorithm::resample::bin_assignments;
/// let assigned = bin_assignments(&[0.0, 1.9, 2.0, 10.0], &[1.0, 3.0, 5.0, 7.0, 9.0]);
/// assert_eq!(assigned, vec![0, 0, 1, -1]);
/// ```
pub fn bin_assignments(x: &[f64], new_x: &[f64]) -> Vec<i32> {
    let half_width = (new_x[1] - new_x[0]) / 2.0;
    let mut edges: Vec<f64> = new_x.iter().map(|&center| center - half_width).collect();
    edges.push(new_x[new_x.len() - 1] + half_width);

    x.iter()
        .map(|&sample| {
            let bin = edges.partition_point(|&edge| edge <= sample) as i32 - 1;
            if bin < 0 || bin >= new_x.len() as i32 {
                OUT_OF_RANGE
            } else {
                bin
            }
        })
        .collect()
}

/// Averages a value series into the bins of a target axis.
///
/// Every sample of `y` is assigned to a bin via [`bin_assignments`]; each bin
/// becomes the arithmetic mean of its samples. Bins without any contributing
/// sample become NaN, and samples outside all bins are dropped. The counts of
/// empty bins and dropped samples are only reported through `log::debug!`.
///
/// An empty `y` fails with [`SpectrumError::NoData`]. A length mismatch
/// between `x` and `y` is not validated here.
///
/// # Examples
///
/// ```rust
/// # use speccore::algorithm::resample::bin_series;
/// let x = [0.0, 0.1, 1.9, 4.0, 5.9];
/// let y = [1.0, 1.0, 1.0, 2.0, 2.0];
///
/// let binned = bin_series(&x, &[1.0, 3.0, 5.0, 7.0, 9.0], &y).unwrap();
///
/// assert_eq!(binned[0], 1.0);
/// assert!(binned[1].is_nan());
/// assert_eq!(binned[2], 2.0);
/// ```
pub fn bin_series(x: &[f64], new_x: &[f64], y: &[f64]) -> Result<Vec<f64>, SpectrumError> {
    if y.is_empty() {
        log::warn!("bin_series: no data to bin");
        return Err(SpectrumError::NoData);
    }

    let assigned = bin_assignments(x, new_x);
    let mut sums = vec![0.0; new_x.len()];
    let mut counts = vec![0usize; new_x.len()];
    let mut dropped = 0usize;
    for (&bin, &value) in assigned.iter().zip(y.iter()) {
        if bin == OUT_OF_RANGE {
            dropped += 1;
        } else {
            sums[bin as usize] += value;
            counts[bin as usize] += 1;
        }
    }

    let mut empty_bins = 0usize;
    let binned: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(&sum, &count)| {
            if count == 0 {
                empty_bins += 1;
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect();

    log::debug!(
        "bin_series: {} empty bins, {} samples out of range",
        empty_bins, dropped
    );

    Ok(binned)
}

/// Batch form of [`bin_series`]: one row per channel, columns aligned with `x`.
///
/// All channels share the bin assignment of `x`; a bin without contributing
/// samples becomes a NaN column. The channel count is preserved.
pub fn bin_batch(
    x: &[f64],
    new_x: &[f64],
    y: &DMatrix<f64>,
) -> Result<DMatrix<f64>, SpectrumError> {
    if y.is_empty() {
        log::warn!("bin_batch: no data to bin");
        return Err(SpectrumError::NoData);
    }

    let assigned = bin_assignments(x, new_x);
    let channels = y.nrows();
    let mut binned = DMatrix::<f64>::zeros(channels, new_x.len());
    let mut counts = vec![0usize; new_x.len()];
    let mut dropped = 0usize;
    for (column, &bin) in assigned.iter().enumerate() {
        if bin == OUT_OF_RANGE {
            dropped += 1;
            continue;
        }
        counts[bin as usize] += 1;
        for channel in 0..channels {
            binned[(channel, bin as usize)] += y[(channel, column)];
        }
    }

    let mut empty_bins = 0usize;
    for (bin, &count) in counts.iter().enumerate() {
        if count == 0 {
            empty_bins += 1;
            binned.column_mut(bin).fill(f64::NAN);
        } else {
            for channel in 0..channels {
                binned[(channel, bin)] /= count as f64;
            }
        }
    }

    log::debug!(
        "bin_batch: {} empty bins, {} samples out of range",
        empty_bins, dropped
    );

    Ok(binned)
}
