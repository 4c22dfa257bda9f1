use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::algorithm::crop::{crop_indices, CropConfig};
use crate::algorithm::overlap::nan_min_max;
use crate::algorithm::resample::{bin_series, make_target_axis};
use crate::error::SpectrumError;

/// A one-dimensional spectrum: an ordered axis with aligned values.
///
/// Uses Arc<Vec<f64>> for efficient cloning - clone is O(1) instead of O(n).
/// `None` marks an axis or value series that has not been set yet (or was
/// cleared); operations that need it fail with [`SpectrumError::NoData`].
/// Operations never modify `self`: they return a fresh spectrum, and the
/// caller replaces its own binding wholesale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LinearSpectrum {
    pub x: Option<Arc<Vec<f64>>>,
    pub y: Option<Arc<Vec<f64>>>,
    pub x_unit: String,
    pub y_unit: String,
}

// Manual bincode implementation for Arc compatibility
impl Encode for LinearSpectrum {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.x.as_deref(), encoder)?;
        bincode::Encode::encode(&self.y.as_deref(), encoder)?;
        bincode::Encode::encode(&self.x_unit, encoder)?;
        bincode::Encode::encode(&self.y_unit, encoder)?;
        Ok(())
    }
}

impl<Context> Decode<Context> for LinearSpectrum {
    fn decode<D: bincode::de::Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let x: Option<Vec<f64>> = bincode::Decode::decode(decoder)?;
        let y: Option<Vec<f64>> = bincode::Decode::decode(decoder)?;
        let x_unit: String = bincode::Decode::decode(decoder)?;
        let y_unit: String = bincode::Decode::decode(decoder)?;
        Ok(LinearSpectrum {
            x: x.map(Arc::new),
            y: y.map(Arc::new),
            x_unit,
            y_unit,
        })
    }
}

impl<'de, Context> bincode::BorrowDecode<'de, Context> for LinearSpectrum {
    fn borrow_decode<D: bincode::de::BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let x: Option<Vec<f64>> = bincode::BorrowDecode::borrow_decode(decoder)?;
        let y: Option<Vec<f64>> = bincode::BorrowDecode::borrow_decode(decoder)?;
        let x_unit: String = bincode::BorrowDecode::borrow_decode(decoder)?;
        let y_unit: String = bincode::BorrowDecode::borrow_decode(decoder)?;
        Ok(LinearSpectrum {
            x: x.map(Arc::new),
            y: y.map(Arc::new),
            x_unit,
            y_unit,
        })
    }
}

impl LinearSpectrum {
    /// Constructs a new `LinearSpectrum` without unit labels.
    ///
    /// # Arguments
    ///
    /// * `x` - A vector of axis positions.
    /// * `y` - A vector of values aligned with `x`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use speccore::data::spectrum::LinearSpectrum;
    /// let spectrum = LinearSpectrum::new(vec![100.0, 200.0], vec![10.0, 20.0]);
    /// assert_eq!(spectrum.x.as_deref(), Some(&vec![100.0, 200.0]));
    /// assert_eq!(spectrum.y.as_deref(), Some(&vec![10.0, 20.0]));
    /// ```
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinearSpectrum {
            x: Some(Arc::new(x)),
            y: Some(Arc::new(y)),
            x_unit: String::new(),
            y_unit: String::new(),
        }
    }

    /// Constructs a new `LinearSpectrum` carrying unit labels.
    ///
    /// The labels are passive metadata set by importers; this crate never
    /// converts between units.
    pub fn with_units(x: Vec<f64>, y: Vec<f64>, x_unit: &str, y_unit: &str) -> Self {
        LinearSpectrum {
            x: Some(Arc::new(x)),
            y: Some(Arc::new(y)),
            x_unit: x_unit.to_string(),
            y_unit: y_unit.to_string(),
        }
    }

    /// Number of axis positions; 0 when no axis is set.
    pub fn len(&self) -> usize {
        self.x.as_ref().map(|x| x.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// NaN-ignoring extent of the axis, if one is set.
    pub fn min_max_x(&self) -> Option<(f64, f64)> {
        self.x.as_deref().and_then(|x| nan_min_max(x))
    }

    /// Builds a target bin-center axis from `resolution`, falling back to
    /// this spectrum's own extent for missing bounds.
    pub fn make_target_axis(
        &self,
        resolution: f64,
        min_x: Option<f64>,
        max_x: Option<f64>,
    ) -> Result<Vec<f64>, SpectrumError> {
        make_target_axis(
            resolution,
            min_x,
            max_x,
            self.x.as_deref().map(|x| x.as_slice()),
        )
    }

    /// Bins the value series onto the given axis of bin centers.
    ///
    /// Returns a new spectrum holding `new_x` and the per-bin means; bins
    /// without contributing samples hold NaN. The unit labels carry over.
    pub fn bin_to_axis(&self, new_x: &[f64]) -> Result<LinearSpectrum, SpectrumError> {
        let x = self.x.as_deref().ok_or_else(|| {
            log::warn!("bin_to_axis: no axis to bin from");
            SpectrumError::NoData
        })?;
        let y = self.y.as_deref().ok_or_else(|| {
            log::warn!("bin_to_axis: no data to bin");
            SpectrumError::NoData
        })?;

        let binned = bin_series(x, new_x, y)?;
        Ok(LinearSpectrum {
            x: Some(Arc::new(new_x.to_vec())),
            y: Some(Arc::new(binned)),
            x_unit: self.x_unit.clone(),
            y_unit: self.y_unit.clone(),
        })
    }

    /// Rebins onto an axis built from `resolution` over the spectrum's own
    /// extent.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use speccore::data::spectrum::LinearSpectrum;
    /// let spectrum = LinearSpectrum::new(
    ///     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
    ///     vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0],
    /// );
    ///
    /// let binned = spectrum.bin_to_resolution(2.0).unwrap();
    ///
    /// assert_eq!(binned.x.as_deref(), Some(&vec![1.0, 3.0, 5.0, 7.0, 9.0]));
    /// assert_eq!(binned.y.as_deref(), Some(&vec![1.0, 1.0, 1.5, 2.0, 2.0]));
    /// ```
    pub fn bin_to_resolution(&self, resolution: f64) -> Result<LinearSpectrum, SpectrumError> {
        let new_x = self.make_target_axis(resolution, None, None)?;
        self.bin_to_axis(&new_x)
    }

    /// Crops the axis, and the values when present, to the given range.
    ///
    /// The index run comes from [`crop_indices`] with the same bounds and
    /// configuration; a spectrum without values keeps `y` absent.
    pub fn crop(
        &self,
        min_x: Option<f64>,
        max_x: Option<f64>,
        config: &CropConfig,
    ) -> Result<LinearSpectrum, SpectrumError> {
        let x = self.x.as_deref().ok_or_else(|| {
            log::warn!("crop: no axis to crop");
            SpectrumError::NoData
        })?;

        let indices = crop_indices(x, min_x, max_x, config)?;
        let cropped_x: Vec<f64> = indices.iter().map(|&i| x[i]).collect();
        let cropped_y = self
            .y
            .as_deref()
            .map(|y| indices.iter().map(|&i| y[i]).collect::<Vec<f64>>());

        Ok(LinearSpectrum {
            x: Some(Arc::new(cropped_x)),
            y: cropped_y.map(Arc::new),
            x_unit: self.x_unit.clone(),
            y_unit: self.y_unit.clone(),
        })
    }
}

impl Display for LinearSpectrum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.min_max_x() {
            Some((lo, hi)) => write!(
                f,
                "LinearSpectrum(data points: {}, x range: {:.3}-{:.3})",
                self.len(),
                lo,
                hi
            ),
            None => write!(f, "LinearSpectrum(no data)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_selects_values_and_pads() {
        let x: Vec<f64> = (0..=9).map(|v| v as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 10.0).collect();
        let spectrum = LinearSpectrum::new(x, y);

        let config = CropConfig {
            pad: 1,
            ..CropConfig::default()
        };
        let cropped = spectrum.crop(Some(3.0), Some(6.0), &config).unwrap();

        assert_eq!(
            cropped.x.as_deref(),
            Some(&vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
        );
        assert_eq!(
            cropped.y.as_deref(),
            Some(&vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0])
        );
        // The source spectrum is untouched.
        assert_eq!(spectrum.len(), 10);
    }

    #[test]
    fn test_crop_without_values_keeps_y_absent() {
        let spectrum = LinearSpectrum {
            x: Some(Arc::new((0..=9).map(|v| v as f64).collect())),
            ..LinearSpectrum::default()
        };

        let cropped = spectrum
            .crop(Some(3.0), Some(6.0), &CropConfig::default())
            .unwrap();

        assert!(cropped.x.is_some());
        assert!(cropped.y.is_none());
    }

    #[test]
    fn test_bin_to_axis_without_values() {
        let spectrum = LinearSpectrum {
            x: Some(Arc::new(vec![1.0, 2.0, 3.0])),
            ..LinearSpectrum::default()
        };
        let result = spectrum.bin_to_axis(&[1.0, 3.0]);
        assert_eq!(result.unwrap_err(), SpectrumError::NoData);
    }

    #[test]
    fn test_bin_to_resolution_without_axis() {
        let spectrum = LinearSpectrum::default();
        let result = spectrum.bin_to_resolution(1.0);
        assert_eq!(result.unwrap_err(), SpectrumError::NoData);
    }

    #[test]
    fn test_min_max_x_ignores_nan() {
        let spectrum = LinearSpectrum::new(vec![f64::NAN, 2.0, 8.0, f64::NAN], vec![0.0; 4]);
        assert_eq!(spectrum.min_max_x(), Some((2.0, 8.0)));
        assert_eq!(LinearSpectrum::default().min_max_x(), None);
    }

    #[test]
    fn test_units_carry_through_binning() {
        let x: Vec<f64> = (0..=9).map(|v| v as f64).collect();
        let y = vec![1.0; 10];
        let spectrum = LinearSpectrum::with_units(x, y, "cm-1", "A");

        let binned = spectrum.bin_to_resolution(2.0).unwrap();

        assert_eq!(binned.x_unit, "cm-1");
        assert_eq!(binned.y_unit, "A");
    }

    #[test]
    fn test_bincode_round_trip() {
        let spectrum = LinearSpectrum::with_units(
            vec![1.0, 2.0, 3.0],
            vec![10.0, 20.0, 30.0],
            "nm",
            "T1",
        );
        let config = bincode::config::standard();

        let bytes = bincode::encode_to_vec(&spectrum, config).unwrap();
        let (decoded, _): (LinearSpectrum, usize) =
            bincode::decode_from_slice(&bytes, config).unwrap();

        assert_eq!(decoded.x.as_deref(), spectrum.x.as_deref());
        assert_eq!(decoded.y.as_deref(), spectrum.y.as_deref());
        assert_eq!(decoded.x_unit, "nm");
        assert_eq!(decoded.y_unit, "T1");
    }

    #[test]
    fn test_bincode_round_trip_absent_values() {
        let spectrum = LinearSpectrum {
            x: Some(Arc::new(vec![1.0, 2.0])),
            ..LinearSpectrum::default()
        };
        let config = bincode::config::standard();

        let bytes = bincode::encode_to_vec(&spectrum, config).unwrap();
        let (decoded, _): (LinearSpectrum, usize) =
            bincode::decode_from_slice(&bytes, config).unwrap();

        assert_eq!(decoded.x.as_deref(), Some(&vec![1.0, 2.0]));
        assert!(decoded.y.is_none());
    }

    #[test]
    fn test_display() {
        let spectrum = LinearSpectrum::new(vec![1.0, 2.0, 3.0], vec![0.0; 3]);
        assert_eq!(
            format!("{}", spectrum),
            "LinearSpectrum(data points: 3, x range: 1.000-3.000)"
        );
        assert_eq!(
            format!("{}", LinearSpectrum::default()),
            "LinearSpectrum(no data)"
        );
    }
}
