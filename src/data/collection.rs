use rayon::prelude::*;

use crate::algorithm::overlap::find_overlap;
use crate::algorithm::resample::make_target_axis;
use crate::data::spectrum::LinearSpectrum;
use crate::error::SpectrumError;

/// An ordered set of spectra operated on as one batch.
///
/// Batch operations are best-effort: members that cannot take part degrade
/// individually (kept untouched, warning logged) instead of failing the
/// whole collection.
#[derive(Clone, Debug, Default)]
pub struct SpectrumCollection {
    pub spectra: Vec<LinearSpectrum>,
}

impl SpectrumCollection {
    pub fn new(spectra: Vec<LinearSpectrum>) -> Self {
        SpectrumCollection { spectra }
    }

    pub fn push(&mut self, spectrum: LinearSpectrum) {
        self.spectra.push(spectrum);
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// Combined extent across every member spectrum that has an axis.
    pub fn min_max_x(&self) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for spectrum in &self.spectra {
            if let Some((lo, hi)) = spectrum.min_max_x() {
                extent = match extent {
                    Some((min_x, max_x)) => Some((min_x.min(lo), max_x.max(hi))),
                    None => Some((lo, hi)),
                };
            }
        }
        extent
    }

    /// Coordinate interval covered by every member axis.
    pub fn overlap_range(&self) -> Result<(f64, f64), SpectrumError> {
        let axes: Vec<&[f64]> = self
            .spectra
            .iter()
            .filter_map(|spectrum| spectrum.x.as_deref().map(|x| x.as_slice()))
            .collect();
        find_overlap(&axes)
    }

    /// Bins every member onto one shared axis built from `resolution`.
    ///
    /// Missing bounds default to the collection extent, so all members end
    /// up on the same grid. Members that cannot be binned are carried over
    /// untouched with a logged warning.
    pub fn bin_to_resolution(
        &self,
        resolution: f64,
        min_x: Option<f64>,
        max_x: Option<f64>,
    ) -> Result<SpectrumCollection, SpectrumError> {
        let (lo, hi) = match (min_x, max_x) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => {
                let (extent_lo, extent_hi) = self.min_max_x().ok_or_else(|| {
                    log::warn!("bin_to_resolution: no member spectrum has an axis");
                    SpectrumError::NoData
                })?;
                (min_x.unwrap_or(extent_lo), max_x.unwrap_or(extent_hi))
            }
        };
        let new_x = make_target_axis(resolution, Some(lo), Some(hi), None)?;

        let spectra = self
            .spectra
            .par_iter()
            .map(|spectrum| match spectrum.bin_to_axis(&new_x) {
                Ok(binned) => binned,
                Err(reason) => {
                    log::warn!("bin_to_resolution: keeping spectrum unbinned ({})", reason);
                    spectrum.clone()
                }
            })
            .collect();

        Ok(SpectrumCollection { spectra })
    }
}
