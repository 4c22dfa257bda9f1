use thiserror::Error;

/// Soft failures shared by the resampling, cropping and overlap operations.
///
/// These are expected outcomes in best-effort batch pipelines: callers match
/// on the reason and skip the affected dataset instead of aborting the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpectrumError {
    /// There is no axis or value data to operate on.
    #[error("no data to operate on")]
    NoData,
    /// A range selection was requested without any bounds.
    #[error("no bounds given for range selection")]
    NoBounds,
    /// The requested range does not intersect the available data.
    #[error("selected range does not overlap the data")]
    EmptyRange,
    /// The given axes share no common coordinate interval.
    #[error("axes do not share a common range")]
    Disjoint,
}
