use crate::classifier::ComputationError;
use crate::validator::ValidationError;

/// Errors returned by the analysis pipeline.
///
/// Both kinds abort one image's analysis only.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}

impl AnalysisError {
    /// Number of detections when the failure was a count mismatch.
    pub fn detection_count(&self) -> Option<usize> {
        match self {
            AnalysisError::Validation(ValidationError::UnexpectedDetectionCount { actual }) => {
                Some(*actual)
            }
            AnalysisError::Computation(_) => None,
        }
    }

    /// Short user-facing message.
    pub fn status_text(&self) -> String {
        match self {
            AnalysisError::Validation(err) => format!("{err}, please recheck image"),
            AnalysisError::Computation(err) => format!("{err}, metrics not computed"),
        }
    }
}
