use tmj_symmetry_core::{DetectionSet, ScoredBox};

use super::{AnalysisError, SymmetryAnalysis};
use crate::classifier::classify;
use crate::geometry::resolve;
use crate::params::SymmetryParams;
use crate::validator::validate;

/// Reusable analyzer holding the classification policy.
///
/// Holds no per-image state, so one instance can serve any number of
/// images from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct SymmetryAnalyzer {
    params: SymmetryParams,
}

impl SymmetryAnalyzer {
    pub fn new(params: SymmetryParams) -> Self {
        Self {
            params: params.sanitized(),
        }
    }

    #[inline]
    pub fn params(&self) -> &SymmetryParams {
        &self.params
    }

    /// Analyze boxes that already passed the detector's confidence cutoff.
    pub fn analyze(
        &self,
        detections: &DetectionSet,
        image_width: f64,
    ) -> Result<SymmetryAnalysis, AnalysisError> {
        analyze(detections, image_width, &self.params)
    }

    /// Apply `min_confidence` to raw detector output, then analyze.
    pub fn analyze_scored(
        &self,
        scored: &[ScoredBox],
        image_width: f64,
    ) -> Result<SymmetryAnalysis, AnalysisError> {
        let detections = self.accept(scored);
        self.analyze(&detections, image_width)
    }

    /// The subset of `scored` this analyzer would consider.
    pub fn accept(&self, scored: &[ScoredBox]) -> DetectionSet {
        DetectionSet::from_scored(scored, self.params.min_confidence)
    }
}

/// Validate, measure and classify one image's detections.
pub fn analyze(
    detections: &DetectionSet,
    image_width: f64,
    params: &SymmetryParams,
) -> Result<SymmetryAnalysis, AnalysisError> {
    let pair = validate(detections)?;
    let geometry = resolve(&pair, image_width);
    let (metrics, classification) = classify(&geometry, params)?;

    Ok(SymmetryAnalysis {
        regions: SymmetryAnalysis::regions_for(&pair),
        pair,
        geometry,
        metrics,
        classification,
    })
}
