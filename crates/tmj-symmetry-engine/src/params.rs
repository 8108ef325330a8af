use serde::{Deserialize, Serialize};
use tmj_symmetry_core::DEFAULT_MIN_CONFIDENCE;

/// Asymmetry above this many percent is reported as a suspected deformation.
pub const DEFAULT_ASYMMETRY_THRESHOLD_PERCENT: f64 = 5.0;

fn default_threshold() -> f64 {
    DEFAULT_ASYMMETRY_THRESHOLD_PERCENT
}

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

/// Tunable policy for one analysis pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetryParams {
    /// Classification threshold on `asymmetry_percent` (strict greater-than).
    #[serde(default = "default_threshold")]
    pub asymmetry_threshold_percent: f64,
    /// Detector boxes scoring below this are dropped before validation.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

impl Default for SymmetryParams {
    fn default() -> Self {
        Self {
            asymmetry_threshold_percent: DEFAULT_ASYMMETRY_THRESHOLD_PERCENT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl SymmetryParams {
    /// Replace non-finite values with their defaults.
    pub fn sanitized(mut self) -> Self {
        if !self.asymmetry_threshold_percent.is_finite() {
            self.asymmetry_threshold_percent = DEFAULT_ASYMMETRY_THRESHOLD_PERCENT;
        }
        if !self.min_confidence.is_finite() {
            self.min_confidence = DEFAULT_MIN_CONFIDENCE;
        }
        self
    }
}
