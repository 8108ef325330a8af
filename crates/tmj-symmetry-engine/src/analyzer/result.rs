use serde::{Deserialize, Serialize};
use tmj_symmetry_core::BoundingBox;

use crate::classifier::{Classification, SymmetryMetrics};
use crate::geometry::GeometrySummary;
use crate::validator::{OrderedPair, Side};

/// A box to draw, with its side label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRegion {
    pub bbox: BoundingBox,
    pub side: Side,
}

impl AnnotatedRegion {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.side.label()
    }
}

/// Output of one successful analysis pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetryAnalysis {
    pub pair: OrderedPair,
    pub geometry: GeometrySummary,
    pub metrics: SymmetryMetrics,
    pub classification: Classification,
    /// Left region first, then right.
    pub regions: [AnnotatedRegion; 2],
}

impl SymmetryAnalysis {
    pub(crate) fn regions_for(pair: &OrderedPair) -> [AnnotatedRegion; 2] {
        Side::BOTH.map(|side| AnnotatedRegion {
            bbox: *pair.get(side),
            side,
        })
    }

    #[inline]
    pub fn is_deformation_suspected(&self) -> bool {
        self.classification == Classification::DeformationSuspected
    }

    /// One-line human readable status with metrics rounded to two decimals.
    pub fn summary(&self) -> String {
        format!(
            "{} | Asymmetry: {:.2}% | Width Diff: {:.2}% | Height Diff: {:.2}%",
            self.classification.status_text(),
            self.metrics.asymmetry_percent,
            self.metrics.width_diff_percent,
            self.metrics.height_diff_percent,
        )
    }
}
