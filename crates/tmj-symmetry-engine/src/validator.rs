use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tmj_symmetry_core::{BoundingBox, DetectionSet};

/// Number of structures a radiograph must show: one joint per side.
pub const EXPECTED_STRUCTURES: usize = 2;

/// Detector output that cannot be paired.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected 2 detections, found {actual}")]
    UnexpectedDetectionCount { actual: usize },
}

/// Image side of a structure, as seen in the picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two boxes ordered by `x_min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedPair {
    pub left: BoundingBox,
    pub right: BoundingBox,
}

impl OrderedPair {
    #[inline]
    pub fn get(&self, side: Side) -> &BoundingBox {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Check that exactly two structures were detected and order them left to right.
///
/// Boxes sharing the same `x_min` keep detector order: the first one seen
/// becomes `left`.
pub fn validate(detections: &DetectionSet) -> Result<OrderedPair, ValidationError> {
    let [a, b] = detections.boxes() else {
        return Err(ValidationError::UnexpectedDetectionCount {
            actual: detections.len(),
        });
    };

    let mut sorted = [*a, *b];
    // stable, so equal keys (including -0.0 vs 0.0) keep detector order
    sorted.sort_by(|p, q| p.x_min.partial_cmp(&q.x_min).unwrap_or(Ordering::Equal));
    let [left, right] = sorted;
    Ok(OrderedPair { left, right })
}
