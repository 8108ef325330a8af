use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Confidence cutoff the reference detector runs with.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;

/// Rejected detector output at the collaborator boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoxError {
    #[error("bounding box has non-finite coordinates ({x_min}, {y_min}, {x_max}, {y_max})")]
    NonFinite {
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    },
    #[error("bounding box is inverted (min > max) on the {axis} axis")]
    Inverted { axis: char },
}

/// Axis-aligned rectangle in image pixel coordinates.
///
/// `x` grows to the right, `y` grows downwards. Zero-extent boxes are
/// representable; downstream metric code reports them as degenerate instead
/// of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Build a box without checking it. Use [`BoundingBox::try_new`] for
    /// untrusted input.
    #[inline]
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Build a box, rejecting non-finite or inverted coordinates.
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, BoxError> {
        Self::new(x_min, y_min, x_max, y_max).checked()
    }

    /// Return `self` if it is well formed.
    pub fn checked(self) -> Result<Self, BoxError> {
        let Self {
            x_min,
            y_min,
            x_max,
            y_max,
        } = self;
        if ![x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()) {
            return Err(BoxError::NonFinite {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }
        if x_min > x_max {
            return Err(BoxError::Inverted { axis: 'x' });
        }
        if y_min > y_max {
            return Err(BoxError::Inverted { axis: 'y' });
        }
        Ok(self)
    }

    /// Build from an `[x_min, y_min, x_max, y_max]` array (detector `xyxy` layout).
    #[inline]
    pub fn from_xyxy(xyxy: [f64; 4]) -> Self {
        Self::new(xyxy[0], xyxy[1], xyxy[2], xyxy[3])
    }

    #[inline]
    pub fn to_xyxy(self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x(), self.center_y())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Mirror the box about the vertical line `x = axis_x`.
    pub fn mirrored_about(&self, axis_x: f64) -> Self {
        Self::new(
            2.0 * axis_x - self.x_max,
            self.y_min,
            2.0 * axis_x - self.x_min,
            self.y_max,
        )
    }
}

/// One raw detector output: a box and the detector's confidence for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredBox {
    pub bbox: BoundingBox,
    pub confidence: f32,
}

/// Detector boxes accepted for one image, in detector order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet {
    boxes: Vec<BoundingBox>,
}

impl DetectionSet {
    pub fn new(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }

    /// Keep the boxes scoring at least `min_confidence`, preserving order.
    pub fn from_scored(scored: &[ScoredBox], min_confidence: f32) -> Self {
        let boxes = scored
            .iter()
            .filter(|s| s.confidence >= min_confidence)
            .map(|s| s.bbox)
            .collect();
        Self { boxes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    #[inline]
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn into_boxes(self) -> Vec<BoundingBox> {
        self.boxes
    }
}

impl From<Vec<BoundingBox>> for DetectionSet {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self::new(boxes)
    }
}

impl FromIterator<BoundingBox> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = BoundingBox>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
