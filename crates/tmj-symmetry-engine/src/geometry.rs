use serde::{Deserialize, Serialize};

use crate::validator::OrderedPair;

/// Per-box measurements and midline offsets for an ordered pair.
///
/// All values are in pixels. Distances are absolute horizontal offsets of
/// each box center from the image's vertical midline, so they do not depend
/// on which side of the midline a box sits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub left_center_x: f64,
    pub right_center_x: f64,
    pub left_width: f64,
    pub right_width: f64,
    pub left_height: f64,
    pub right_height: f64,
    pub image_center_x: f64,
    pub left_distance: f64,
    pub right_distance: f64,
}

/// Measure an ordered pair against the midline of an image `image_width` pixels wide.
///
/// Never divides; degenerate sizes are carried through and rejected by
/// [`crate::classify`].
pub fn resolve(pair: &OrderedPair, image_width: f64) -> GeometrySummary {
    let image_center_x = image_width / 2.0;

    let left_center_x = pair.left.center_x();
    let right_center_x = pair.right.center_x();

    GeometrySummary {
        left_center_x,
        right_center_x,
        left_width: pair.left.width(),
        right_width: pair.right.width(),
        left_height: pair.left.height(),
        right_height: pair.right.height(),
        image_center_x,
        left_distance: (left_center_x - image_center_x).abs(),
        right_distance: (right_center_x - image_center_x).abs(),
    }
}
