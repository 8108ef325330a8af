use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::GeometrySummary;
use crate::params::SymmetryParams;
use crate::validator::Side;

/// Which normalizing quantity made the metrics undefined.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DegenerateReason {
    /// Half the image width is zero, negative or not finite.
    ImageCenter { image_center_x: f64 },
    /// A box has no positive width.
    BoxWidth { side: Side, width: f64 },
    /// A box has no positive height.
    BoxHeight { side: Side, height: f64 },
    /// A box center lies at an infinite distance from the midline.
    Offset { side: Side, distance: f64 },
    /// The offset difference overflows once normalized.
    Asymmetry { asymmetry_percent: f64 },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::ImageCenter { image_center_x } => {
                write!(f, "image center x is {image_center_x}")
            }
            DegenerateReason::BoxWidth { side, width } => {
                write!(f, "{side} box width is {width}")
            }
            DegenerateReason::BoxHeight { side, height } => {
                write!(f, "{side} box height is {height}")
            }
            DegenerateReason::Offset { side, distance } => {
                write!(f, "{side} midline offset is {distance}")
            }
            DegenerateReason::Asymmetry { asymmetry_percent } => {
                write!(f, "asymmetry is {asymmetry_percent}%")
            }
        }
    }
}

/// Metric computation failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ComputationError {
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: DegenerateReason },
}

/// Normalized symmetry measurements, all in percent.
///
/// Values above 100 are possible for odd detections and are kept as is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetryMetrics {
    /// Difference of the two midline offsets relative to half the image width.
    pub asymmetry_percent: f64,
    /// Width mismatch relative to the wider box.
    pub width_diff_percent: f64,
    /// Height mismatch relative to the taller box.
    pub height_diff_percent: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    DeformationSuspected,
    Normal,
}

impl Classification {
    /// Strictly above the threshold is suspicious; equal is still normal.
    #[inline]
    pub fn from_asymmetry(asymmetry_percent: f64, threshold_percent: f64) -> Self {
        if asymmetry_percent > threshold_percent {
            Classification::DeformationSuspected
        } else {
            Classification::Normal
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            Classification::DeformationSuspected => "Deformation found (TMJOA)",
            Classification::Normal => "No deformation",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

/// Turn midline offsets into percentage metrics and a decision.
pub fn classify(
    geo: &GeometrySummary,
    params: &SymmetryParams,
) -> Result<(SymmetryMetrics, Classification), ComputationError> {
    check_geometry(geo)?;

    let symmetry_error = (geo.left_distance - geo.right_distance).abs();
    let asymmetry_percent = (symmetry_error / geo.image_center_x) * 100.0;
    if !asymmetry_percent.is_finite() {
        return Err(ComputationError::DegenerateGeometry {
            reason: DegenerateReason::Asymmetry { asymmetry_percent },
        });
    }
    let width_diff_percent = relative_diff_percent(geo.left_width, geo.right_width);
    let height_diff_percent = relative_diff_percent(geo.left_height, geo.right_height);

    let metrics = SymmetryMetrics {
        asymmetry_percent,
        width_diff_percent,
        height_diff_percent,
    };
    let classification =
        Classification::from_asymmetry(asymmetry_percent, params.asymmetry_threshold_percent);
    Ok((metrics, classification))
}

#[inline]
fn relative_diff_percent(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.max(b) * 100.0
}

#[inline]
fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn check_geometry(geo: &GeometrySummary) -> Result<(), ComputationError> {
    let reason = if !is_positive(geo.image_center_x) {
        Some(DegenerateReason::ImageCenter {
            image_center_x: geo.image_center_x,
        })
    } else if !is_positive(geo.left_width) {
        Some(DegenerateReason::BoxWidth {
            side: Side::Left,
            width: geo.left_width,
        })
    } else if !is_positive(geo.right_width) {
        Some(DegenerateReason::BoxWidth {
            side: Side::Right,
            width: geo.right_width,
        })
    } else if !is_positive(geo.left_height) {
        Some(DegenerateReason::BoxHeight {
            side: Side::Left,
            height: geo.left_height,
        })
    } else if !is_positive(geo.right_height) {
        Some(DegenerateReason::BoxHeight {
            side: Side::Right,
            height: geo.right_height,
        })
    } else if !geo.left_distance.is_finite() {
        Some(DegenerateReason::Offset {
            side: Side::Left,
            distance: geo.left_distance,
        })
    } else if !geo.right_distance.is_finite() {
        Some(DegenerateReason::Offset {
            side: Side::Right,
            distance: geo.right_distance,
        })
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ComputationError::DegenerateGeometry { reason }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geo(left_distance: f64, right_distance: f64) -> GeometrySummary {
        GeometrySummary {
            left_center_x: 500.0 - left_distance,
            right_center_x: 500.0 + right_distance,
            left_width: 200.0,
            right_width: 200.0,
            left_height: 200.0,
            right_height: 200.0,
            image_center_x: 500.0,
            left_distance,
            right_distance,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let params = SymmetryParams::default();
        // 25 / 500 * 100 == 5.0 exactly
        let (m, c) = classify(&geo(325.0, 300.0), &params).expect("valid geometry");
        assert_eq!(m.asymmetry_percent, 5.0);
        assert_eq!(c, Classification::Normal);

        assert_eq!(
            Classification::from_asymmetry(5.0001, 5.0),
            Classification::DeformationSuspected
        );
        assert_eq!(Classification::from_asymmetry(5.0, 5.0), Classification::Normal);
    }

    #[test]
    fn threshold_is_configurable() {
        let params = SymmetryParams {
            asymmetry_threshold_percent: 12.0,
            ..SymmetryParams::default()
        };
        let (m, c) = classify(&geo(350.0, 300.0), &params).expect("valid geometry");
        assert_relative_eq!(m.asymmetry_percent, 10.0);
        assert_eq!(c, Classification::Normal);
    }

    #[test]
    fn size_differences_use_larger_box() {
        let mut g = geo(300.0, 300.0);
        g.left_width = 150.0;
        g.right_height = 100.0;
        let (m, _) = classify(&g, &SymmetryParams::default()).expect("valid geometry");
        assert_relative_eq!(m.width_diff_percent, 25.0);
        assert_relative_eq!(m.height_diff_percent, 50.0);
    }

    #[test]
    fn large_asymmetry_is_not_clamped() {
        let (m, c) =
            classify(&geo(900.0, 100.0), &SymmetryParams::default()).expect("valid geometry");
        assert_relative_eq!(m.asymmetry_percent, 160.0);
        assert_eq!(c, Classification::DeformationSuspected);
    }

    #[test]
    fn zero_image_center_is_degenerate() {
        let mut g = geo(0.0, 0.0);
        g.image_center_x = 0.0;
        assert_eq!(
            classify(&g, &SymmetryParams::default()),
            Err(ComputationError::DegenerateGeometry {
                reason: DegenerateReason::ImageCenter {
                    image_center_x: 0.0
                }
            })
        );
    }

    #[test]
    fn one_flat_box_is_degenerate() {
        let mut g = geo(300.0, 300.0);
        g.right_width = 0.0;
        assert!(matches!(
            classify(&g, &SymmetryParams::default()),
            Err(ComputationError::DegenerateGeometry {
                reason: DegenerateReason::BoxWidth {
                    side: Side::Right,
                    ..
                }
            })
        ));

        let mut g = geo(300.0, 300.0);
        g.left_height = 0.0;
        assert!(matches!(
            classify(&g, &SymmetryParams::default()),
            Err(ComputationError::DegenerateGeometry {
                reason: DegenerateReason::BoxHeight {
                    side: Side::Left,
                    ..
                }
            })
        ));
    }

    #[test]
    fn infinite_offsets_are_degenerate() {
        let mut g = geo(300.0, 300.0);
        g.left_center_x = f64::INFINITY;
        g.left_distance = f64::INFINITY;
        g.right_distance = f64::INFINITY;
        assert_eq!(
            classify(&g, &SymmetryParams::default()),
            Err(ComputationError::DegenerateGeometry {
                reason: DegenerateReason::Offset {
                    side: Side::Left,
                    distance: f64::INFINITY
                }
            })
        );
    }

    #[test]
    fn overflowing_asymmetry_is_degenerate() {
        let mut g = geo(1.0e308, 0.0);
        g.image_center_x = 1.0;
        let err = classify(&g, &SymmetryParams::default()).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::DegenerateGeometry {
                reason: DegenerateReason::Asymmetry { .. }
            }
        ));
    }

    #[test]
    fn classification_serializes_screaming() {
        let json = serde_json::to_string(&Classification::DeformationSuspected).expect("json");
        assert_eq!(json, "\"DEFORMATION_SUSPECTED\"");
        assert_eq!(Classification::Normal.to_string(), "No deformation");
    }
}
