//! Symmetry analysis of paired temporomandibular joints.
//!
//! The engine takes the boxes an external detector produced for one
//! radiograph plus the image width and runs three pure stages:
//! - validation: exactly two structures, ordered left to right,
//! - geometry: centers, sizes and offsets from the image's vertical midline,
//! - classification: percentage metrics and a threshold decision.
//!
//! Nothing here loads models, touches pixels or logs. Every function is a
//! deterministic function of its inputs.
//!
//! ```
//! use tmj_symmetry_engine::{Classification, SymmetryAnalyzer, SymmetryParams};
//! use tmj_symmetry_core::{BoundingBox, DetectionSet};
//!
//! let detections = DetectionSet::new(vec![
//!     BoundingBox::new(700.0, 50.0, 900.0, 250.0),
//!     BoundingBox::new(50.0, 50.0, 250.0, 250.0),
//! ]);
//! let analyzer = SymmetryAnalyzer::new(SymmetryParams::default());
//! let analysis = analyzer.analyze(&detections, 1000.0).unwrap();
//! assert_eq!(analysis.metrics.asymmetry_percent, 10.0);
//! assert_eq!(analysis.classification, Classification::DeformationSuspected);
//! ```

mod analyzer;
mod classifier;
mod geometry;
mod io;
mod params;
mod validator;

pub use analyzer::{analyze, AnalysisError, AnnotatedRegion, SymmetryAnalysis, SymmetryAnalyzer};
pub use classifier::{classify, Classification, ComputationError, DegenerateReason, SymmetryMetrics};
pub use geometry::{resolve, GeometrySummary};
pub use io::{load_scored_boxes, SymmetryAnalyzeConfig, SymmetryIoError, SymmetryReport};
pub use params::{SymmetryParams, DEFAULT_ASYMMETRY_THRESHOLD_PERCENT};
pub use validator::{validate, OrderedPair, Side, ValidationError, EXPECTED_STRUCTURES};

pub use tmj_symmetry_core::{BoundingBox, DetectionSet, ScoredBox};
