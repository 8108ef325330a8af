//! High-level facade crate for the `tmj-symmetry-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core types and the analysis engine
//! - (feature-gated) end-to-end helpers that run a structure detector on a
//!   decoded radiograph, analyze the result and render the labeled regions.
//!
//! ## Quickstart
//!
//! ```no_run
//! use tmj_symmetry::detect::{self, PrecomputedDetections};
//! use tmj_symmetry::SymmetryAnalyzer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_image("panoramic.png")?;
//! let detector = PrecomputedDetections::load_json("panoramic.dets.json")?;
//! let analyzer = SymmetryAnalyzer::default();
//!
//! let result = detect::analyze_image(&detector, &img, &analyzer)?;
//! match &result.outcome {
//!     Ok(analysis) => println!("{}", analysis.summary()),
//!     Err(err) => println!("{}", err.status_text()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `tmj_symmetry::core`: boxes and detection sets.
//! - `tmj_symmetry::engine`: validation, geometry, classification, JSON io.
//! - `tmj_symmetry::detect` (feature `image`): detector seam and image helpers.
//! - `tmj_symmetry::render` (feature `image`): box overlay and JPEG export.

pub use tmj_symmetry_core as core;
pub use tmj_symmetry_engine as engine;

pub use tmj_symmetry_core::{BoundingBox, DetectionSet, ScoredBox};
pub use tmj_symmetry_engine::{
    AnalysisError, AnnotatedRegion, Classification, Side, SymmetryAnalysis, SymmetryAnalyzer,
    SymmetryMetrics, SymmetryParams,
};

#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod render;
