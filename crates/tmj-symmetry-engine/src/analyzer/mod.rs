//! Symmetry analysis pipeline.
//!
//! Wires validation, geometry and classification together and packages the
//! outcome with the two labeled regions used for rendering.

mod error;
mod pipeline;
mod result;

pub use error::AnalysisError;
pub use pipeline::{analyze, SymmetryAnalyzer};
pub use result::{AnnotatedRegion, SymmetryAnalysis};
