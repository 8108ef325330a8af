//! JSON configuration, detector output and report helpers.

use crate::{AnalysisError, SymmetryAnalysis, SymmetryAnalyzer, SymmetryParams};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tmj_symmetry_core::{BoxError, ScoredBox};

#[derive(thiserror::Error, Debug)]
pub enum SymmetryIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("detection #{index}: {source}")]
    InvalidBox {
        index: usize,
        #[source]
        source: BoxError,
    },
}

/// Load detector output captured as a JSON array of scored boxes.
///
/// Every box is checked for finite, non-inverted coordinates.
pub fn load_scored_boxes(path: impl AsRef<Path>) -> Result<Vec<ScoredBox>, SymmetryIoError> {
    let raw = fs::read_to_string(path)?;
    let boxes: Vec<ScoredBox> = serde_json::from_str(&raw)?;
    for (index, scored) in boxes.iter().enumerate() {
        scored
            .bbox
            .checked()
            .map_err(|source| SymmetryIoError::InvalidBox { index, source })?;
    }
    Ok(boxes)
}

/// Configuration for a single-image analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymmetryAnalyzeConfig {
    pub image_path: String,
    pub detections_path: String,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub annotated_path: Option<String>,
    #[serde(default)]
    pub params: Option<SymmetryParams>,
}

impl SymmetryAnalyzeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SymmetryIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SymmetryIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the report path.
    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tmj_report.json"))
    }

    /// Resolve the annotated image path.
    pub fn annotated_path(&self) -> PathBuf {
        self.annotated_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tmj_result.jpg"))
    }

    pub fn build_params(&self) -> SymmetryParams {
        self.params.unwrap_or_default()
    }

    pub fn build_analyzer(&self) -> SymmetryAnalyzer {
        SymmetryAnalyzer::new(self.build_params())
    }

    /// Load the detector output named by this config.
    pub fn load_detections(&self) -> Result<Vec<ScoredBox>, SymmetryIoError> {
        load_scored_boxes(&self.detections_path)
    }
}

/// Per-image analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymmetryReport {
    pub image_path: String,
    pub image_width: u32,
    pub image_height: u32,
    pub num_raw_detections: usize,
    pub num_accepted_detections: usize,
    #[serde(default)]
    pub analysis: Option<SymmetryAnalysis>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SymmetryReport {
    /// Build a base report before analysis has run.
    pub fn new(
        image_path: impl Into<String>,
        image_width: u32,
        image_height: u32,
        num_raw_detections: usize,
        num_accepted_detections: usize,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            image_width,
            image_height,
            num_raw_detections,
            num_accepted_detections,
            analysis: None,
            status: None,
            error: None,
        }
    }

    /// Populate report fields from a successful analysis.
    pub fn set_analysis(&mut self, analysis: SymmetryAnalysis) {
        self.status = Some(analysis.summary());
        self.analysis = Some(analysis);
        self.error = None;
    }

    /// Record an analysis failure.
    pub fn set_error(&mut self, err: &AnalysisError) {
        self.analysis = None;
        self.status = Some(err.status_text());
        self.error = Some(err.to_string());
    }

    /// Record the outcome of [`SymmetryAnalyzer::analyze`].
    pub fn set_outcome(&mut self, outcome: Result<SymmetryAnalysis, AnalysisError>) {
        match outcome {
            Ok(analysis) => self.set_analysis(analysis),
            Err(err) => self.set_error(&err),
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SymmetryIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SymmetryIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
