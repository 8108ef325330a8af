use std::convert::Infallible;
use std::path::Path;

use ::image::DynamicImage;
use log::{debug, info, warn};

use crate::engine::{load_scored_boxes, SymmetryIoError, SymmetryReport};
use crate::{AnalysisError, DetectionSet, ScoredBox, SymmetryAnalysis, SymmetryAnalyzer};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Io(#[from] SymmetryIoError),

    #[error("structure detector failed: {0}")]
    Detector(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Object detector locating the joints in a radiograph.
///
/// Implementations own their model; the analysis only borrows them.
pub trait StructureDetector {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every box found in `image` with its confidence.
    fn detect(&self, image: &DynamicImage) -> Result<Vec<ScoredBox>, Self::Error>;
}

impl<D: StructureDetector + ?Sized> StructureDetector for &D {
    type Error = D::Error;

    fn detect(&self, image: &DynamicImage) -> Result<Vec<ScoredBox>, Self::Error> {
        (**self).detect(image)
    }
}

/// Detector output captured ahead of time, returned as is for any image.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedDetections {
    boxes: Vec<ScoredBox>,
}

impl PrecomputedDetections {
    pub fn new(boxes: Vec<ScoredBox>) -> Self {
        Self { boxes }
    }

    /// Load a JSON array of scored boxes.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SymmetryIoError> {
        Ok(Self::new(load_scored_boxes(path)?))
    }

    pub fn boxes(&self) -> &[ScoredBox] {
        &self.boxes
    }
}

impl StructureDetector for PrecomputedDetections {
    type Error = Infallible;

    fn detect(&self, _image: &DynamicImage) -> Result<Vec<ScoredBox>, Self::Error> {
        Ok(self.boxes.clone())
    }
}

/// Everything known about one image after detection and analysis.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub width: u32,
    pub height: u32,
    pub raw: Vec<ScoredBox>,
    pub accepted: DetectionSet,
    pub outcome: Result<SymmetryAnalysis, AnalysisError>,
}

impl ImageAnalysis {
    /// Build the JSON report for this image.
    pub fn report(&self, image_path: impl Into<String>) -> SymmetryReport {
        let mut report = SymmetryReport::new(
            image_path,
            self.width,
            self.height,
            self.raw.len(),
            self.accepted.len(),
        );
        report.set_outcome(self.outcome.clone());
        report
    }
}

/// Decode an image from disk.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, DetectError> {
    Ok(::image::open(path)?)
}

/// Run `detector` on `image` and analyze the accepted boxes.
///
/// A wrong number of structures or degenerate boxes end up in
/// [`ImageAnalysis::outcome`]; only detector failures are returned as `Err`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(detector, image, analyzer),
        fields(width = image.width(), height = image.height())
    )
)]
pub fn analyze_image<D: StructureDetector>(
    detector: &D,
    image: &DynamicImage,
    analyzer: &SymmetryAnalyzer,
) -> Result<ImageAnalysis, DetectError> {
    let raw = detector
        .detect(image)
        .map_err(|e| DetectError::Detector(Box::new(e)))?;
    let accepted = analyzer.accept(&raw);
    info!(
        "detections: {} raw, {} at confidence >= {}",
        raw.len(),
        accepted.len(),
        analyzer.params().min_confidence
    );

    let outcome = analyzer.analyze(&accepted, f64::from(image.width()));
    match &outcome {
        Ok(analysis) => debug!("{}", analysis.summary()),
        Err(err) => warn!("{}", err.status_text()),
    }

    Ok(ImageAnalysis {
        width: image.width(),
        height: image.height(),
        raw,
        accepted,
        outcome,
    })
}

/// Convenience overload: decode `path`, then [`analyze_image`].
pub fn analyze_image_path<D: StructureDetector>(
    detector: &D,
    path: impl AsRef<Path>,
    analyzer: &SymmetryAnalyzer,
) -> Result<(DynamicImage, ImageAnalysis), DetectError> {
    let image = load_image(path)?;
    let result = analyze_image(detector, &image, analyzer)?;
    Ok((image, result))
}
