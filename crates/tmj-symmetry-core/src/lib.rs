//! Core types and utilities for TMJ symmetry analysis.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete object detector or image type.

mod bbox;

pub use bbox::{BoundingBox, BoxError, DetectionSet, ScoredBox, DEFAULT_MIN_CONFIDENCE};
