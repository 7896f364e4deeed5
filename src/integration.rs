//! Integration module for connecting object detection backends with the tracker.
//!
//! This module provides traits and utilities for turning whatever a detector
//! emits into per-frame [`Rect`](crate::tracker::Rect) lists and feeding them
//! to the [`CentroidTracker`](crate::tracker::CentroidTracker).

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
