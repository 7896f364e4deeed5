//! TrackerPipeline for combining detection with tracking.

use crate::error::Result;
use crate::tracker::{CentroidTracker, TrackedObject, TrackerConfig};

use super::DetectionSource;

/// A combined tracker that bundles detection inference with the centroid tracker.
///
/// This struct provides a convenient way to run end-to-end tracking
/// by combining any `DetectionSource` with the `CentroidTracker`.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            detector,
            tracker: CentroidTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::default(),
        }
    }

    /// Process a single frame and return its identity-tagged detections.
    ///
    /// Frames must be passed in capture order. If detection fails the
    /// tracker is left untouched for this frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<Vec<TrackedObject>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.tracker.update(&detections))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut CentroidTracker {
        &mut self.tracker
    }
}
