//! Traits for detection backends and detection input formats.

use crate::error::Result;
use crate::tracker::Rect;

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
///
/// # Example
///
/// ```ignore
/// use centroid_tracker::{DetectionSource, Rect};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Rect>, Self::Error> {
///         // Run inference and return TLWH boxes
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return one frame of detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(&mut self, input: &[u8], width: u32, height: u32)
    -> std::result::Result<Vec<Rect>, Self::Error>;
}

/// Conversion of caller-side box lists into tracker input.
///
/// Rows are TLWH (left, top, width, height). A row with the wrong number of
/// values fails the whole frame instead of being skipped, so output indices
/// always line up with input indices.
pub trait IntoDetections {
    fn into_detections(self) -> Result<Vec<Rect>>;
}

impl IntoDetections for Vec<Rect> {
    fn into_detections(self) -> Result<Vec<Rect>> {
        Ok(self)
    }
}

impl IntoDetections for Vec<[f32; 4]> {
    fn into_detections(self) -> Result<Vec<Rect>> {
        Ok(self.into_iter().map(Rect::from).collect())
    }
}

impl IntoDetections for Vec<Vec<f32>> {
    fn into_detections(self) -> Result<Vec<Rect>> {
        self.iter()
            .enumerate()
            .map(|(index, row)| Rect::from_slice(index, row))
            .collect()
    }
}

impl IntoDetections for &[&[f32]] {
    fn into_detections(self) -> Result<Vec<Rect>> {
        self.iter()
            .enumerate()
            .map(|(index, row)| Rect::from_slice(index, row))
            .collect()
    }
}
