use nalgebra::Point2;

use crate::error::{Result, TrackerError};

/// Bounding box of one detection, stored as top-left corner plus extent.
///
/// Supports the formats detectors commonly emit:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
/// - XYWH: Center X, Center Y, Width, Height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a Rect from XYWH format (center x, center y, width, height).
    #[inline]
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Create a Rect from a TLWH slice, failing if it does not hold exactly four values.
    ///
    /// `index` is the position of the row within its frame and is only used
    /// for error reporting.
    pub fn from_slice(index: usize, values: &[f32]) -> Result<Self> {
        match *values {
            [x, y, width, height] => Ok(Self::new(x, y, width, height)),
            _ => Err(TrackerError::MalformedDetection {
                index,
                len: values.len(),
            }),
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Center point snapped down to whole pixels, `floor((2x + w) / 2)` per axis.
    #[inline]
    pub fn pixel_center(&self) -> Point2<f32> {
        Point2::new(
            ((2.0 * self.x + self.width) / 2.0).floor(),
            ((2.0 * self.y + self.height) / 2.0).floor(),
        )
    }
}

impl From<[f32; 4]> for Rect {
    fn from(tlwh: [f32; 4]) -> Self {
        Self::new(tlwh[0], tlwh[1], tlwh[2], tlwh[3])
    }
}
