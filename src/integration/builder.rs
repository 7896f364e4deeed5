//! Builder for creating detection boxes from various input formats.

use crate::tracker::Rect;

/// Builder for creating `Rect` detections from various input formats.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    rect: Rect,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.rect = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.rect = Rect::from_xywh(cx, cy, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, l: f32, t: f32, w: f32, h: f32) -> Self {
        self.rect = Rect::new(l, t, w, h);
        self
    }

    /// Build the final `Rect`.
    pub fn build(self) -> Rect {
        self.rect
    }
}
