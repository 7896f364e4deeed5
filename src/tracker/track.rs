//! Single object track for centroid association.

use nalgebra::Point2;

use crate::tracker::track_state::TrackState;

/// One physical object followed across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier, never reused within a tracker
    pub id: u64,
    /// Last known centroid
    pub center: Point2<f32>,
    /// Consecutive frames since the track was last matched
    pub inactive_count: u32,
    /// Current track state
    pub state: TrackState,
    /// Frame on which the track was last created or matched
    pub frame_id: u64,
    /// Detections associated with this track, including the one that created it
    pub hits: u32,
    /// Frames this track has lived through
    pub age: u32,
}

impl Track {
    pub(crate) fn new(id: u64, center: Point2<f32>, frame_id: u64) -> Self {
        Self {
            id,
            center,
            inactive_count: 0,
            state: TrackState::New,
            frame_id,
            hits: 1,
            age: 0,
        }
    }

    pub(crate) fn update(&mut self, center: Point2<f32>, frame_id: u64) {
        self.center = center;
        self.frame_id = frame_id;
        self.inactive_count = 0;
        self.hits = self.hits.saturating_add(1);
        self.state = TrackState::Matched;
    }

    /// End-of-frame aging. Runs for every live track, including ones matched
    /// on `frame_id`, so a freshly matched track ends the frame at 1.
    pub(crate) fn mark_aged(&mut self, frame_id: u64) {
        self.inactive_count = self.inactive_count.saturating_add(1);
        self.age = self.age.saturating_add(1);
        if self.frame_id != frame_id {
            self.state = TrackState::Unmatched;
        }
    }

    pub(crate) fn mark_evicted(&mut self) {
        self.state = TrackState::Evicted;
    }

    /// Whether the track has outlived the inactivity threshold.
    pub fn is_stale(&self, max_inactive: u32) -> bool {
        self.inactive_count > max_inactive
    }
}
