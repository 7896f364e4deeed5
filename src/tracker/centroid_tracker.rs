//! Greedy centroid-distance tracker.

use std::collections::BTreeMap;

use log::{debug, info, trace};
use nalgebra::Point2;

use crate::error::{Result, TrackerError};
use crate::tracker::matching;
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Maximum centroid distance (pixels) at which a detection continues a track
    pub max_distance: f32,
    /// Consecutive unmatched frames tolerated before a track is evicted
    pub max_inactive: u32,
    /// Snap centroids down to whole pixels, as integer-coordinate pipelines do
    pub integer_centroids: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 35.0,
            max_inactive: 10,
            integer_centroids: false,
        }
    }
}

impl TrackerConfig {
    /// Build a validated configuration from the two thresholds.
    pub fn new(max_distance: f32, max_inactive: u32) -> Result<Self> {
        let config = Self {
            max_distance,
            max_inactive,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_integer_centroids(mut self, enabled: bool) -> Self {
        self.integer_centroids = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_thresholds(self.max_distance, self.max_inactive)
    }
}

fn validate_thresholds(max_distance: f32, max_inactive: u32) -> Result<()> {
    if !max_distance.is_finite() || max_distance < 0.0 {
        return Err(TrackerError::config(format!(
            "max_distance must be a non-negative finite number, got {max_distance}"
        )));
    }
    if max_inactive == 0 {
        return Err(TrackerError::config("max_inactive must be at least 1"));
    }
    Ok(())
}

/// A detection tagged with the identity of the track it was assigned to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    pub bbox: Rect,
    pub track_id: u64,
}

/// Multi-object tracker associating detections by nearest centroid.
///
/// Detections are processed in input order and each one is committed
/// immediately: it either continues the closest live track within
/// `max_distance` or opens a new track. A track already claimed earlier in
/// the same frame is not a candidate again, so identities never repeat
/// within one frame's output. Afterwards every live track is aged
/// by one frame and tracks idle for more than `max_inactive` frames are
/// evicted. Identities are never reused.
///
/// Call [`update`](Self::update) exactly once per frame, in frame order.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    tracks: BTreeMap<u64, Track>,
    evicted: Vec<Track>,
    next_id: u64,
    frame_id: u64,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::with_valid_config(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Creating CentroidTracker: max_distance={:.1}, max_inactive={}, integer_centroids={}",
            config.max_distance, config.max_inactive, config.integer_centroids
        );
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TrackerConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            evicted: Vec::new(),
            next_id: 0,
            frame_id: 0,
            config,
        }
    }

    /// Process one frame of detections with the configured thresholds.
    ///
    /// Returns one entry per detection, in input order.
    pub fn update(&mut self, detections: &[Rect]) -> Vec<TrackedObject> {
        let max_distance = self.config.max_distance;
        let max_inactive = self.config.max_inactive;
        self.step(detections, max_distance, max_inactive)
    }

    /// Process one frame of detections with thresholds given for this call only.
    ///
    /// The thresholds are checked before any state changes, so a rejected
    /// call leaves the tracker untouched.
    pub fn update_with_thresholds(
        &mut self,
        detections: &[Rect],
        max_distance: f32,
        max_inactive: u32,
    ) -> Result<Vec<TrackedObject>> {
        validate_thresholds(max_distance, max_inactive)?;
        Ok(self.step(detections, max_distance, max_inactive))
    }

    fn step(
        &mut self,
        detections: &[Rect],
        max_distance: f32,
        max_inactive: u32,
    ) -> Vec<TrackedObject> {
        self.frame_id += 1;
        let mut output = Vec::with_capacity(detections.len());

        // Step 1: Associate each detection in order, committing immediately
        for bbox in detections {
            let center = self.centroid(bbox);
            let track_id = match self.closest_track(&center, max_distance) {
                Some(track_id) => {
                    if let Some(track) = self.tracks.get_mut(&track_id) {
                        track.update(center, self.frame_id);
                    }
                    trace!(
                        "frame {}: matched track {} at ({:.1}, {:.1})",
                        self.frame_id, track_id, center.x, center.y
                    );
                    track_id
                }
                None => self.open_track(center),
            };
            output.push(TrackedObject {
                bbox: *bbox,
                track_id,
            });
        }

        // Step 2: Age every live track, matched ones included
        for track in self.tracks.values_mut() {
            track.mark_aged(self.frame_id);
        }

        // Step 3: Evict stale tracks
        self.evicted.clear();
        let frame_id = self.frame_id;
        let evicted = &mut self.evicted;
        self.tracks.retain(|&track_id, track| {
            if !track.is_stale(max_inactive) {
                return true;
            }
            debug!(
                "frame {}: evicting track {} after {} inactive frames",
                frame_id, track_id, track.inactive_count
            );
            let mut removed = track.clone();
            removed.mark_evicted();
            evicted.push(removed);
            false
        });

        output
    }

    fn centroid(&self, bbox: &Rect) -> Point2<f32> {
        if self.config.integer_centroids {
            bbox.pixel_center()
        } else {
            bbox.center()
        }
    }

    /// Identity of the nearest unclaimed live track within `max_distance`.
    /// Equidistant candidates resolve to the lowest identity.
    fn closest_track(&self, center: &Point2<f32>, max_distance: f32) -> Option<u64> {
        let (ids, centers): (Vec<u64>, Vec<Point2<f32>>) = self
            .tracks
            .iter()
            // Claimed tracks sit out the rest of the frame so no identity
            // is emitted twice in one frame's output.
            .filter(|(_, track)| track.frame_id != self.frame_id)
            .map(|(&id, track)| (id, track.center))
            .unzip();
        let dists = matching::centroid_distances(center, &centers);
        matching::nearest_track(&dists)
            .filter(|&(_, dist)| dist <= max_distance)
            .map(|(idx, _)| ids[idx])
    }

    fn open_track(&mut self, center: Point2<f32>) -> u64 {
        self.next_id += 1;
        let track_id = self.next_id;
        self.tracks
            .insert(track_id, Track::new(track_id, center, self.frame_id));
        debug!(
            "frame {}: new track {} at ({:.1}, {:.1})",
            self.frame_id, track_id, center.x, center.y
        );
        track_id
    }

    /// Live tracks in ascending identity order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn track(&self, track_id: u64) -> Option<&Track> {
        self.tracks.get(&track_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Highest identity handed out so far, 0 if none.
    pub fn last_issued_id(&self) -> u64 {
        self.next_id
    }

    /// Number of frames processed.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }

    /// Final snapshots of the tracks evicted by the most recent update.
    pub fn evicted(&self) -> &[Track] {
        &self.evicted
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Drop all live tracks. The identity and frame counters keep running.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.evicted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::TrackState;

    fn tracker(max_distance: f32, max_inactive: u32) -> CentroidTracker {
        CentroidTracker::new(TrackerConfig::new(max_distance, max_inactive).unwrap()).unwrap()
    }

    fn ids(objects: &[TrackedObject]) -> Vec<u64> {
        objects.iter().map(|o| o.track_id).collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(TrackerConfig::default().validate().is_ok());
        assert!(TrackerConfig::new(0.0, 1).is_ok());
        assert!(matches!(
            TrackerConfig::new(-1.0, 10),
            Err(TrackerError::InvalidConfig(_))
        ));
        assert!(TrackerConfig::new(f32::NAN, 10).is_err());
        assert!(TrackerConfig::new(f32::INFINITY, 10).is_err());
        assert!(TrackerConfig::new(35.0, 0).is_err());

        let bad = TrackerConfig {
            max_inactive: 0,
            ..TrackerConfig::default()
        };
        assert!(CentroidTracker::new(bad).is_err());
    }

    #[test]
    fn test_matched_track_ends_frame_with_one_inactive() {
        let mut tracker = CentroidTracker::default();
        let out = tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        let track = tracker.track(out[0].track_id).unwrap();
        assert_eq!(track.inactive_count, 1);
        assert_eq!(track.state, TrackState::New);

        tracker.update(&[Rect::new(12.0, 10.0, 20.0, 20.0)]);
        let track = tracker.track(out[0].track_id).unwrap();
        assert_eq!(track.inactive_count, 1);
        assert_eq!(track.state, TrackState::Matched);
        assert_eq!(track.hits, 2);
        assert_eq!(track.center, Point2::new(22.0, 20.0));
    }

    #[test]
    fn test_tie_break_prefers_lowest_id() {
        let mut tracker = tracker(35.0, 10);
        // Centroids (20, 20) and (40, 20)
        let first = tracker.update(&[
            Rect::new(10.0, 10.0, 20.0, 20.0),
            Rect::new(30.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(ids(&first), vec![1, 2]);

        // Centroid (30, 20) is 10px from both
        let second = tracker.update(&[Rect::new(20.0, 10.0, 20.0, 20.0)]);
        assert_eq!(ids(&second), vec![1]);
    }

    #[test]
    fn test_track_matches_at_most_once_per_frame() {
        let mut tracker = tracker(10.0, 10);
        tracker.update(&[Rect::new(0.0, 0.0, 0.0, 0.0)]);

        // First come, first served: (3, 0) claims track 1 even though (1, 0)
        // is closer, and (1, 0) then opens a new track.
        let out = tracker.update(&[
            Rect::new(3.0, 0.0, 0.0, 0.0),
            Rect::new(1.0, 0.0, 0.0, 0.0),
        ]);
        assert_eq!(ids(&out), vec![1, 2]);
        assert_eq!(tracker.track(1).unwrap().center, Point2::new(3.0, 0.0));
        assert_eq!(tracker.track(2).unwrap().center, Point2::new(1.0, 0.0));
    }

    #[test]
    fn test_duplicate_detections_get_distinct_ids() {
        let mut tracker = CentroidTracker::default();
        let bbox = Rect::new(10.0, 10.0, 20.0, 20.0);
        let out = tracker.update(&[bbox, bbox]);
        assert_eq!(ids(&out), vec![1, 2]);

        let out = tracker.update(&[bbox, bbox, bbox]);
        assert_eq!(ids(&out), vec![1, 2, 3]);
    }

    #[test]
    fn test_distance_threshold_is_inclusive() {
        let mut tracker = tracker(5.0, 10);
        tracker.update(&[Rect::new(0.0, 0.0, 0.0, 0.0)]);
        let out = tracker.update(&[Rect::new(3.0, 4.0, 0.0, 0.0)]);
        assert_eq!(ids(&out), vec![1]);

        let out = tracker.update(&[Rect::new(3.0, 10.0, 0.0, 0.0)]);
        assert_eq!(ids(&out), vec![2]);
    }

    #[test]
    fn test_zero_distance_only_matches_exact_centroid() {
        let mut tracker = tracker(0.0, 10);
        tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        assert_eq!(ids(&tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)])), vec![1]);
        assert_eq!(ids(&tracker.update(&[Rect::new(11.0, 10.0, 20.0, 20.0)])), vec![2]);
    }

    #[test]
    fn test_eviction_reports_final_snapshot() {
        let mut tracker = tracker(35.0, 2);
        tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        assert_eq!(tracker.track(1).unwrap().inactive_count, 1);

        tracker.update(&[]);
        assert_eq!(tracker.track(1).unwrap().inactive_count, 2);
        assert_eq!(tracker.track(1).unwrap().state, TrackState::Unmatched);
        assert!(tracker.evicted().is_empty());

        tracker.update(&[]);
        assert!(tracker.is_empty());
        assert_eq!(tracker.evicted().len(), 1);
        assert_eq!(tracker.evicted()[0].id, 1);
        assert_eq!(tracker.evicted()[0].state, TrackState::Evicted);
        assert_eq!(tracker.evicted()[0].center, Point2::new(20.0, 20.0));

        tracker.update(&[]);
        assert!(tracker.evicted().is_empty());
    }

    #[test]
    fn test_update_with_thresholds_rejects_before_mutating() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);

        let err = tracker
            .update_with_thresholds(&[Rect::new(500.0, 500.0, 1.0, 1.0)], -5.0, 10)
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig(_)));
        assert_eq!(tracker.frame_count(), 1);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.last_issued_id(), 1);

        let out = tracker
            .update_with_thresholds(&[Rect::new(60.0, 10.0, 20.0, 20.0)], 60.0, 10)
            .unwrap();
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn test_integer_centroids() {
        let config = TrackerConfig::default().with_integer_centroids(true);
        let mut tracker = CentroidTracker::new(config).unwrap();
        tracker.update(&[Rect::new(10.0, 10.0, 5.0, 5.0)]);
        assert_eq!(tracker.track(1).unwrap().center, Point2::new(12.0, 12.0));
    }

    #[test]
    fn test_reset_keeps_identity_counter() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        tracker.reset();
        assert!(tracker.is_empty());

        let out = tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        assert_eq!(ids(&out), vec![2]);
    }

    #[test]
    fn test_long_lived_track_does_not_overflow() {
        let mut tracker = tracker(35.0, u32::MAX);
        tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
        if let Some(track) = tracker.tracks.get_mut(&1) {
            track.inactive_count = u32::MAX - 1;
        }

        tracker.update(&[]);
        tracker.update(&[]);
        let track = tracker.track(1).unwrap();
        assert_eq!(track.inactive_count, u32::MAX);
        assert_eq!(track.state, TrackState::Unmatched);
        assert!(tracker.evicted().is_empty());
    }

    #[test]
    fn test_frame_counter_past_u32_range() {
        let mut tracker = CentroidTracker::default();
        tracker.frame_id = u64::from(u32::MAX);

        assert_eq!(ids(&tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)])), vec![1]);
        assert_eq!(ids(&tracker.update(&[Rect::new(15.0, 10.0, 20.0, 20.0)])), vec![1]);
        assert!(tracker.update(&[]).is_empty());
        assert_eq!(tracker.frame_count(), u64::from(u32::MAX) + 3);
        assert_eq!(tracker.track(1).unwrap().frame_id, u64::from(u32::MAX) + 2);
    }
}
