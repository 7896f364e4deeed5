//! Greedy centroid-distance multi-object tracker.
//!
//! Feed one frame of bounding boxes at a time to [`CentroidTracker::update`]
//! and get the same boxes back tagged with stable track identities.
//!
//! ```
//! use centroid_tracker::{CentroidTracker, Rect};
//!
//! let mut tracker = CentroidTracker::default();
//! let first = tracker.update(&[Rect::new(10.0, 10.0, 20.0, 20.0)]);
//! let second = tracker.update(&[Rect::new(15.0, 10.0, 20.0, 20.0)]);
//! assert_eq!(first[0].track_id, second[0].track_id);
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{CentroidTracker, Rect, Track, TrackState, TrackedObject, TrackerConfig};
