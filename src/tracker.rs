mod centroid_tracker;
mod matching;
mod rect;
mod track;
mod track_state;

pub use centroid_tracker::{CentroidTracker, TrackedObject, TrackerConfig};
pub use matching::{centroid_distances, nearest_track};
pub use rect::Rect;
pub use track::Track;
pub use track_state::TrackState;
