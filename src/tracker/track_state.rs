/// Track state enumeration for the association lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Created this frame from an unmatched detection
    #[default]
    New,
    /// Associated with a detection on the latest frame
    Matched,
    /// Went unmatched on the latest frame
    Unmatched,
    /// Removed from tracking after too many unmatched frames
    Evicted,
}
