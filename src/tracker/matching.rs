//! Matching utilities for centroid association.

use nalgebra::Point2;
use ndarray::Array1;

/// Euclidean distance from `center` to each of `track_centers`.
pub fn centroid_distances(center: &Point2<f32>, track_centers: &[Point2<f32>]) -> Array1<f32> {
    track_centers
        .iter()
        .map(|c| nalgebra::distance(center, c))
        .collect()
}

/// Index and distance of the closest entry in `distances`.
///
/// Equal distances resolve to the earliest index and NaN entries never win.
/// Returns `None` when no entry is comparable.
pub fn nearest_track(distances: &Array1<f32>) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &dist) in distances.iter().enumerate() {
        if dist.is_nan() {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best
}
