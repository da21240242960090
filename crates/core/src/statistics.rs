//! Trip statistics over an ordered point sequence.
//!
//! `compute` is total: empty and single-point tracks yield zero distance,
//! zero elevation change and (unless the one point carries a time) no
//! duration.

use serde::Serialize;

use crate::track::TrackPoint;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Derived metrics for a single track.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TrackStatistics {
    pub total_distance_meters: f64,
    /// `None` when no point carries a timestamp.
    pub duration_seconds: Option<f64>,
    pub elevation_gain_meters: f64,
    pub elevation_loss_meters: f64,
}

/// Geographic extent of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackBounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

/// Great-circle distance between two points, in meters.
pub fn haversine_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for near-antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Compute distance, elevation gain/loss and duration for `points`.
pub fn compute(points: &[TrackPoint]) -> TrackStatistics {
    let mut stats = TrackStatistics::default();

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        stats.total_distance_meters += haversine_distance(prev, curr);

        // Pairs with a missing elevation on either side contribute nothing.
        if let (Some(from), Some(to)) = (prev.elevation, curr.elevation) {
            let delta = to - from;
            if delta > 0.0 {
                stats.elevation_gain_meters += delta;
            } else {
                stats.elevation_loss_meters += delta.abs();
            }
        }
    }

    stats.duration_seconds = duration_seconds(points);
    stats
}

/// Seconds between the first and last timestamped points, at millisecond
/// precision. Negative spans clamp to zero.
fn duration_seconds(points: &[TrackPoint]) -> Option<f64> {
    let first = points.iter().find_map(|p| p.timestamp)?;
    let last = points.iter().rev().find_map(|p| p.timestamp)?;
    let millis = (last - first).num_milliseconds();
    Some((millis as f64 / 1000.0).max(0.0))
}

/// Bounding box of `points`, or `None` for an empty sequence.
pub fn bounds(points: &[TrackPoint]) -> Option<TrackBounds> {
    let first = points.first()?;
    let init = TrackBounds {
        min_latitude: first.latitude,
        min_longitude: first.longitude,
        max_latitude: first.latitude,
        max_longitude: first.longitude,
    };

    Some(points.iter().skip(1).fold(init, |b, p| TrackBounds {
        min_latitude: b.min_latitude.min(p.latitude),
        min_longitude: b.min_longitude.min(p.longitude),
        max_latitude: b.max_latitude.max(p.latitude),
        max_longitude: b.max_longitude.max(p.longitude),
    }))
}
