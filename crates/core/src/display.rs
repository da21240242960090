//! Human-readable renderings of track statistics.

use serde::Serialize;

use crate::statistics::TrackStatistics;

/// Placeholder shown when a metric has nothing to report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formatted statistics, ready for an info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsDisplay {
    pub distance: String,
    pub duration: String,
    pub elevation_gain: String,
    pub elevation_loss: String,
}

impl From<&TrackStatistics> for StatisticsDisplay {
    fn from(stats: &TrackStatistics) -> Self {
        Self {
            distance: format_distance(stats.total_distance_meters),
            duration: format_duration(stats.duration_seconds),
            elevation_gain: format_elevation(stats.elevation_gain_meters),
            elevation_loss: format_elevation(stats.elevation_loss_meters),
        }
    }
}

/// Kilometres with two decimals, e.g. `"12.34 km"`.
pub fn format_distance(meters: f64) -> String {
    if meters > 0.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// `"1h 5m"`, `"5m 3s"` or `"42s"` depending on magnitude.
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return NOT_AVAILABLE.to_string();
    };

    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Whole metres, e.g. `"123 m"`.
pub fn format_elevation(meters: f64) -> String {
    if meters > 0.0 {
        format!("{} m", meters.round() as i64)
    } else {
        NOT_AVAILABLE.to_string()
    }
}
