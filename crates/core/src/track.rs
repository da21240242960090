//! Decoded track data shared by the decoder and the statistics engine.

use serde::Serialize;

use crate::types::Timestamp;

/// Name shown for tracks whose document carries no track name.
pub const UNNAMED_TRACK: &str = "Unnamed Track";

/// One sampled position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub timestamp: Option<Timestamp>,
}

impl TrackPoint {
    /// A bare position with no elevation or timestamp.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A decoded track document. `points` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTrack {
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}

impl DecodedTrack {
    /// The track name, or [`UNNAMED_TRACK`] when the document has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_TRACK)
    }
}
