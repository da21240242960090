//! Track decoder: raw GPX text to an ordered point sequence.
//!
//! Only two things about a document are fatal besides bad coordinates: it is
//! not well-formed markup, or it holds no track points. Missing or unreadable
//! elevation and time values degrade to absent fields on that point alone.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::track::{DecodedTrack, TrackPoint};
use crate::types::Timestamp;
use crate::xml::XmlElement;

const TRACK: &str = "trk";
const TRACK_POINT: &str = "trkpt";
const NAME: &str = "name";
const ELEVATION: &str = "ele";
const TIME: &str = "time";

/// Why a stored document could not be turned into a track.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid track document: {0}")]
    Malformed(String),

    #[error("No track points found in track document")]
    NoPoints,

    #[error("Track point {index} has an invalid {attribute} value {value:?}")]
    InvalidCoordinate {
        index: usize,
        attribute: &'static str,
        value: Option<String>,
    },
}

/// Decode a GPX document.
///
/// Every `trkpt` element is collected in document order regardless of how it
/// is grouped into tracks and segments.
pub fn decode(raw: &str) -> Result<DecodedTrack, DecodeError> {
    let root = XmlElement::parse(raw)?;

    let points = root
        .descendants()
        .filter(|e| e.name == TRACK_POINT)
        .enumerate()
        .map(|(index, element)| decode_point(index, element))
        .collect::<Result<Vec<_>, _>>()?;

    if points.is_empty() {
        return Err(DecodeError::NoPoints);
    }

    Ok(DecodedTrack {
        name: track_name(&root),
        points,
    })
}

/// First `name` that is a direct child of a `trk`. A blank name counts as absent.
fn track_name(root: &XmlElement) -> Option<String> {
    root.descendants()
        .filter(|e| e.name == TRACK)
        .find_map(|trk| trk.child(NAME))
        .map(XmlElement::text)
        .filter(|name| !name.is_empty())
}

fn decode_point(index: usize, element: &XmlElement) -> Result<TrackPoint, DecodeError> {
    let latitude = coordinate(index, element, "lat", 90.0)?;
    let longitude = coordinate(index, element, "lon", 180.0)?;

    let elevation = element
        .first_descendant(ELEVATION)
        .and_then(|ele| ele.text().parse::<f64>().ok())
        .filter(|value| value.is_finite());

    let timestamp = element
        .first_descendant(TIME)
        .and_then(|time| parse_timestamp(&time.text()));

    Ok(TrackPoint {
        latitude,
        longitude,
        elevation,
        timestamp,
    })
}

/// Read a required coordinate attribute, rejecting non-finite or
/// out-of-range values.
fn coordinate(
    index: usize,
    element: &XmlElement,
    attribute: &'static str,
    limit: f64,
) -> Result<f64, DecodeError> {
    let raw = element.attribute(attribute);
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && value.abs() <= limit)
        .ok_or_else(|| DecodeError::InvalidCoordinate {
            index,
            attribute,
            value: raw.map(str::to_string),
        })
}

/// Parse an RFC 3339 instant. Values without an offset are read as UTC.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
