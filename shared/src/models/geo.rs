//! Geographic point model

use serde::{Deserialize, Serialize};

/// A geographic point in internal ordering (latitude first).
///
/// Serializes as a two-element `[lat, lng]` array, which is the shape the
/// settings API stores zone outlines in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lat, point.lng]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_lat_lng_pair() {
        let json = serde_json::to_string(&GeoPoint::new(56.10, 40.30)).unwrap();
        assert_eq!(json, "[56.1,40.3]");
    }

    #[test]
    fn test_deserializes_from_pair() {
        let point: GeoPoint = serde_json::from_str("[56.11, 40.31]").unwrap();
        assert_eq!(point, GeoPoint::new(56.11, 40.31));
    }
}
