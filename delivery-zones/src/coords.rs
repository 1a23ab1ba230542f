//! Coordinate codec
//!
//! The editor stores coordinates latitude-first; the interchange format
//! stores them longitude-first. This module is the single place where the
//! two orderings meet; both the import and the export path go through it.

use shared::GeoPoint;

/// Convert an internal point to an interchange position (`[lng, lat]`).
pub fn to_interchange(point: GeoPoint) -> Vec<f64> {
    vec![point.lng, point.lat]
}

/// Convert an interchange position (`[lng, lat]`) to an internal point.
///
/// Positions with fewer than two components carry no coordinate and map to
/// `None`; extra components (altitude) are ignored.
pub fn from_interchange(position: &[f64]) -> Option<GeoPoint> {
    match position {
        [lng, lat, ..] => Some(GeoPoint::new(*lat, *lng)),
        _ => None,
    }
}
