//! Zone record model

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Persisted view of a delivery zone.
///
/// This is the shape the settings API stores: outline plus pricing, without
/// any map-engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    pub coordinates: Vec<GeoPoint>,
    /// Flat delivery price for orders inside the zone
    pub price: f64,
}
