//! Delivery settings model

use serde::{Deserialize, Serialize};

use crate::models::ZoneRecord;

/// Delivery configuration document (singleton per store).
///
/// Loaded once per editor session, mutated locally as a draft and written
/// back on explicit save. `PartialEq` is derived so callers can deep-compare
/// a draft against the last loaded/saved snapshot to derive a dirty flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettings {
    /// Delivery zones, persisted without marker handles
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
    /// Price new zones are seeded with
    #[serde(default)]
    pub default_price: f64,
    #[serde(default)]
    pub is_free_delivery: bool,
    /// Order total from which delivery is free (when enabled)
    #[serde(default)]
    pub free_delivery_threshold: f64,
    /// Courier dispatch interval in minutes
    #[serde(default = "default_interval")]
    pub delivery_interval: u32,
}

fn default_interval() -> u32 {
    60
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            default_price: 0.0,
            is_free_delivery: false,
            free_delivery_threshold: 0.0,
            delivery_interval: default_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    #[test]
    fn test_wire_naming_is_camel_case() {
        let settings = DeliverySettings {
            zones: vec![ZoneRecord {
                name: "Центр".to_string(),
                coordinates: vec![GeoPoint::new(56.10, 40.30)],
                price: 150.0,
            }],
            default_price: 100.0,
            is_free_delivery: true,
            free_delivery_threshold: 1500.0,
            delivery_interval: 30,
        };

        let value = serde_json::to_value(&settings).unwrap();
        assert!(value.get("defaultPrice").is_some());
        assert!(value.get("isFreeDelivery").is_some());
        assert!(value.get("freeDeliveryThreshold").is_some());
        assert!(value.get("deliveryInterval").is_some());
        assert_eq!(value["zones"][0]["coordinates"][0][0], 56.10);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: DeliverySettings = serde_json::from_str("{}").unwrap();
        assert!(settings.zones.is_empty());
        assert_eq!(settings.delivery_interval, 60);
        assert!(!settings.is_free_delivery);
    }

    #[test]
    fn test_dirty_flag_is_deep_comparison() {
        let snapshot = DeliverySettings::default();
        let mut draft = snapshot.clone();
        assert_eq!(draft, snapshot);

        draft.default_price = 120.0;
        assert_ne!(draft, snapshot);
    }
}
