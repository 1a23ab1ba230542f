//! Shared types for the delivery administration platform
//!
//! Wire-level data models exchanged between the delivery-zone editor core
//! and the settings persistence API.

pub mod models;
pub mod response;

// Re-exports
pub use models::{DeliverySettings, GeoPoint, ZoneRecord};
pub use response::SaveSettingsResponse;
pub use serde::{Deserialize, Serialize};
