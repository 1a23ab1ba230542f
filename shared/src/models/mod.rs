//! Data models

pub mod delivery_settings;
pub mod geo;
pub mod zone;

pub use delivery_settings::DeliverySettings;
pub use geo::GeoPoint;
pub use zone::ZoneRecord;
