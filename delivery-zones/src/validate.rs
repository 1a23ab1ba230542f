//! Zone and settings validation
//!
//! Pure functions returning human-readable violation lists; an empty list
//! means valid. The same checks gate finishing creation, saving an edit
//! and saving settings, so a zone can never reach the persisted document
//! through a path that skips them.

use shared::DeliverySettings;

use crate::store::Zone;

/// Zone labels share the platform-wide entity name limit
pub const MAX_NAME_LEN: usize = 200;

/// Violation text for an outline with fewer than 3 vertices
pub const MSG_MIN_POINTS: &str = "minimum 3 points required";
/// Violation text for a blank zone name
pub const MSG_NAME_REQUIRED: &str = "name required";
/// Violation text for a non-positive or non-finite delivery price
pub const MSG_INVALID_PRICE: &str = "invalid delivery price";

/// Validate a zone's shape, name and price.
///
/// `None` stands for an absent zone (nothing was ever drawn) and fails the
/// point-count check like any too-short outline.
pub fn validate_zone(zone: Option<&Zone>) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(zone) = zone else {
        violations.push(MSG_MIN_POINTS.to_string());
        return violations;
    };

    if zone.coordinates.len() < 3 {
        violations.push(MSG_MIN_POINTS.to_string());
    }

    if zone.name.trim().is_empty() {
        violations.push(MSG_NAME_REQUIRED.to_string());
    } else if zone.name.len() > MAX_NAME_LEN {
        violations.push(format!(
            "name is too long ({} chars, max {MAX_NAME_LEN})",
            zone.name.len()
        ));
    }

    if !zone.price.is_finite() || zone.price <= 0.0 {
        violations.push(MSG_INVALID_PRICE.to_string());
    }

    violations
}

/// Validate the scalar delivery settings fields.
pub fn validate_settings(settings: &DeliverySettings) -> Vec<String> {
    let mut violations = Vec::new();

    if !settings.default_price.is_finite() || settings.default_price <= 0.0 {
        violations.push("default delivery price must be positive".to_string());
    }

    if settings.is_free_delivery
        && (!settings.free_delivery_threshold.is_finite()
            || settings.free_delivery_threshold <= 0.0)
    {
        violations.push("free delivery threshold must be positive".to_string());
    }

    violations
}
