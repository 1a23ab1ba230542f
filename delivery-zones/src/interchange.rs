//! Zone import/export over the GeoJSON interchange format
//!
//! Zones travel as a `FeatureCollection` of `Polygon` features (outer ring
//! only) in `[lng, lat]` ordering; `LineString` features are accepted on
//! import as well. Every coordinate crosses the [`crate::coords`] codec, so
//! the ordering swap lives in exactly one place.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use shared::GeoPoint;
use tempfile::NamedTempFile;

use crate::coords;
use crate::error::{EditorError, EditorResult};
use crate::map::PolygonStyle;
use crate::store::Zone;

/// Document name placed in the export metadata block
const EXPORT_DOCUMENT_NAME: &str = "Зоны доставки";

/// Import failure text for a document without convertible features
pub const MSG_NO_USABLE_OBJECTS: &str = "file contains no usable objects";

/// One zone parsed from an interchange document, not yet materialized on a
/// map surface
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedZone {
    pub name: String,
    pub price: f64,
    pub coordinates: Vec<GeoPoint>,
}

// ── Export ──────────────────────────────────────────────────────────

/// Serialize zones into an interchange document.
pub fn export_document(zones: &[Zone]) -> EditorResult<String> {
    let features = zones.iter().map(zone_to_feature).collect();

    let mut metadata = JsonObject::new();
    metadata.insert("name".to_string(), EXPORT_DOCUMENT_NAME.into());
    metadata.insert("exportedAt".to_string(), Utc::now().to_rfc3339().into());
    let mut foreign_members = JsonObject::new();
    foreign_members.insert("metadata".to_string(), metadata.into());

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    };

    serde_json::to_string_pretty(&collection).map_err(|err| EditorError::export(err.to_string()))
}

fn zone_to_feature(zone: &Zone) -> Feature {
    let mut ring: Vec<Vec<f64>> = zone
        .coordinates
        .iter()
        .copied()
        .map(coords::to_interchange)
        .collect();
    // close the ring; the importer drops the duplicate again
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }

    let style = PolygonStyle::default();
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), zone.name.clone().into());
    properties.insert("price".to_string(), zone.price.into());
    properties.insert("fill".to_string(), style.fill_color.into());
    properties.insert("fill-opacity".to_string(), style.fill_opacity.into());
    properties.insert("stroke".to_string(), style.stroke_color.into());
    properties.insert("stroke-width".to_string(), style.stroke_width.into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Write an exported document to `destination`.
///
/// `None` means the operator dismissed the save dialog; that is a no-op,
/// not an error. The document is staged in a temporary file next to the
/// target and atomically persisted, so no failure path leaves a partial
/// file behind.
pub fn save_export(document: &str, destination: Option<&Path>) -> EditorResult<()> {
    let Some(path) = destination else {
        tracing::debug!("export cancelled by the operator");
        return Ok(());
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|err| EditorError::export(err.to_string()))?;
    file.write_all(document.as_bytes())
        .map_err(|err| EditorError::export(err.to_string()))?;
    file.persist(path).map_err(|err| EditorError::export(err.to_string()))?;

    tracing::info!(path = %path.display(), bytes = document.len(), "zones exported");
    Ok(())
}

// ── Import ──────────────────────────────────────────────────────────

/// Parse an interchange document into zones.
///
/// * `default_price` prices features without a `price` property
/// * `name_offset` seats generated `Зона N` names after the zones already
///   in the store
///
/// The caller's store is only touched after a successful parse; any error
/// here leaves it exactly as it was.
pub fn import_document(
    text: &str,
    default_price: f64,
    name_offset: usize,
) -> EditorResult<Vec<ImportedZone>> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|err: geojson::Error| EditorError::import(err.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(EditorError::import("document is not a FeatureCollection"));
    };

    let mut zones = Vec::new();
    for feature in &collection.features {
        let Some(coordinates) = feature_outline(feature) else {
            continue;
        };
        if coordinates.is_empty() {
            continue;
        }

        let name = feature
            .property("name")
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Зона {}", name_offset + zones.len() + 1));
        let price = feature
            .property("price")
            .and_then(|value| value.as_f64())
            .unwrap_or(default_price);

        zones.push(ImportedZone { name, price, coordinates });
    }

    if zones.is_empty() {
        return Err(EditorError::import(MSG_NO_USABLE_OBJECTS));
    }

    tracing::info!(count = zones.len(), "interchange document parsed");
    Ok(zones)
}

/// Outline of a feature in internal ordering, `None` for unsupported
/// geometry. Polygons contribute the outer ring only, holes are ignored.
fn feature_outline(feature: &Feature) -> Option<Vec<GeoPoint>> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        Value::Polygon(rings) => rings.first().map(|ring| outer_ring_points(ring)),
        Value::LineString(positions) => Some(positions_to_points(positions)),
        other => {
            tracing::debug!(geometry = other.type_name(), "skipping unsupported geometry");
            None
        }
    }
}

/// Convert an outer ring, dropping the duplicate closing position so a
/// triangle stored as 4 positions still satisfies the 3-point rule.
fn outer_ring_points(ring: &[Vec<f64>]) -> Vec<GeoPoint> {
    let mut points = positions_to_points(ring);
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn positions_to_points(positions: &[Vec<f64>]) -> Vec<GeoPoint> {
    positions
        .iter()
        .filter_map(|position| {
            let point = coords::from_interchange(position);
            if point.is_none() {
                tracing::warn!(?position, "skipping malformed position");
            }
            point
        })
        .collect()
}
