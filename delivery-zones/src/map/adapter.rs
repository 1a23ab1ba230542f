//! Map adapter capability set
//!
//! The editor core never touches a vendor map object. A concrete map
//! integration implements [`MapAdapter`] and translates vendor callbacks
//! (click, drag end, context menu, double click) into [`EditorEvent`]
//! values; the core consumes opaque handles and coordinate tuples only.

use serde::{Deserialize, Serialize};
use shared::GeoPoint;
use uuid::Uuid;

/// Opaque marker identity, stable across re-renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(Uuid);

/// Opaque polygon identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolygonHandle(Uuid);

/// Opaque polyline identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolylineHandle(Uuid);

impl MarkerHandle {
    /// Allocate a fresh handle; called by adapter implementations
    pub fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl PolygonHandle {
    /// Allocate a fresh handle; called by adapter implementations
    pub fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl PolylineHandle {
    /// Allocate a fresh handle; called by adapter implementations
    pub fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Any handle that can sit on the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceHandle {
    Marker(MarkerHandle),
    Polygon(PolygonHandle),
    Polyline(PolylineHandle),
}

/// Marker presentation hints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Vendor icon preset id
    pub preset: String,
    pub draggable: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            preset: "islands#blueCircleDotIcon".to_string(),
            draggable: true,
        }
    }
}

/// Polygon presentation hints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_width: u32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: "#56db40".to_string(),
            fill_opacity: 0.6,
            stroke_color: "#ed4543".to_string(),
            stroke_width: 5,
        }
    }
}

/// Capability set required from a map engine.
///
/// Creating a primitive does not show it; a handle becomes visible only
/// once attached to the render surface, and both operations are cheap
/// bookkeeping on the vendor side.
pub trait MapAdapter {
    fn create_marker(&mut self, coord: GeoPoint, style: &MarkerStyle) -> MarkerHandle;
    fn create_polygon(&mut self, ring: &[GeoPoint], style: &PolygonStyle) -> PolygonHandle;
    fn create_polyline(&mut self, points: &[GeoPoint]) -> PolylineHandle;

    /// Attach a previously created handle to the render surface
    fn attach(&mut self, handle: SurfaceHandle);
    /// Detach a handle from the render surface
    fn detach(&mut self, handle: SurfaceHandle);

    fn set_center(&mut self, coord: GeoPoint);
    fn set_zoom(&mut self, level: u8);
    /// Fit the viewport to the bounding box of the given points
    fn fit_bounds(&mut self, points: &[GeoPoint]);
}

/// Map interaction event, already translated from vendor callbacks.
///
/// The embedding layer rebinds vendor handlers as it pleases; because every
/// event arrives here as a plain value, repeated rebinding can never cause
/// a duplicate mutation inside the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Single click on the map surface
    MapClick { coord: GeoPoint },
    /// Double click on the map surface
    MapDoubleClick { coord: GeoPoint },
    /// A vertex marker finished dragging at a new position
    VertexDragEnd { marker: MarkerHandle, coord: GeoPoint },
    /// Context menu requested on a vertex marker
    VertexContextMenu { marker: MarkerHandle },
}

/// Axis-aligned bounding box of a point set, `None` for an empty set.
pub fn bounding_box(points: &[GeoPoint]) -> Option<(GeoPoint, GeoPoint)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for point in &points[1..] {
        min.lat = min.lat.min(point.lat);
        min.lng = min.lng.min(point.lng);
        max.lat = max.lat.max(point.lat);
        max.lng = max.lng.max(point.lng);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_of_empty_set() {
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn test_bounding_box_spans_all_points() {
        let points = [
            GeoPoint::new(56.10, 40.31),
            GeoPoint::new(56.12, 40.30),
            GeoPoint::new(56.11, 40.33),
        ];
        let (min, max) = bounding_box(&points).unwrap();
        assert_eq!(min, GeoPoint::new(56.10, 40.30));
        assert_eq!(max, GeoPoint::new(56.12, 40.33));
    }
}
