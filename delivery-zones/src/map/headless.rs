//! Headless map adapter
//!
//! In-memory [`MapAdapter`] implementation recording everything a real map
//! engine would render. Used by tests, the demo example, and any embedding
//! that wants to drive the editor without a map on screen.

use std::collections::{HashMap, HashSet};

use shared::GeoPoint;

use super::adapter::{
    MapAdapter, MarkerHandle, MarkerStyle, PolygonHandle, PolygonStyle, PolylineHandle,
    SurfaceHandle, bounding_box,
};

/// Recording map surface with no rendering behind it
#[derive(Debug, Default)]
pub struct HeadlessMap {
    markers: HashMap<MarkerHandle, GeoPoint>,
    polygons: HashMap<PolygonHandle, Vec<GeoPoint>>,
    polylines: HashMap<PolylineHandle, Vec<GeoPoint>>,
    attached: HashSet<SurfaceHandle>,
    center: Option<GeoPoint>,
    zoom: Option<u8>,
    fitted: Option<(GeoPoint, GeoPoint)>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position a marker was created at
    pub fn marker_coord(&self, handle: MarkerHandle) -> Option<GeoPoint> {
        self.markers.get(&handle).copied()
    }

    /// Markers currently on the render surface
    pub fn attached_markers(&self) -> Vec<MarkerHandle> {
        self.attached
            .iter()
            .filter_map(|handle| match handle {
                SurfaceHandle::Marker(marker) => Some(*marker),
                _ => None,
            })
            .collect()
    }

    /// Polygons currently on the render surface, with their rings
    pub fn attached_polygons(&self) -> Vec<Vec<GeoPoint>> {
        self.attached
            .iter()
            .filter_map(|handle| match handle {
                SurfaceHandle::Polygon(polygon) => self.polygons.get(polygon).cloned(),
                _ => None,
            })
            .collect()
    }

    /// Polylines currently on the render surface
    pub fn attached_polylines(&self) -> Vec<Vec<GeoPoint>> {
        self.attached
            .iter()
            .filter_map(|handle| match handle {
                SurfaceHandle::Polyline(line) => self.polylines.get(line).cloned(),
                _ => None,
            })
            .collect()
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn center(&self) -> Option<GeoPoint> {
        self.center
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    /// Bounding box of the last `fit_bounds` call
    pub fn fitted(&self) -> Option<(GeoPoint, GeoPoint)> {
        self.fitted
    }
}

impl MapAdapter for HeadlessMap {
    fn create_marker(&mut self, coord: GeoPoint, _style: &MarkerStyle) -> MarkerHandle {
        let handle = MarkerHandle::allocate();
        self.markers.insert(handle, coord);
        handle
    }

    fn create_polygon(&mut self, ring: &[GeoPoint], _style: &PolygonStyle) -> PolygonHandle {
        let handle = PolygonHandle::allocate();
        self.polygons.insert(handle, ring.to_vec());
        handle
    }

    fn create_polyline(&mut self, points: &[GeoPoint]) -> PolylineHandle {
        let handle = PolylineHandle::allocate();
        self.polylines.insert(handle, points.to_vec());
        handle
    }

    fn attach(&mut self, handle: SurfaceHandle) {
        self.attached.insert(handle);
    }

    fn detach(&mut self, handle: SurfaceHandle) {
        self.attached.remove(&handle);
    }

    fn set_center(&mut self, coord: GeoPoint) {
        self.center = Some(coord);
    }

    fn set_zoom(&mut self, level: u8) {
        self.zoom = Some(level);
    }

    fn fit_bounds(&mut self, points: &[GeoPoint]) {
        self.fitted = bounding_box(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_detach_round_trip() {
        let mut map = HeadlessMap::new();
        let marker = map.create_marker(GeoPoint::new(56.10, 40.30), &MarkerStyle::default());
        assert_eq!(map.attached_count(), 0);

        map.attach(SurfaceHandle::Marker(marker));
        assert_eq!(map.attached_markers(), vec![marker]);

        map.detach(SurfaceHandle::Marker(marker));
        assert_eq!(map.attached_count(), 0);
        // the marker object itself survives detachment
        assert_eq!(map.marker_coord(marker), Some(GeoPoint::new(56.10, 40.30)));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut map = HeadlessMap::new();
        let marker = map.create_marker(GeoPoint::new(56.10, 40.30), &MarkerStyle::default());
        map.attach(SurfaceHandle::Marker(marker));
        map.detach(SurfaceHandle::Marker(marker));
        map.detach(SurfaceHandle::Marker(marker));
        assert_eq!(map.attached_count(), 0);
    }
}
