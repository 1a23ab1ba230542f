//! Zone store and vertex mutation protocol
//!
//! Ordered collection of delivery zones; the single source of truth
//! rendered onto the map. Zones are matched by [`ZoneId`], never by list
//! index, so references stay correct while the list is reshaped. Vertex
//! operations replace the outline vectors wholesale instead of mutating
//! them in place; a render snapshot must never alias a buffer that is
//! still being mutated.

use shared::{GeoPoint, ZoneRecord};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};
use crate::map::MarkerHandle;

/// Stable zone identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId(Uuid);

impl ZoneId {
    pub(crate) fn allocate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A delivery zone as the editor sees it.
///
/// `coordinates` and `points` are kept 1:1; every coordinate mutation
/// mutates the matching marker handle entry.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub price: f64,
    /// Polygon outline; insertion order defines edge connectivity
    pub coordinates: Vec<GeoPoint>,
    /// Marker handles, lockstep with `coordinates`
    pub points: Vec<MarkerHandle>,
    /// Set once the zone has exited creation/editing with a valid shape
    pub completed: bool,
}

impl Zone {
    /// Persisted view of the zone, without map-engine state
    pub fn record(&self) -> ZoneRecord {
        ZoneRecord {
            name: self.name.clone(),
            coordinates: self.coordinates.clone(),
            price: self.price,
        }
    }
}

/// Outcome of a vertex deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexDeletion {
    /// Vertex removed; the zone still has a usable outline
    VertexRemoved,
    /// The outline fell below 3 points and the whole zone was removed
    ZoneRemoved,
}

/// Ordered zone collection
#[derive(Debug, Default)]
pub struct ZoneStore {
    zones: Vec<Zone>,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn last(&self) -> Option<&Zone> {
        self.zones.last()
    }

    /// Locate the zone and vertex index owning a marker handle
    pub fn find_by_marker(&self, marker: MarkerHandle) -> Option<(ZoneId, usize)> {
        self.zones.iter().find_map(|zone| {
            zone.points
                .iter()
                .position(|&point| point == marker)
                .map(|index| (zone.id, index))
        })
    }

    /// Open a new draft zone seeded with the default price and a generated
    /// name (`Зона N`).
    pub fn open_draft(&mut self, default_price: f64) -> ZoneId {
        let zone = Zone {
            id: ZoneId::allocate(),
            name: format!("Зона {}", self.zones.len() + 1),
            price: default_price,
            coordinates: Vec::new(),
            points: Vec::new(),
            completed: false,
        };
        let id = zone.id;
        tracing::debug!(name = %zone.name, "draft zone opened");
        self.zones.push(zone);
        id
    }

    /// Append a vertex to the zone currently being drawn.
    ///
    /// Opens a fresh draft first when the store is empty or the tail zone
    /// is already completed; by construction the single uncompleted zone is
    /// always at the tail.
    pub fn append_vertex(
        &mut self,
        coord: GeoPoint,
        marker: MarkerHandle,
        default_price: f64,
    ) -> ZoneId {
        let index = match self.zones.last() {
            Some(zone) if !zone.completed => self.zones.len() - 1,
            _ => {
                self.open_draft(default_price);
                self.zones.len() - 1
            }
        };
        let zone = &mut self.zones[index];

        let mut coordinates = zone.coordinates.clone();
        let mut points = zone.points.clone();
        coordinates.push(coord);
        points.push(marker);
        zone.coordinates = coordinates;
        zone.points = points;
        zone.id
    }

    /// Replace the coordinate at `vertex`; the dragged marker already sits
    /// at the new position, so its handle entry stays.
    pub fn move_vertex(&mut self, id: ZoneId, vertex: usize, coord: GeoPoint) -> EditorResult<()> {
        let zone = self.zone_mut(id)?;
        if vertex >= zone.coordinates.len() {
            return Err(EditorError::StaleZone);
        }
        let mut coordinates = zone.coordinates.clone();
        coordinates[vertex] = coord;
        zone.coordinates = coordinates;
        Ok(())
    }

    /// Remove the coordinate/marker pair at `vertex`.
    ///
    /// A zone whose outline would fall below 3 points is removed from the
    /// store entirely rather than left in an invalid shape.
    pub fn delete_vertex(&mut self, id: ZoneId, vertex: usize) -> EditorResult<VertexDeletion> {
        let index = self
            .zones
            .iter()
            .position(|zone| zone.id == id)
            .ok_or(EditorError::StaleZone)?;
        if vertex >= self.zones[index].coordinates.len() {
            return Err(EditorError::StaleZone);
        }

        let mut coordinates = self.zones[index].coordinates.clone();
        let mut points = self.zones[index].points.clone();
        coordinates.remove(vertex);
        points.remove(vertex);

        if coordinates.len() < 3 {
            let removed = self.zones.remove(index);
            tracing::info!(zone = %removed.name, "zone dropped below 3 points and was removed");
            return Ok(VertexDeletion::ZoneRemoved);
        }

        let zone = &mut self.zones[index];
        zone.coordinates = coordinates;
        zone.points = points;
        Ok(VertexDeletion::VertexRemoved)
    }

    /// Append a vertex at the end of a specific zone's outline; the
    /// double-click path, routed only to the zone under active edit.
    pub fn insert_vertex_at_end(
        &mut self,
        id: ZoneId,
        coord: GeoPoint,
        marker: MarkerHandle,
    ) -> EditorResult<()> {
        let zone = self.zone_mut(id)?;
        let mut coordinates = zone.coordinates.clone();
        let mut points = zone.points.clone();
        coordinates.push(coord);
        points.push(marker);
        zone.coordinates = coordinates;
        zone.points = points;
        Ok(())
    }

    /// Update the operator-editable fields of a zone
    pub fn update_meta(&mut self, id: ZoneId, name: impl Into<String>, price: f64) -> EditorResult<()> {
        let zone = self.zone_mut(id)?;
        zone.name = name.into();
        zone.price = price;
        Ok(())
    }

    pub fn mark_completed(&mut self, id: ZoneId) -> EditorResult<()> {
        let zone = self.zone_mut(id)?;
        zone.completed = true;
        Ok(())
    }

    /// Remove a zone outright; returns false when the id is already gone
    pub fn remove_zone(&mut self, id: ZoneId) -> bool {
        let before = self.zones.len();
        self.zones.retain(|zone| zone.id != id);
        self.zones.len() != before
    }

    /// Append an already completed zone (import / hydration path).
    ///
    /// Taking coordinate/marker pairs keeps the lockstep invariant
    /// structural instead of relying on the caller to line up two vectors.
    pub fn push_completed(
        &mut self,
        name: impl Into<String>,
        price: f64,
        vertices: Vec<(GeoPoint, MarkerHandle)>,
    ) -> ZoneId {
        let (coordinates, points) = vertices.into_iter().unzip();
        let zone = Zone {
            id: ZoneId::allocate(),
            name: name.into(),
            price,
            coordinates,
            points,
            completed: true,
        };
        let id = zone.id;
        self.zones.push(zone);
        id
    }

    /// Persisted view of every completed zone, in store order.
    ///
    /// An in-progress draft is committed by finishing creation, never by a
    /// concurrent commit of the rest of the store.
    pub fn records(&self) -> Vec<ZoneRecord> {
        self.zones
            .iter()
            .filter(|zone| zone.completed)
            .map(Zone::record)
            .collect()
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    fn zone_mut(&mut self, id: ZoneId) -> EditorResult<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|zone| zone.id == id)
            .ok_or(EditorError::StaleZone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> MarkerHandle {
        MarkerHandle::allocate()
    }

    fn store_with_completed_zone() -> (ZoneStore, ZoneId) {
        let mut store = ZoneStore::new();
        let id = store.push_completed(
            "Центр",
            150.0,
            vec![
                (GeoPoint::new(56.10, 40.30), marker()),
                (GeoPoint::new(56.11, 40.31), marker()),
                (GeoPoint::new(56.12, 40.30), marker()),
            ],
        );
        (store, id)
    }

    fn assert_lockstep(store: &ZoneStore) {
        for zone in store.zones() {
            assert_eq!(zone.coordinates.len(), zone.points.len());
        }
    }

    #[test]
    fn test_append_opens_draft_when_empty() {
        let mut store = ZoneStore::new();
        let id = store.append_vertex(GeoPoint::new(56.10, 40.30), marker(), 100.0);

        let zone = store.get(id).unwrap();
        assert_eq!(zone.name, "Зона 1");
        assert_eq!(zone.price, 100.0);
        assert!(!zone.completed);
        assert_eq!(zone.coordinates.len(), 1);
        assert_lockstep(&store);
    }

    #[test]
    fn test_append_opens_draft_after_completed_tail() {
        let (mut store, first) = store_with_completed_zone();
        let second = store.append_vertex(GeoPoint::new(56.20, 40.40), marker(), 120.0);

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(second).unwrap().name, "Зона 2");
        assert_lockstep(&store);
    }

    #[test]
    fn test_append_extends_open_draft() {
        let mut store = ZoneStore::new();
        let a = store.append_vertex(GeoPoint::new(56.10, 40.30), marker(), 100.0);
        let b = store.append_vertex(GeoPoint::new(56.11, 40.31), marker(), 100.0);

        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(a).unwrap().coordinates.len(), 2);
        assert_lockstep(&store);
    }

    #[test]
    fn test_move_vertex_keeps_marker_pairing() {
        let (mut store, id) = store_with_completed_zone();
        let markers_before = store.get(id).unwrap().points.clone();

        store
            .move_vertex(id, 1, GeoPoint::new(56.115, 40.315))
            .unwrap();

        let zone = store.get(id).unwrap();
        assert_eq!(zone.coordinates[1], GeoPoint::new(56.115, 40.315));
        assert_eq!(zone.points, markers_before);
        assert_lockstep(&store);
    }

    #[test]
    fn test_move_vertex_matches_by_id_under_reshaping() {
        let (mut store, id) = store_with_completed_zone();
        // a second zone ahead of the first in the list order
        let other = store.push_completed(
            "Зона 2",
            120.0,
            vec![
                (GeoPoint::new(56.20, 40.40), marker()),
                (GeoPoint::new(56.21, 40.41), marker()),
                (GeoPoint::new(56.22, 40.40), marker()),
            ],
        );
        store.remove_zone(id);

        // the surviving zone is still addressable by its id after the
        // list shifted underneath it
        store.move_vertex(other, 0, GeoPoint::new(56.205, 40.405)).unwrap();
        assert_eq!(
            store.get(other).unwrap().coordinates[0],
            GeoPoint::new(56.205, 40.405)
        );
        assert!(matches!(
            store.move_vertex(id, 0, GeoPoint::new(0.0, 0.0)),
            Err(EditorError::StaleZone)
        ));
    }

    #[test]
    fn test_delete_vertex_keeps_zone_at_three_or_more() {
        let mut store = ZoneStore::new();
        let id = store.push_completed(
            "Зона 1",
            100.0,
            vec![
                (GeoPoint::new(56.10, 40.30), marker()),
                (GeoPoint::new(56.11, 40.31), marker()),
                (GeoPoint::new(56.12, 40.30), marker()),
                (GeoPoint::new(56.11, 40.29), marker()),
            ],
        );

        let outcome = store.delete_vertex(id, 3).unwrap();
        assert_eq!(outcome, VertexDeletion::VertexRemoved);
        assert_eq!(store.get(id).unwrap().coordinates.len(), 3);
        assert_lockstep(&store);
    }

    #[test]
    fn test_delete_vertex_below_three_removes_zone() {
        let (mut store, id) = store_with_completed_zone();

        let outcome = store.delete_vertex(id, 0).unwrap();
        assert_eq!(outcome, VertexDeletion::ZoneRemoved);
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_lockstep_holds_over_mixed_sequence() {
        let mut store = ZoneStore::new();
        let id = store.append_vertex(GeoPoint::new(56.10, 40.30), marker(), 100.0);
        store.append_vertex(GeoPoint::new(56.11, 40.31), marker(), 100.0);
        store.append_vertex(GeoPoint::new(56.12, 40.30), marker(), 100.0);
        store.append_vertex(GeoPoint::new(56.11, 40.29), marker(), 100.0);
        store.move_vertex(id, 2, GeoPoint::new(56.125, 40.305)).unwrap();
        store.delete_vertex(id, 0).unwrap();
        store
            .insert_vertex_at_end(id, GeoPoint::new(56.13, 40.28), marker())
            .unwrap();

        assert_lockstep(&store);
        assert_eq!(store.get(id).unwrap().coordinates.len(), 4);
    }

    #[test]
    fn test_find_by_marker() {
        let mut store = ZoneStore::new();
        let handle = marker();
        let id = store.append_vertex(GeoPoint::new(56.10, 40.30), handle, 100.0);
        store.append_vertex(GeoPoint::new(56.11, 40.31), marker(), 100.0);

        assert_eq!(store.find_by_marker(handle), Some((id, 0)));
        assert_eq!(store.find_by_marker(marker()), None);
    }

    #[test]
    fn test_records_skip_open_draft() {
        let (mut store, _) = store_with_completed_zone();
        store.append_vertex(GeoPoint::new(56.20, 40.40), marker(), 100.0);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Центр");
        assert_eq!(records[0].coordinates.len(), 3);
    }
}
