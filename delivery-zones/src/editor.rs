//! Zone editor orchestrator
//!
//! Ties the zone store, the mode controller, the settings draft and the
//! map collaborator together. Every map interaction enters through
//! [`ZoneEditor::handle_event`]; the mode controller decides whether the
//! event is legal in the current state, the store is mutated, and the
//! store is re-rendered onto the map.

use std::path::Path;

use shared::GeoPoint;

use crate::error::{EditorError, EditorResult};
use crate::interchange;
use crate::map::{EditorEvent, MapAdapter, MarkerHandle, MarkerStyle, PolygonStyle, SurfaceHandle};
use crate::mode::{EditorMode, ModeController};
use crate::store::{VertexDeletion, Zone, ZoneId, ZoneStore};
use crate::sync::{SettingsApi, SettingsSync};
use crate::validate::validate_zone;

/// Default map viewport, restored after creation/editing finishes
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 56.129057, lng: 40.406635 };
pub const DEFAULT_ZOOM: u8 = 12;

/// The delivery-zone editor session
#[derive(Debug, Default)]
pub struct ZoneEditor {
    store: ZoneStore,
    mode: ModeController,
    settings: SettingsSync,
    /// Handles currently attached to the map surface, detached on re-render
    attached: Vec<SurfaceHandle>,
}

impl ZoneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Accessors ==========

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub fn zones(&self) -> &[Zone] {
        self.store.zones()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode.mode()
    }

    pub fn settings(&self) -> &SettingsSync {
        &self.settings
    }

    /// Draft settings access for the scalar form fields
    pub fn settings_mut(&mut self) -> &mut SettingsSync {
        &mut self.settings
    }

    // ========== Mode transitions ==========

    /// Start drawing a new zone. No-op (returning false) while another
    /// zone is active.
    pub fn start_creating(&mut self) -> bool {
        if !self.mode.begin_creating() {
            return false;
        }
        let default_price = self.settings.draft().default_price;
        let id = self.store.open_draft(default_price);
        // the page shell scrolls the zone list to the new row
        tracing::debug!(?id, "zone creation started");
        true
    }

    /// Validate and complete the zone being drawn.
    ///
    /// On a validation failure the mode stays `Creating` and the draft is
    /// left untouched for correction.
    pub fn finish_creating(&mut self, map: &mut impl MapAdapter) -> EditorResult<()> {
        if !self.mode.is_creating() {
            tracing::debug!("finish-creation ignored outside creation mode");
            return Ok(());
        }

        let draft = self.store.last().filter(|zone| !zone.completed);
        let violations = validate_zone(draft);
        if !violations.is_empty() {
            return Err(EditorError::Validation(violations));
        }
        let Some(id) = draft.map(|zone| zone.id) else {
            return Err(EditorError::StaleZone);
        };

        self.store.mark_completed(id)?;
        self.mode.finish_creating();
        self.commit_zones();
        map.set_center(DEFAULT_CENTER);
        map.set_zoom(DEFAULT_ZOOM);
        self.render(map);
        tracing::info!(?id, "zone creation finished");
        Ok(())
    }

    /// Start reshaping an existing zone; fits the viewport to the zone.
    /// No-op (returning false) while another zone is active.
    pub fn start_editing(&mut self, id: ZoneId, map: &mut impl MapAdapter) -> bool {
        let Some(zone) = self.store.get(id) else {
            tracing::warn!(?id, "edit requested for a zone that no longer exists");
            return false;
        };
        let outline = zone.coordinates.clone();
        if !self.mode.begin_editing(id) {
            return false;
        }
        map.fit_bounds(&outline);
        self.render(map);
        tracing::debug!(?id, "zone editing started");
        true
    }

    /// Validate and commit the edited zone, then reset the viewport.
    pub fn finish_editing(&mut self, map: &mut impl MapAdapter) -> EditorResult<()> {
        let Some(id) = self.mode.editing_id() else {
            tracing::debug!("finish-editing ignored outside edit mode");
            return Ok(());
        };

        let violations = validate_zone(self.store.get(id));
        if !violations.is_empty() {
            return Err(EditorError::Validation(violations));
        }

        self.mode.finish_editing();
        self.commit_zones();
        map.set_center(DEFAULT_CENTER);
        map.set_zoom(DEFAULT_ZOOM);
        self.render(map);
        tracing::info!(?id, "zone editing finished");
        Ok(())
    }

    // ========== Zone list actions ==========

    /// Explicitly delete a zone from the list.
    pub fn remove_zone(&mut self, id: ZoneId, map: &mut impl MapAdapter) -> bool {
        if !self.store.remove_zone(id) {
            return false;
        }
        if self.mode.zone_removed(id) {
            tracing::debug!(?id, "edited zone deleted, mode reset");
        }
        self.commit_zones();
        self.render(map);
        true
    }

    /// Update a zone's operator-editable fields (list row inputs)
    pub fn update_zone_meta(
        &mut self,
        id: ZoneId,
        name: impl Into<String>,
        price: f64,
    ) -> EditorResult<()> {
        self.store.update_meta(id, name, price)
    }

    // ========== Map events ==========

    pub fn handle_event(
        &mut self,
        event: EditorEvent,
        map: &mut impl MapAdapter,
    ) -> EditorResult<()> {
        match event {
            EditorEvent::MapClick { coord } => self.handle_map_click(coord, map),
            EditorEvent::MapDoubleClick { coord } => self.handle_double_click(coord, map),
            EditorEvent::VertexDragEnd { marker, coord } => {
                self.handle_drag_end(marker, coord, map)
            }
            EditorEvent::VertexContextMenu { marker } => self.handle_context_menu(marker, map),
        }
    }

    /// Click appends a vertex to the zone being drawn
    fn handle_map_click(
        &mut self,
        coord: GeoPoint,
        map: &mut impl MapAdapter,
    ) -> EditorResult<()> {
        if !self.mode.is_creating() {
            tracing::debug!("map click ignored outside creation mode");
            return Ok(());
        }
        let marker = map.create_marker(coord, &MarkerStyle::default());
        let default_price = self.settings.draft().default_price;
        self.store.append_vertex(coord, marker, default_price);
        self.render(map);
        Ok(())
    }

    /// Double click appends a vertex to the zone under edit
    fn handle_double_click(
        &mut self,
        coord: GeoPoint,
        map: &mut impl MapAdapter,
    ) -> EditorResult<()> {
        let Some(id) = self.mode.editing_id() else {
            tracing::debug!("double click ignored outside edit mode");
            return Ok(());
        };
        let marker = map.create_marker(coord, &MarkerStyle::default());
        self.store.insert_vertex_at_end(id, coord, marker)?;
        self.render(map);
        Ok(())
    }

    /// Drag end moves the vertex under the dragged marker
    fn handle_drag_end(
        &mut self,
        marker: MarkerHandle,
        coord: GeoPoint,
        map: &mut impl MapAdapter,
    ) -> EditorResult<()> {
        let Some((id, vertex)) = self.store.find_by_marker(marker) else {
            tracing::warn!("drag event for an unknown marker");
            return Ok(());
        };
        if !self.is_active(id) {
            tracing::debug!(?id, "drag ignored for an inactive zone");
            return Ok(());
        }
        self.store.move_vertex(id, vertex, coord)?;
        self.render(map);
        Ok(())
    }

    /// Context menu deletes the vertex under the marker
    fn handle_context_menu(
        &mut self,
        marker: MarkerHandle,
        map: &mut impl MapAdapter,
    ) -> EditorResult<()> {
        let Some((id, vertex)) = self.store.find_by_marker(marker) else {
            tracing::warn!("context menu for an unknown marker");
            return Ok(());
        };
        if !self.is_active(id) {
            tracing::debug!(?id, "vertex deletion ignored for an inactive zone");
            return Ok(());
        }
        if self.store.delete_vertex(id, vertex)? == VertexDeletion::ZoneRemoved {
            if self.mode.zone_removed(id) {
                tracing::info!(?id, "edited zone fell apart, mode reset");
            }
            self.commit_zones();
        }
        self.render(map);
        Ok(())
    }

    // ========== Import / export ==========

    /// Parse an interchange document and append its zones to the store.
    ///
    /// Returns the number of appended zones; on any error the store is
    /// left untouched.
    pub fn import_document(
        &mut self,
        text: &str,
        map: &mut impl MapAdapter,
    ) -> EditorResult<usize> {
        let default_price = self.settings.draft().default_price;
        let imported = interchange::import_document(text, default_price, self.store.len())?;

        let count = imported.len();
        for zone in imported {
            let vertices = zone
                .coordinates
                .iter()
                .map(|&coord| (coord, map.create_marker(coord, &MarkerStyle::default())))
                .collect();
            self.store.push_completed(zone.name, zone.price, vertices);
        }
        self.commit_zones();
        self.render(map);
        tracing::info!(count, "zones imported");
        Ok(count)
    }

    /// Serialize the store into an interchange document
    pub fn export_document(&self) -> EditorResult<String> {
        interchange::export_document(self.store.zones())
    }

    /// Export the store to a file; `None` destination means the operator
    /// cancelled the save dialog.
    pub fn export_to_file(&self, destination: Option<&Path>) -> EditorResult<()> {
        let document = self.export_document()?;
        interchange::save_export(&document, destination)
    }

    // ========== Persistence ==========

    /// Load settings and hydrate the store, materializing marker handles
    /// for every persisted zone.
    pub async fn load(&mut self, api: &impl SettingsApi, map: &mut impl MapAdapter) {
        self.settings.load(api).await;
        let records = self.settings.draft().zones.clone();

        self.store.clear();
        for record in records {
            let vertices = record
                .coordinates
                .iter()
                .map(|&coord| (coord, map.create_marker(coord, &MarkerStyle::default())))
                .collect();
            self.store.push_completed(record.name, record.price, vertices);
        }
        self.render(map);
    }

    /// Persist the draft settings; see [`SettingsSync::save`]
    pub async fn save(&mut self, api: &impl SettingsApi) -> EditorResult<bool> {
        self.settings.save(api).await
    }

    // ========== Rendering ==========

    /// Re-render the whole store onto the map.
    ///
    /// Previously attached handles are detached first, so repeated renders
    /// never leave duplicates behind. Only the active zone exposes its
    /// vertex markers (plus an open outline); every other zone with a
    /// complete shape renders as a filled polygon.
    pub fn render(&mut self, map: &mut impl MapAdapter) {
        for handle in self.attached.drain(..) {
            map.detach(handle);
        }

        let active = self.active_zone_id();
        let mut attached = Vec::new();
        for zone in self.store.zones() {
            if active == Some(zone.id) {
                for &marker in &zone.points {
                    map.attach(SurfaceHandle::Marker(marker));
                    attached.push(SurfaceHandle::Marker(marker));
                }
                if zone.coordinates.len() >= 2 {
                    let line = map.create_polyline(&zone.coordinates);
                    map.attach(SurfaceHandle::Polyline(line));
                    attached.push(SurfaceHandle::Polyline(line));
                }
            } else if zone.completed && zone.coordinates.len() >= 3 {
                let polygon = map.create_polygon(&zone.coordinates, &PolygonStyle::default());
                map.attach(SurfaceHandle::Polygon(polygon));
                attached.push(SurfaceHandle::Polygon(polygon));
            }
        }
        self.attached = attached;
    }

    // ========== Internals ==========

    /// Persisted view of the store into the settings draft
    fn commit_zones(&mut self) {
        self.settings.draft_mut().zones = self.store.records();
    }

    /// Whether a zone is the one currently eligible for vertex mutation
    fn is_active(&self, id: ZoneId) -> bool {
        self.active_zone_id() == Some(id)
    }

    fn active_zone_id(&self) -> Option<ZoneId> {
        match self.mode.mode() {
            EditorMode::Creating => self
                .store
                .last()
                .filter(|zone| !zone.completed)
                .map(|zone| zone.id),
            EditorMode::Editing(id) => Some(id),
            EditorMode::Idle => None,
        }
    }
}
