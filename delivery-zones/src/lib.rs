//! Delivery-zone geometry editor
//!
//! Headless, map-engine-agnostic core of the delivery configuration page:
//! an operator draws, edits, imports, exports and persists polygonal
//! delivery zones, each carrying a name and a flat price.
//!
//! # Module structure
//!
//! ```text
//! delivery-zones/src/
//! ├── coords.rs      # lat/lng ↔ lng/lat interchange codec
//! ├── validate.rs    # zone and settings validation
//! ├── store.rs       # zone collection + vertex mutation protocol
//! ├── mode.rs        # Idle / Creating / Editing state machine
//! ├── map/           # map adapter capability set + headless adapter
//! ├── interchange.rs # GeoJSON import/export, atomic file save
//! ├── sync.rs        # settings draft/snapshot + persistence client
//! └── editor.rs      # orchestrator wiring all of the above
//! ```
//!
//! The map engine is a collaborator, not a dependency: a concrete
//! integration implements [`MapAdapter`] and translates vendor callbacks
//! into [`EditorEvent`] values. Everything else runs without any rendering
//! surface.

pub mod coords;
pub mod editor;
pub mod error;
pub mod interchange;
pub mod map;
pub mod mode;
pub mod store;
pub mod sync;
pub mod validate;

// Re-export public types
pub use editor::{DEFAULT_CENTER, DEFAULT_ZOOM, ZoneEditor};
pub use error::{EditorError, EditorResult};
pub use map::{
    EditorEvent, HeadlessMap, MapAdapter, MarkerHandle, MarkerStyle, PolygonHandle, PolygonStyle,
    PolylineHandle, SurfaceHandle,
};
pub use mode::{EditorMode, ModeController};
pub use store::{VertexDeletion, Zone, ZoneId, ZoneStore};
pub use sync::{HttpSettingsApi, SettingsApi, SettingsSync, SyncConfig};
