//! Map collaborator boundary
//!
//! The capability set the editor requires from a map engine, plus a
//! headless in-memory adapter used by tests and demos.

mod adapter;
mod headless;

pub use adapter::{
    EditorEvent, MapAdapter, MarkerHandle, MarkerStyle, PolygonHandle, PolygonStyle,
    PolylineHandle, SurfaceHandle, bounding_box,
};
pub use headless::HeadlessMap;
