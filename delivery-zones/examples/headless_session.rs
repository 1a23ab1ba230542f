//! Headless editor session demo
//!
//! Draws a delivery zone without any map on screen, completes it, and
//! prints the interchange document.
//!
//! ```bash
//! cargo run --example headless_session
//! ```

use anyhow::Result;
use delivery_zones::{EditorEvent, HeadlessMap, ZoneEditor};
use shared::GeoPoint;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut editor = ZoneEditor::new();
    let mut map = HeadlessMap::new();
    editor.settings_mut().draft_mut().default_price = 100.0;

    editor.start_creating();
    for (lat, lng) in [(56.10, 40.30), (56.11, 40.31), (56.12, 40.30)] {
        editor.handle_event(
            EditorEvent::MapClick { coord: GeoPoint::new(lat, lng) },
            &mut map,
        )?;
    }

    let id = editor.zones()[0].id;
    editor.update_zone_meta(id, "Центр", 150.0)?;
    editor.finish_creating(&mut map)?;

    println!("{}", editor.export_document()?);
    Ok(())
}
