//! Browser helpers for the map page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `leaflet` wraps the map widget behind the engine's `MapWidget` seam and
//! `path` converts between router paths and engine routes.

pub mod leaflet;
pub mod path;
