//! Reusable UI components of the map page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the `MapSession` from context, render from its
//! `MapViewState` and forward raw user intents as engine events. None of them
//! derives view state on its own.

pub mod details_sheet;
pub mod filter_chips;
pub mod map_host;
pub mod search_bar;
pub mod search_sheet;
pub mod sheet;
pub mod upload_button;
