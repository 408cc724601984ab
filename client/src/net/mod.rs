//! Networking for the map shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the engine's `Gateway` over the browser fetch API.

pub mod api;
