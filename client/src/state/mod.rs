//! Client state for the map page.
//!
//! DESIGN
//! ======
//! `view` is the plain-data mirror of the engine that components render from;
//! `session` owns the engine and runs its effects inside the Leptos runtime.

pub mod session;
pub mod view;
