//! View-state engine for the givebox map.
//!
//! This crate reconciles four independently changing inputs (the fetched point
//! list, the route, the search query and the selected point's detail record)
//! into one consistent rendering state. It is runtime agnostic: every network
//! suspension leaves the engine as an [`engine::Effect::Request`], the host
//! resolves it against a [`gateway::Gateway`], and the outcome comes back as an
//! [`engine::Event`]. Stale outcomes are rejected by generation tickets.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event reducer, effects, and the shell-facing [`engine::ViewSnapshot`] |
//! | [`sync`] | Pure derivation of visible points, selection and viewport target |
//! | [`search`] | Search session state machine |
//! | [`detail`] | Selected-point detail slot with skip-if-busy polling |
//! | [`upload`] | Image upload control, isolated from view state |
//! | [`poll`] | Supervised periodic task bound to the selection lifetime |
//! | [`generation`] | Per-slot generation tickets |
//! | [`route`] | Navigable path parsing and rendering |
//! | [`viewport`] | Geographic bounds, viewport commands and the map widget seam |
//! | [`category`] | Known category tags and their chip descriptors |
//! | [`gateway`] | Data gateway trait, backend record adapter and implementations |
//! | [`model`] | Point, detail and summary records |
//! | [`config`] | Runtime configuration |
//! | [`error`] | Error types |

pub mod category;
pub mod config;
pub mod detail;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod generation;
pub mod model;
pub mod poll;
pub mod route;
pub mod search;
pub mod sync;
pub mod upload;
pub mod viewport;
