//! Engine behind the planpin viewer: plan-space geometry, auto-placement,
//! the placement store, and the interaction/edit-session state. Everything
//! here is UI-agnostic; the binary wires it to the Slint window.

pub mod autoplace;
pub mod config;
pub mod geometry;
pub mod state;
pub mod store;
