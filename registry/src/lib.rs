//! Action registry — CRUD layer over the `ecoActions` collection.
//!
//! Creation of pending actions, attachment of completion evidence, and
//! read-back for map/list display. Point and CO₂ figures are derived from the
//! action-type table exactly once, here, at creation.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{ActionDraft, ActionRegistry};
