//! Core types and utilities for checkrun
//!
//! Holds the data model shared by the reconciler and provider crates: the
//! triggering [`RunEvent`], the per-call [`StatusRequest`], the [`RunObject`]
//! whose metadata carries the persisted check id, and the [`CheckHandle`]
//! naming a check on the hosting service.

pub mod config;
pub mod error;
pub mod event;
pub mod run;
pub mod status;
pub mod tracing;

pub use config::{PacOptions, Settings};
pub use error::{Error, Result};
pub use event::{EventKind, RunEvent};
pub use run::{CancelState, MetadataPatch, RunObject};
pub use status::{Outcome, Phase, StatusRequest};

/// Opaque handle for a check on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckHandle {
    /// Provider-specific identifier.
    pub id: u64,
    /// External id correlating the check with a run name.
    pub external_id: String,
}

impl CheckHandle {
    /// Create a new check handle.
    #[must_use]
    pub fn new(id: u64, external_id: impl Into<String>) -> Self {
        Self {
            id,
            external_id: external_id.into(),
        }
    }
}
