//! Catalogue domain model.
//!
//! # Responsibility
//! - Define the container and item records handled by core logic.
//! - Own entity identity and lookup-token classification.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - Returned records are detached copies with no handle back to the store.

pub mod container;
pub mod identity;
pub mod item;
pub mod listing;
