//! Repository layer.
//!
//! # Responsibility
//! - Define the persistence contract used by resolution and services.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to DB transport errors.

pub mod catalogue_repo;
