//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate identity, resolution and repository calls into the
//!   operations the CLI exposes.
//! - Keep callers decoupled from storage details.

pub mod catalogue_service;
