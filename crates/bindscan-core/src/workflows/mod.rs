//! # Workflows Module
//!
//! High-level entry points that run the complete resolution pipeline.
//!
//! ## Overview
//!
//! A workflow takes parsed result documents and caller requests and returns finished
//! [`ResolvedEntry`](crate::core::models::entry::ResolvedEntry) values. Parameter
//! validation happens once, in the configuration builder; progress is reported through
//! the engine's [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! ## Architecture
//!
//! - **Entry Resolution** ([`resolve`]) - Subject ligand, entity selection, sequence,
//!   alignment, binding sites, cofactors and optional control mutants for one entry.
//! - **Batch Resolution** ([`batch`]) - Ordered fan-out over many entries in which one
//!   failing entry is recorded and never aborts the rest.

pub mod batch;
pub mod resolve;
