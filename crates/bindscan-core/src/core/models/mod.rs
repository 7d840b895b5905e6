//! # Core Models Module
//!
//! Data structures shared by every stage of the resolution pipeline.
//!
//! ## Key Components
//!
//! - [`residue`] - The 20 canonical amino acids and their one/three-letter codes
//! - [`entity`] - Read-only views of polymer entities, their instance features, and
//!   non-polymer entities inside a result document
//! - [`entry`] - Requests and the resolved output record, including ligand-interaction
//!   maps, alignment metadata, cofactors, and mutant sets
//! - [`advisory`] - Non-fatal findings carried alongside resolved values
//!
//! Entity views borrow from the document they were taken from and are never mutated;
//! everything in [`entry`] is owned and serializable.

pub mod advisory;
pub mod entity;
pub mod entry;
pub mod residue;
