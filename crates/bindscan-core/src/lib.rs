//! # BindScan Core Library
//!
//! Resolution of structure-database query results into the polymer entity, ligand
//! binding site and control sequences needed to set up binding experiments.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Read-only views over result documents (`EntryDocument`,
//!   `PolymerEntity`), the ambiguity-aware `PathResolver`, sequence similarity, and the
//!   record files exchanged with callers.
//!
//! - **[`engine`]: The Logic Core.** Stateless components that act on those views: the
//!   `EntityMatcher` and its strategies, the `BindingSiteExtractor`, and the mutation
//!   generator with its seeded random decoy.
//!
//! - **[`workflows`]: The Public API.** Single-entry resolution and fault-isolated batch
//!   resolution, tying `engine` and `core` together behind one configuration type.

pub mod core;
pub mod engine;
pub mod workflows;
