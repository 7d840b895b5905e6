//! # Core Module
//!
//! The stateless foundation of the library: data models, tree navigation, sequence
//! algorithms, and record I/O. Nothing in this layer decides which entity or ligand is
//! relevant; it only provides the pieces the [`crate::engine`] combines.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Amino acids, entity views, requests and resolved entries
//! - **Tree Navigation** ([`tree`]) - Path resolution through heterogeneous result trees
//!   with an explicit ambiguity policy
//! - **Sequence Algorithms** ([`sequence`]) - Longest-common-subsequence similarity
//! - **Record I/O** ([`io`]) - Result documents (JSON), request lists (CSV), and the
//!   schema field paths
//!
//! All functions here are pure apart from file I/O in [`io`], and are safe to call from
//! any number of threads at once.

pub mod io;
pub mod models;
pub mod sequence;
pub mod tree;
