//! # Engine Module
//!
//! This module implements the resolution engine of BindScan: the components that turn a
//! raw structure-database result into a focused description of one polymer entity and
//! its ligand binding site.
//!
//! ## Overview
//!
//! A result document describes every entity of a deposition. The engine picks the one
//! entity the caller cares about and reads the residues annotated as ligand contacts.
//! Control sequences for binding experiments are derived from those positions. Each component is a
//! small, pure value type; none of them keeps state between calls.
//!
//! ## Architecture
//!
//! - **Entity Matching** ([`matcher`]) - Closed set of selection strategies (exact id,
//!   ligand subject, first entity, sequence similarity) parsed from user-facing names
//! - **Binding Sites** ([`binding_site`]) - Extraction of zero-based contact positions
//!   from ligand-interaction annotations
//! - **Mutation** ([`mutation`]) - Scan, dissimilarity, seeded decoy and homopolymer
//!   variants of a sequence
//! - **Configuration** ([`config`]) - Resolution parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Callback based progress reporting
//! - **Error Handling** ([`error`]) - Resolution errors and their stable kinds
//!
//! ## Key Capabilities
//!
//! - **Deterministic output** given the same document, request and seed
//! - **Advisory reporting** of recoverable data problems alongside each value
//! - **Thread safety** through per-call random generators and borrowed, read-only views

pub mod binding_site;
pub mod config;
pub mod error;
pub mod matcher;
pub mod mutation;
pub mod progress;
