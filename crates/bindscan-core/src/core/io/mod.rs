//! Provides input/output for the record files the pipeline consumes and produces.
//!
//! Query result documents are JSON (optionally wrapped in a GraphQL response
//! envelope), request lists are CSV. Both go through the [`traits::RecordFile`]
//! interface. The field paths read from result documents are collected in
//! [`schema`].

pub mod document;
pub mod requests;
pub mod schema;
pub mod traits;
