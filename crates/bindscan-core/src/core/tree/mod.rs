//! # Tree Module
//!
//! Read-only navigation of deserialized query results. Results arrive as
//! `serde_json::Value` trees whose shape varies between records: a field that is
//! usually a single object may be a list, a list may be empty, and any node may be
//! `null`. [`path::PathResolver`] gives every consumer the same policy for these
//! cases instead of ad-hoc `get` chains.

pub mod path;
