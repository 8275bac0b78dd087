//! Muster - entity lookup and console tooling for campaign game state
//!
//! This crate re-exports all layers of the Muster system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: muster_console    — Command registry, test harness, catalog host, REPL
//! Layer 2: muster_format     — Outcome messages, column-aligned tables
//! Layer 1: muster_query      — Match classification, resolution cascade, filtering
//! Layer 0: muster_foundation — Core types (Record, Entry, TagSet, Error)
//! ```

pub use muster_console as console;
pub use muster_format as format;
pub use muster_foundation as foundation;
pub use muster_query as query;
