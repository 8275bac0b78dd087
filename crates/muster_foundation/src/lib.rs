//! Core record types, tag sets, and errors for Muster.
//!
//! This crate provides:
//! - [`Record`] - The read-only view every lookup operates on (ID + display name)
//! - [`EntityIndex`] - A point-in-time collection of records
//! - [`Entry`] - The concrete record stored by the console host
//! - [`EntityKind`] - Display names for a record collection
//! - [`TagSet`] - Open-vocabulary categorization tags
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entry;
pub mod error;
pub mod kind;
pub mod record;
pub mod tags;

pub use entry::Entry;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use kind::EntityKind;
pub use record::{EntityIndex, Record};
pub use tags::{Tag, TagMatch, TagSet};
