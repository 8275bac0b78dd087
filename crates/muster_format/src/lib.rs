//! Outcome messages and column-aligned tables for Muster.
//!
//! This crate provides:
//! - [`outcome`] - User-facing text for resolution outcomes
//! - [`table`] - Column-aligned listings of records
//!
//! Everything here is a pure function of its input: the same records and
//! columns always render the same string.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod outcome;
pub mod table;

pub use outcome::{ambiguous_message, format_outcome, not_found_message, outcome_to_result};
pub use table::{Column, Table, format_list};
