//! Match classification, priority-tier resolution, and record filtering.
//!
//! Turns a free-text query into a single record, a "no match", or an
//! ambiguity report, by scanning a snapshot once and walking a fixed cascade
//! of match tiers.
//!
//! # Architecture
//!
//! ```text
//! "lord_1_1"
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   CLASSIFIER    │  → IdExact / IdPartial / NameExact / NamePrefix / NameSubstring
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   RESOLVER      │  → Found(lord_1_1) | NotFound | Ambiguous([..], tier)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`classify`] - Single-pass grouping of records by how they match a query
//! - [`resolve`] - The tier cascade and its outcome type
//! - [`filter`] - Listing queries (text + tags + ordering)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod filter;
pub mod resolve;

pub use classify::{MatchSet, classify};
pub use filter::{RecordQuery, SortKey};
pub use resolve::{Ambiguity, ResolutionOutcome, Tier, resolve, resolve_query};
