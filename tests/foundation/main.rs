//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Record, EntityIndex, Entry, TagSet, and Error.

mod entries;
