//! Integration tests for Layer 3: Console
//!
//! Tests for the standard commands over the demo catalog, the test harness,
//! batch input, and snapshots.

mod batch;
mod session;
