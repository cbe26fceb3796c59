//! End-to-end Scenarios for recast
//!
//! Exercises the facade crate the way an application would: records declared
//! with `record_schema!`, change sets built by typed constant or by name, and
//! copies produced through the orchestrator.
//!
//! ## Modules
//!
//! - `change_sets`: merge, reuse and identity behavior
//! - `resolution`: name-keyed building, type checks, backing slots
//! - `validation`: validator contract and rejections
//! - `properties`: proptest properties over random change sets
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test scenarios
//! cargo test --test scenarios properties:: -- --nocapture
//! ```

mod records;

mod properties;
mod resolution;

/// Route engine trace events to the test output; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
