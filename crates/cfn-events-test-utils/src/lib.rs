//! Shared test utilities for cfn-events
//!
//! This crate provides common test helpers that can be used across
//! multiple test modules without circular dependencies.
//!
//! ## Modules
//!
//! - [`events`]: Lifecycle event fixtures
//! - [`fakes`]: Deterministic suffix generator and recording error reporter

pub mod events;
pub mod fakes;

// Re-export commonly used items
pub use events::{EventBuilder, TEST_STACK_ID, TEST_STACK_NAME, test_context};
pub use fakes::{FIXED_SUFFIX, FixedSuffix, RecordingReporter};
