//! Single test binary entry point.
//!
//! All tests compile into one binary to keep linking to a single pass.
//!
//! Structure:
//! - helpers: builders and fakes shared by the tests
//! - integration: multi-step editor and navigation workflows
//! - unit: single-module tests

mod helpers;
mod integration;
