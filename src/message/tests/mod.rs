//! Unit tests for the message module.
//!
//! Tests are organised by component, covering happy paths, rejection
//! paths, and the edge cases of nested payload resolution.

mod mapper_tests;
mod normalizer_tests;
