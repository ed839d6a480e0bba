//! Test suite for the block registry
//!
//! Tests are grouped by concern: core types, the rule engine as seen through
//! the registry, registry behavior over the builtin table, end-to-end study
//! flows, and property tests.

#[cfg(test)]
mod core_tests;
