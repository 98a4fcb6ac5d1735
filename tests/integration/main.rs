//! Integration tests for the corpus builder
//!
//! These tests run against temporary storage roots and exercise the store and
//! the page pipeline end-to-end, including concurrent writers and restarts.

mod pipeline_tests;
mod store_tests;
