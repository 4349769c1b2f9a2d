//! Integration tests for Quotes-Harvest
//!
//! These tests use wiremock to serve a fake quotes listing and drive the full
//! fetch, parse and CSV cycle end-to-end.

mod harvest_tests;
