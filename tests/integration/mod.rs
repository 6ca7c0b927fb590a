//! Integration test suite for anagramator.
//!
//! These tests drive the query pipeline end to end: typed input goes through
//! `update`, the debounce timer, a scripted word source and back into the
//! rendered region.
//!
//! # Test Categories
//!
//! - `pipeline_e2e`: Typing, settling, lookups and the states they produce
//! - `stale_replies`: Out-of-order replies with and without the stale guard
//! - `config_flow`: Config files feeding the pipeline
//!
//! # CI Compatibility
//!
//! The word source is scripted and time is paused, so no request leaves the
//! machine and no test waits on a real clock.


mod config_flow;
mod stale_replies;
