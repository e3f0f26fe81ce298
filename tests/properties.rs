//! Property tests for Skylift.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "planning is deterministic".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/cache_policy.rs"]
mod cache_policy;

#[path = "properties/object_path.rs"]
mod object_path;

#[path = "properties/planner.rs"]
mod planner;
