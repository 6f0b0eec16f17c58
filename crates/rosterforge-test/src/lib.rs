//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides roster builders and generators for testing.
//! It depends on `rosterforge-core` only, so every other crate can use it.
//!
//! - [`time`] - date and timestamp shorthands
//! - [`builder`] - hand-built rosters for scenario tests
//! - [`random`] - seeded random rosters for consistency checks
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use rosterforge_test::{at, date, RosterBuilder};
//! ```

pub mod builder;
pub mod random;
pub mod time;

pub use builder::RosterBuilder;
pub use random::{random_schedule, RandomRosterConfig};
pub use time::{at, at_hm, date, DRAFT_START};
