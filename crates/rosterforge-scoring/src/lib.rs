//! Incremental constraint scoring for RosterForge.
//!
//! This crate provides:
//! - The closed set of rostering constraints ([`Constraint`], [`ConstraintSet`])
//! - Employee and availability indices over a roster ([`RosterIndex`])
//! - An incremental [`ScoreDirector`] answering move deltas without rescanning
//!   every shift
//! - Per-constraint score explanation ([`ScoreAnalysis`])
//!
//! # Architecture
//!
//! Constraints are enum variants rather than trait objects: the director walks
//! a fixed list and every variant is a pure function of the shifts and facts it
//! is handed. Full recomputation goes through the same functions, so the
//! incremental and from-scratch scores can always be compared.

pub mod analysis;
pub mod constraint;
pub mod director;
pub mod index;

pub use analysis::{ConstraintAnalysis, ConstraintMatch, ScoreAnalysis};
pub use constraint::{Constraint, ConstraintScope, ConstraintSet};
pub use director::ScoreDirector;
pub use index::RosterIndex;
