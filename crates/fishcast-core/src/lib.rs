//! Core scoring model for fishing favorability forecasts
//!
//! This crate provides the fundamental data structures and the rule-based
//! scoring doctrine: point scorers for individual environmental signals,
//! the weighted index aggregation, series scoring and ranking.

pub mod error;
pub mod index;
pub mod moon;
pub mod scoring;
pub mod series;
pub mod source;
pub mod types;

pub use error::*;
pub use index::*;
pub use moon::*;
pub use scoring::*;
pub use series::*;
pub use source::*;
pub use types::*;
