//! # Campaign Rules
//!
//! The value types of the campaign: calendar time, national power metrics,
//! faction territories, choice consequences and starting conditions.
//! This crate holds no traversal logic; `timeline_core` builds on it.

pub mod calendar;
pub mod config;
pub mod consequences;
pub mod powers;
pub mod territory;

pub use calendar::*;
pub use config::*;
pub use consequences::*;
pub use powers::*;
pub use territory::*;
