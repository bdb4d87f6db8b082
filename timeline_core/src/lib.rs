//! # Timeline Core
//!
//! The event-tree engine of the historical strategy game. Authors build a
//! directed graph of dated events joined by choices; players walk it, and every
//! choice moves the nation's power metrics and territorial holdings.
//!
//! ## Core Components
//!
//! - **event_tree**: Events, choices, the [`EventStore`] and its repair rules
//! - **traversal**: Choice resolution, [`PlayerState`] and the [`TimelineEngine`]
//! - **export**: Nodes-and-edges snapshot of a store, with Graphviz output
//! - **authoring**: Boundary for generators that draft whole timelines
//!
//! ## Design Philosophy
//!
//! - **Weak links**: Choices name their successor by id; lookups happen at
//!   traversal time, so cycles and back-links need no special handling
//! - **Self-healing**: Links to missing events are nulled on every load,
//!   merge and deletion, never reported as errors
//! - **Explicit state**: Play progress is a value owned by the caller (or a
//!   [`Session`]), never a global

pub mod authoring;
pub mod error;
pub mod event_tree;
pub mod export;
pub mod traversal;

pub use authoring::*;
pub use error::*;
pub use event_tree::*;
pub use export::*;
pub use traversal::*;
