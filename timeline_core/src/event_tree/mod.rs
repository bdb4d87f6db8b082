//! Event Tree module - the timeline graph and its consistency rules.
//!
//! The graph consists of:
//! - **Events**: Nodes, each at a year and month
//! - **Choices**: Edges out of an event, carrying consequences and an
//!   optional weak link to the next event
//! - **EventStore**: Owns every event and the starting event, and repairs
//!   links that point at missing events

mod document;
mod event;
mod store;
mod validation;

pub use event::*;
pub use store::*;
pub use validation::*;
