//! Traversal - walking the timeline as the player makes choices.
//!
//! - **resolver**: Picks the next event for a choice (explicit link or the
//!   nearest-future fallback)
//! - **state**: The player's powers, holdings and position
//! - **engine**: Applies a choice as one atomic transition
//! - **session**: Per-session isolation for hosting many games at once

mod engine;
mod resolver;
mod session;
mod state;

pub use engine::*;
pub use resolver::*;
pub use session::*;
pub use state::*;
