//! Error types for the `timeline_core` crate.
//!
//! Dangling `next_event` references are not errors: repair heals them
//! silently. Everything here is surfaced to the caller and never retried.

use crate::authoring::AuthoringError;
use crate::event_tree::{ChoiceId, EventId};

/// Errors produced by the event store, the engine and sessions.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// A document is missing a required field, has a wrong type, or breaks a
    /// structural rule. Nothing is installed when this is returned.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// An id supplied by the caller is already taken.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// The referenced event is not in the store.
    #[error("unknown event: {0}")]
    UnknownEvent(EventId),

    /// The referenced choice does not exist on its event.
    #[error("unknown choice {choice} on event {event}")]
    UnknownChoice {
        /// The event searched.
        event: EventId,
        /// The missing choice.
        choice: ChoiceId,
    },

    /// Months are numbered 1 through 12.
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),

    /// The player is not on any event; the timeline is exhausted.
    #[error("no current event: the timeline is exhausted")]
    NoCurrentEvent,

    /// No session is registered under the given id.
    #[error("session not found: {0}")]
    SessionNotFound(crate::traversal::SessionId),

    /// A session lock was poisoned by a panic in another holder.
    #[error("session {0} is poisoned")]
    SessionPoisoned(crate::traversal::SessionId),

    /// Reading or writing a document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The authoring assistant failed to produce a usable draft.
    #[error("authoring failed: {0}")]
    Authoring(#[from] AuthoringError),
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

/// Result alias for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;
