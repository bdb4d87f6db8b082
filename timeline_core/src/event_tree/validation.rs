//! Authoring diagnostics.
//!
//! None of these block loading or play. They point an author at links that
//! go back in time, a missing start, or events nothing links to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ChoiceId, EventId, EventStore};

/// A non-fatal problem found in a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    /// The store has events but no starting event.
    NoInitialEvent,

    /// A choice links to an event earlier than its own.
    TimeRegression {
        event: EventId,
        choice: ChoiceId,
        target: EventId,
    },

    /// An event that is neither the start nor the target of any link. It can
    /// still be reached through the nearest-future fallback.
    Unlinked(EventId),
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::NoInitialEvent => write!(f, "no initial event is set"),
            ValidationIssue::TimeRegression {
                event,
                choice,
                target,
            } => write!(f, "choice {choice} of {event} links back in time to {target}"),
            ValidationIssue::Unlinked(id) => write!(f, "event {id} has no incoming link"),
        }
    }
}

impl EventStore {
    /// Collect authoring diagnostics, ordered by kind and then by event id.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.initial_event().is_none() && !self.is_empty() {
            issues.push(ValidationIssue::NoInitialEvent);
        }

        let mut linked: BTreeSet<&EventId> = BTreeSet::new();
        for event in self.events() {
            for (choice, target_id) in event.links() {
                let Some(target) = self.get_event(target_id.as_str()) else {
                    continue;
                };
                linked.insert(target_id);
                if target.time() < event.time() {
                    issues.push(ValidationIssue::TimeRegression {
                        event: event.id.clone(),
                        choice: choice.id.clone(),
                        target: target_id.clone(),
                    });
                }
            }
        }

        issues.extend(
            self.event_ids()
                .filter(|id| !linked.contains(id) && self.initial_event() != Some(*id))
                .map(|id| ValidationIssue::Unlinked(id.clone())),
        );

        issues
    }
}
