//! Choice resolution: where a choice leads and what it costs.

use campaign_rules::{Consequences, TimePoint};

use crate::event_tree::{Choice, Event, EventId, EventStore};

/// Outcome of resolving a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Deltas to apply to the player.
    pub consequences: &'a Consequences,
    /// Successor event, or `None` when the timeline is exhausted.
    pub next_event: Option<EventId>,
}

/// Resolves choices against a read-only store.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceResolver<'s> {
    store: &'s EventStore,
}

impl<'s> ChoiceResolver<'s> {
    pub fn new(store: &'s EventStore) -> Self {
        Self { store }
    }

    /// Resolve `choice` taken at time `now`.
    ///
    /// An explicit link is followed when it names an existing event. A missing
    /// or dangling link falls back to the nearest future event.
    pub fn resolve<'c>(&self, choice: &'c Choice, now: TimePoint) -> Resolution<'c> {
        let next_event = match &choice.next_event {
            Some(next) if self.store.contains(next.as_str()) => Some(next.clone()),
            Some(next) => {
                tracing::warn!(choice = %choice.id, target = %next, "choice links to a missing event; using fallback");
                self.nearest_future(now).map(|event| event.id.clone())
            }
            None => self.nearest_future(now).map(|event| event.id.clone()),
        };

        Resolution {
            consequences: &choice.consequences,
            next_event,
        }
    }

    /// The event with the smallest strictly positive distance from `now`.
    ///
    /// Ties go to the smallest event id.
    pub fn nearest_future(&self, now: TimePoint) -> Option<&'s Event> {
        self.store
            .events()
            .filter_map(|event| {
                let delta = now.months_until(&event.time());
                (delta > 0).then_some((delta, event))
            })
            .min_by(|(a_delta, a), (b_delta, b)| a_delta.cmp(b_delta).then_with(|| a.id.cmp(&b.id)))
            .map(|(_, event)| event)
    }
}
