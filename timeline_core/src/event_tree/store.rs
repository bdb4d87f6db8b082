//! Event Store - the single source of truth for the timeline graph.

use std::collections::BTreeMap;

use super::{Choice, ChoiceId, Event, EventId};
use crate::error::{Result, TimelineError};

/// The event graph: events keyed by id, plus the designated starting event.
///
/// Edges are weak: a choice names its successor by id and the successor is
/// looked up at traversal time. Events are kept ordered by id so iteration
/// and saved documents are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventStore {
    /// Display name of the timeline.
    name: Option<String>,

    /// Event the game starts on.
    initial_event: Option<EventId>,

    /// All events stored by id.
    events: BTreeMap<EventId, Event>,
}

impl EventStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a display name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Assemble a store from parsed parts without any checks.
    pub(crate) fn from_parts(
        name: Option<String>,
        initial_event: Option<EventId>,
        events: BTreeMap<EventId, Event>,
    ) -> Self {
        Self {
            name,
            initial_event,
            events,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check if an event exists.
    pub fn contains(&self, id: &str) -> bool {
        self.events.contains_key(id)
    }

    /// Get event by id.
    pub fn get_event(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    /// All events, ordered by id.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// All event ids, ascending.
    pub fn event_ids(&self) -> impl Iterator<Item = &EventId> {
        self.events.keys()
    }

    pub fn initial_event(&self) -> Option<&EventId> {
        self.initial_event.as_ref()
    }

    /// The starting event itself.
    pub fn initial(&self) -> Option<&Event> {
        self.initial_event.as_ref().and_then(|id| self.events.get(id))
    }

    /// Designate the starting event.
    pub fn set_initial_event(&mut self, id: &str) -> Result<()> {
        let key = self.existing_key(id)?;
        self.initial_event = Some(key);
        Ok(())
    }

    pub fn clear_initial_event(&mut self) {
        self.initial_event = None;
    }

    /// Insert an event, assigning a fresh id when its id is empty.
    ///
    /// Returns the id the event is stored under.
    pub fn add_event(&mut self, mut event: Event) -> Result<EventId> {
        if event.id.is_empty() {
            event.id = self.fresh_event_id();
        } else if self.events.contains_key(&event.id) {
            return Err(TimelineError::DuplicateId(event.id.0));
        }
        check_event(&event)?;

        let id = event.id.clone();
        tracing::debug!(event = %id, "added event");
        self.events.insert(id.clone(), event);
        Ok(id)
    }

    /// Delete an event.
    ///
    /// Clears `initial_event` if it pointed here, then repairs every choice
    /// in the store that linked to the removed event.
    pub fn remove_event(&mut self, id: &str) -> Result<Event> {
        let removed = self
            .events
            .remove(id)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(id)))?;

        if self.initial_event.as_ref().is_some_and(|initial| initial.as_str() == id) {
            self.initial_event = None;
        }
        self.repair_dangling_references();
        tracing::debug!(event = %id, "removed event");
        Ok(removed)
    }

    /// Null out every `next_event` that names a missing event, and clear a
    /// dangling `initial_event`.
    ///
    /// Idempotent. Returns how many references were cleared.
    pub fn repair_dangling_references(&mut self) -> usize {
        let mut cleared = 0;

        // Split borrow: the key set is read while choices are rewritten.
        let Self {
            events,
            initial_event,
            ..
        } = self;

        let known: &BTreeMap<EventId, Event> = events;
        let dangling: Vec<(EventId, ChoiceId)> = known
            .values()
            .flat_map(move |event| {
                event
                    .links()
                    .filter(move |(_, next)| !known.contains_key(*next))
                    .map(move |(choice, _)| (event.id.clone(), choice.id.clone()))
            })
            .collect();

        for (event_id, choice_id) in dangling {
            if let Some(choice) = events
                .get_mut(&event_id)
                .and_then(|event| event.choice_mut(choice_id.as_str()))
            {
                choice.next_event = None;
                cleared += 1;
            }
        }

        if initial_event.as_ref().is_some_and(|id| !events.contains_key(id)) {
            *initial_event = None;
            cleared += 1;
        }

        if cleared > 0 {
            tracing::debug!(cleared, "repaired dangling references");
        }
        cleared
    }

    /// Edit an event in place.
    ///
    /// The event keeps its id (use [`EventStore::rename_event`] to re-key).
    /// If the edit leaves an invalid month or a repeated choice id, it is
    /// rolled back and the error returned. Links are repaired afterwards.
    pub fn update_event<F>(&mut self, id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Event),
    {
        let event = self
            .events
            .get_mut(id)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(id)))?;

        let original = event.clone();
        edit(event);
        event.id = original.id.clone();

        if let Err(err) = check_event(event) {
            *event = original;
            return Err(err);
        }

        self.repair_dangling_references();
        Ok(())
    }

    /// Re-key an event, rewiring every link and the initial event to the
    /// new id.
    pub fn rename_event(&mut self, old: &str, new: impl Into<EventId>) -> Result<()> {
        let new = new.into();
        if new.is_empty() || self.events.contains_key(&new) {
            return Err(TimelineError::DuplicateId(new.0));
        }
        let mut event = self
            .events
            .remove(old)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(old)))?;

        event.id = new.clone();
        self.events.insert(new.clone(), event);

        for choice in self.events.values_mut().flat_map(|e| e.choices.iter_mut()) {
            if choice.next_event.as_ref().is_some_and(|next| next.as_str() == old) {
                choice.next_event = Some(new.clone());
            }
        }
        if self.initial_event.as_ref().is_some_and(|id| id.as_str() == old) {
            self.initial_event = Some(new.clone());
        }

        tracing::debug!(from = %old, to = %new, "renamed event");
        Ok(())
    }

    /// Append a choice to an event, assigning a fresh id when empty.
    pub fn add_choice(&mut self, event_id: &str, mut choice: Choice) -> Result<ChoiceId> {
        if let Some(next) = &choice.next_event {
            if !self.events.contains_key(next) {
                return Err(TimelineError::UnknownEvent(next.clone()));
            }
        }
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(event_id)))?;

        if choice.id.is_empty() {
            choice.id = fresh_choice_id(event);
        } else if event.choice(choice.id.as_str()).is_some() {
            return Err(TimelineError::DuplicateId(choice.id.0));
        }

        let id = choice.id.clone();
        event.choices.push(choice);
        Ok(id)
    }

    /// Remove a choice from an event.
    pub fn remove_choice(&mut self, event_id: &str, choice_id: &str) -> Result<Choice> {
        let event = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(event_id)))?;

        let position = event
            .choices
            .iter()
            .position(|c| c.id.as_str() == choice_id)
            .ok_or_else(|| TimelineError::UnknownChoice {
                event: EventId::new(event_id),
                choice: ChoiceId::new(choice_id),
            })?;

        Ok(event.choices.remove(position))
    }

    /// Point a choice at an existing event, or unlink it with `None`.
    pub fn set_next_event(
        &mut self,
        event_id: &str,
        choice_id: &str,
        target: Option<&str>,
    ) -> Result<()> {
        let target = target.map(|t| self.existing_key(t)).transpose()?;

        let choice = self
            .events
            .get_mut(event_id)
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(event_id)))?
            .choice_mut(choice_id)
            .ok_or_else(|| TimelineError::UnknownChoice {
                event: EventId::new(event_id),
                choice: ChoiceId::new(choice_id),
            })?;

        choice.next_event = target;
        Ok(())
    }

    /// Add every event of `other` to this store.
    ///
    /// Any id collision fails before anything is inserted. The other store's
    /// initial event is adopted only when this store has none.
    pub fn merge(&mut self, other: EventStore) -> Result<()> {
        if let Some(collision) = other.events.keys().find(|id| self.events.contains_key(*id)) {
            return Err(TimelineError::DuplicateId(collision.0.clone()));
        }

        let added = other.events.len();
        self.events.extend(other.events);
        if self.initial_event.is_none() {
            self.initial_event = other.initial_event;
        }
        if self.name.is_none() {
            self.name = other.name;
        }

        self.repair_dangling_references();
        tracing::debug!(added, "merged event store");
        Ok(())
    }

    pub(crate) fn events_map(&self) -> &BTreeMap<EventId, Event> {
        &self.events
    }

    fn existing_key(&self, id: &str) -> Result<EventId> {
        self.events
            .get_key_value(id)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| TimelineError::UnknownEvent(EventId::new(id)))
    }

    fn fresh_event_id(&self) -> EventId {
        (self.events.len()..)
            .map(|n| EventId(format!("new_event_{n}")))
            .find(|id| !self.events.contains_key(id))
            .unwrap_or_default()
    }
}

/// Month range and choice id uniqueness.
fn check_event(event: &Event) -> Result<()> {
    if !campaign_rules::is_valid_month(event.month) {
        return Err(TimelineError::InvalidMonth(event.month));
    }
    if let Some(duplicate) = event.duplicate_choice_id() {
        return Err(TimelineError::DuplicateId(duplicate.0.clone()));
    }
    Ok(())
}

fn fresh_choice_id(event: &Event) -> ChoiceId {
    (event.choices.len() + 1..)
        .map(|n| ChoiceId(format!("choice_{n}")))
        .find(|id| event.choice(id.as_str()).is_none())
        .unwrap_or_default()
}
