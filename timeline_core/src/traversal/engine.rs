//! Timeline Engine - the only code path that changes a [`PlayerState`].
//!
//! # Transition
//!
//! 1. Find the current event and the chosen option
//! 2. Add each power delta (no clamping)
//! 3. Union territory grants into the player's holdings (additive only)
//! 4. Resolve the successor from the *pre-choice* event's date
//! 5. Move the player there, or to nowhere once the timeline is exhausted
//!
//! Lookups happen before any mutation, so a failed call leaves the state
//! untouched.

use campaign_rules::{CampaignConfig, StartingConditions};
use serde::Serialize;

use super::{ChoiceResolver, PlayerState};
use crate::error::{Result, TimelineError};
use crate::event_tree::{Choice, ChoiceId, Event, EventId, EventStore};

/// Where the player stands in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Progress {
    /// On an event with choices to make.
    Active,
    /// On an event with no choices: a dead end.
    Terminal,
    /// No current event. Idle until reset or reload.
    Exhausted,
    /// The current event was removed from the store since the player got there.
    Detached,
}

/// Record of one accepted choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: EventId,
    pub choice: ChoiceId,
    /// `None` when the choice exhausted the timeline.
    pub to: Option<EventId>,
}

/// Applies choices to player state against a store.
#[derive(Debug, Clone, Default)]
pub struct TimelineEngine {
    starting: StartingConditions,
}

impl TimelineEngine {
    /// Create an engine with the given starting conditions.
    pub fn new(starting: StartingConditions) -> Self {
        Self { starting }
    }

    /// Create an engine from campaign configuration.
    pub fn from_config(config: &CampaignConfig) -> Self {
        Self::new(config.starting.clone())
    }

    pub fn starting_conditions(&self) -> &StartingConditions {
        &self.starting
    }

    /// Fresh player state on the store's initial event.
    pub fn new_game(&self, store: &EventStore) -> PlayerState {
        PlayerState::starting(&self.starting, store.initial_event().cloned())
    }

    /// Replace `state` with a fresh one. The store is not touched.
    pub fn reset(&self, store: &EventStore, state: &mut PlayerState) {
        *state = self.new_game(store);
        tracing::info!(start = ?state.current_event_id(), "reset player state");
    }

    /// The event the player is on, if it still exists.
    pub fn current_event<'s>(&self, store: &'s EventStore, state: &PlayerState) -> Option<&'s Event> {
        state
            .current_event_id()
            .and_then(|id| store.get_event(id.as_str()))
    }

    /// Choices offered on the current event; empty when none is presented.
    pub fn available_choices<'s>(&self, store: &'s EventStore, state: &PlayerState) -> &'s [Choice] {
        self.current_event(store, state)
            .map(|event| event.choices.as_slice())
            .unwrap_or(&[])
    }

    /// Classify the player's position.
    pub fn progress(&self, store: &EventStore, state: &PlayerState) -> Progress {
        match state.current_event_id() {
            None => Progress::Exhausted,
            Some(id) => match store.get_event(id.as_str()) {
                None => Progress::Detached,
                Some(event) if event.is_terminal() => Progress::Terminal,
                Some(_) => Progress::Active,
            },
        }
    }

    /// Take `choice_id` on the current event.
    pub fn apply_choice(
        &self,
        store: &EventStore,
        state: &mut PlayerState,
        choice_id: &str,
    ) -> Result<Transition> {
        let from = state
            .current_event_id()
            .cloned()
            .ok_or(TimelineError::NoCurrentEvent)?;
        let event = store
            .get_event(from.as_str())
            .ok_or_else(|| TimelineError::UnknownEvent(from.clone()))?;
        let choice = event
            .choice(choice_id)
            .ok_or_else(|| TimelineError::UnknownChoice {
                event: from.clone(),
                choice: ChoiceId::new(choice_id),
            })?;

        let resolution = ChoiceResolver::new(store).resolve(choice, event.time());

        state.powers_mut().apply(&resolution.consequences.powers);
        state
            .territories_mut()
            .merge(&resolution.consequences.territory_grants);
        state.set_current_event(resolution.next_event.clone());

        tracing::info!(
            from = %from,
            choice = %choice.id,
            to = ?resolution.next_event,
            "applied choice"
        );

        Ok(Transition {
            from,
            choice: choice.id.clone(),
            to: resolution.next_event,
        })
    }
}
