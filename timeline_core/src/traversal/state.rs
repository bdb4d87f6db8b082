//! Player state - play progress for one session.

use campaign_rules::{Powers, StartingConditions, TerritoryMap};
use serde::Serialize;

use crate::event_tree::EventId;

/// Power levels, holdings and position of the player.
///
/// Read-only outside this crate: only [`TimelineEngine`](super::TimelineEngine)
/// changes it, through `apply_choice` and `reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    powers: Powers,
    controlled_territories: TerritoryMap,
    /// Weak reference into the store. `None` once the timeline is exhausted.
    current_event_id: Option<EventId>,
}

impl PlayerState {
    /// Fresh state from starting conditions, positioned on `start`.
    pub(crate) fn starting(conditions: &StartingConditions, start: Option<EventId>) -> Self {
        Self {
            powers: conditions.powers(),
            controlled_territories: conditions.territories.clone(),
            current_event_id: start,
        }
    }

    pub fn powers(&self) -> &Powers {
        &self.powers
    }

    pub fn military_power(&self) -> i64 {
        self.powers.military_power
    }

    pub fn political_power(&self) -> i64 {
        self.powers.political_power
    }

    pub fn economic_power(&self) -> i64 {
        self.powers.economic_power
    }

    pub fn controlled_territories(&self) -> &TerritoryMap {
        &self.controlled_territories
    }

    pub fn current_event_id(&self) -> Option<&EventId> {
        self.current_event_id.as_ref()
    }

    /// True once no event is presented.
    pub fn is_exhausted(&self) -> bool {
        self.current_event_id.is_none()
    }

    pub(crate) fn powers_mut(&mut self) -> &mut Powers {
        &mut self.powers
    }

    pub(crate) fn territories_mut(&mut self) -> &mut TerritoryMap {
        &mut self.controlled_territories
    }

    pub(crate) fn set_current_event(&mut self, id: Option<EventId>) {
        self.current_event_id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_state() {
        let state = PlayerState::starting(&StartingConditions::default(), Some(EventId::new("start")));

        assert_eq!(state.military_power(), 100);
        assert_eq!(state.political_power(), 100);
        assert_eq!(state.economic_power(), 100);
        assert!(state.controlled_territories().holds("central_government", "jiangsu"));
        assert_eq!(state.current_event_id().unwrap().as_str(), "start");
        assert!(!state.is_exhausted());
    }

    #[test]
    fn test_starting_state_without_start_is_exhausted() {
        let state = PlayerState::starting(&StartingConditions::default(), None);
        assert!(state.is_exhausted());
    }
}
