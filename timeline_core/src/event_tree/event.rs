//! Event and choice definitions - the nodes and edges of the timeline graph.

use campaign_rules::{Consequences, TimePoint};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// Key of an event in the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id asks the store to assign a fresh one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a choice, unique only within its parent event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<str> for ChoiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the story at a given year and month.
///
/// An event with no choices is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub year: i32,

    /// 1..=12, checked on load and on every store mutation.
    pub month: u8,

    /// Province references for map collaborators.
    #[serde(default)]
    pub locations: BTreeSet<String>,

    /// Player-selectable options, in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Event {
    /// Create an event with no id; the store assigns one on insertion.
    pub fn new(title: impl Into<String>, time: TimePoint) -> Self {
        Self {
            id: EventId::default(),
            title: title.into(),
            description: String::new(),
            year: time.year,
            month: time.month,
            locations: BTreeSet::new(),
            choices: Vec::new(),
        }
    }

    /// Set the event id.
    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a province reference.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.insert(location.into());
        self
    }

    /// Append a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// When the event happens.
    pub fn time(&self) -> TimePoint {
        TimePoint {
            year: self.year,
            month: self.month,
        }
    }

    /// True when the event offers no choices.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Look up a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }

    pub(crate) fn choice_mut(&mut self, id: &str) -> Option<&mut Choice> {
        self.choices.iter_mut().find(|c| c.id.as_str() == id)
    }

    /// Explicit successors, one per linked choice.
    pub fn links(&self) -> impl Iterator<Item = (&Choice, &EventId)> {
        self.choices
            .iter()
            .filter_map(|c| c.next_event.as_ref().map(|next| (c, next)))
    }

    /// First choice id that appears more than once, if any.
    pub(crate) fn duplicate_choice_id(&self) -> Option<&ChoiceId> {
        let mut seen = BTreeSet::new();
        self.choices.iter().map(|c| &c.id).find(|id| !seen.insert(*id))
    }
}

/// A player-selectable edge out of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,

    /// Display label.
    pub text: String,

    #[serde(default)]
    pub consequences: Consequences,

    /// Weak reference to the successor. `None` routes through the
    /// nearest-future fallback.
    #[serde(default)]
    pub next_event: Option<EventId>,
}

impl Choice {
    /// Create a choice with no consequences and no explicit successor.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ChoiceId::new(id),
            text: text.into(),
            consequences: Consequences::default(),
            next_event: None,
        }
    }

    /// Set the consequences.
    pub fn with_consequences(mut self, consequences: Consequences) -> Self {
        self.consequences = consequences;
        self
    }

    /// Link to an explicit successor.
    pub fn leading_to(mut self, next: impl Into<EventId>) -> Self {
        self.next_event = Some(next.into());
        self
    }
}
