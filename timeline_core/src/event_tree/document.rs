//! JSON persistence of the event store.
//!
//! Loading fills typed defaults for optional fields, rejects documents that
//! miss required ones, and always finishes with a repair pass, so a freshly
//! loaded store never carries dangling links.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{Event, EventId, EventStore};
use crate::error::{Result, TimelineError};

/// Wire shape accepted by [`EventStore::load`].
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    initial_event: Option<EventId>,
    events: BTreeMap<String, Event>,
}

/// Wire shape written by [`EventStore::to_json`].
#[derive(Debug, Serialize)]
struct DocumentRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    initial_event: Option<&'a EventId>,
    events: &'a BTreeMap<EventId, Event>,
}

impl EventStore {
    /// Parse and repair a timeline document.
    ///
    /// When an event's `id` differs from its key, the key wins.
    pub fn load(raw: &str) -> Result<Self> {
        let document: RawDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    /// Parse and repair an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: RawDocument = serde_json::from_value(value)?;
        Self::from_document(document)
    }

    /// Read a timeline document from disk.
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let store = Self::load(&raw)?;
        tracing::debug!(path = %path.display(), events = store.len(), "loaded timeline");
        Ok(store)
    }

    /// Like [`EventStore::load_file`], but a missing file yields an empty store.
    pub fn load_file_or_empty(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::load(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize to a pretty-printed document. Non-ASCII text is kept as is.
    pub fn to_json(&self) -> Result<String> {
        let document = DocumentRef {
            name: self.name(),
            initial_event: self.initial_event(),
            events: self.events_map(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Write the document to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), events = self.len(), "saved timeline");
        Ok(())
    }

    fn from_document(document: RawDocument) -> Result<Self> {
        let mut events = BTreeMap::new();

        for (key, mut event) in document.events {
            if key.is_empty() {
                return Err(TimelineError::MalformedDocument("event key is empty".into()));
            }
            if event.id.as_str() != key {
                tracing::warn!(key = %key, id = %event.id, "event id differs from its key; using the key");
                event.id = EventId::new(key.as_str());
            }
            if !campaign_rules::is_valid_month(event.month) {
                return Err(TimelineError::MalformedDocument(format!(
                    "event {key}: month {} is outside 1..=12",
                    event.month
                )));
            }
            if let Some(duplicate) = event.duplicate_choice_id() {
                return Err(TimelineError::MalformedDocument(format!(
                    "event {key}: choice id {duplicate} appears more than once"
                )));
            }
            events.insert(event.id.clone(), event);
        }

        let mut store = EventStore::from_parts(document.name, document.initial_event, events);
        store.repair_dangling_references();
        Ok(store)
    }
}
