//! Authoring boundary - drafts of whole timelines from free text.
//!
//! A generator (typically a language model behind some client) implements
//! [`AuthoringAssistant`]. Its output gets no more trust than a file from disk:
//! it goes through [`EventStore::load`] and its repair pass, and replaces the
//! authored store only when that succeeds. Streamed output is collected in a
//! [`DraftBuffer`] and parsed only once the stream is complete.

use crate::error::{Result, TimelineError};
use crate::event_tree::EventStore;

/// Failures while producing or reading a draft.
#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    /// The generator itself failed (transport, quota, refusal).
    #[error("generator failed: {0}")]
    Generator(String),

    /// The stream ended without being marked finished.
    #[error("draft stream is incomplete")]
    Incomplete,

    /// The draft is not a valid timeline document.
    #[error("draft is not a valid timeline: {0}")]
    InvalidDraft(String),
}

/// Produces a timeline document from a free-text description.
pub trait AuthoringAssistant {
    /// Return a complete document in the persisted JSON shape. Markdown code
    /// fences around the document are tolerated.
    fn draft(&self, description: &str) -> std::result::Result<String, AuthoringError>;
}

/// Accumulates a streamed draft.
#[derive(Debug, Clone, Default)]
pub struct DraftBuffer {
    text: String,
    finished: bool,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Chunks after [`DraftBuffer::finish`] are ignored.
    pub fn push_chunk(&mut self, chunk: &str) {
        if self.finished {
            tracing::warn!(len = chunk.len(), "ignoring chunk after draft was finished");
            return;
        }
        self.text.push_str(chunk);
    }

    /// Mark the stream as complete.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text received so far, for live display.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the finished draft. An unfinished stream is never parsed.
    pub fn into_store(self) -> std::result::Result<EventStore, AuthoringError> {
        if !self.finished {
            return Err(AuthoringError::Incomplete);
        }
        parse_draft(&self.text)
    }
}

/// Parse generator output into a repaired store.
pub fn parse_draft(raw: &str) -> std::result::Result<EventStore, AuthoringError> {
    EventStore::load(strip_code_fence(raw)).map_err(|err| match err {
        TimelineError::MalformedDocument(msg) => AuthoringError::InvalidDraft(msg),
        other => AuthoringError::InvalidDraft(other.to_string()),
    })
}

/// Ask `assistant` for a timeline and install it into `target`.
///
/// On any failure `target` is left exactly as it was. Returns the number of
/// events in the installed store.
pub fn import_draft(
    assistant: &dyn AuthoringAssistant,
    description: &str,
    target: &mut EventStore,
) -> Result<usize> {
    let draft = match assistant.draft(description).and_then(|raw| parse_draft(&raw)) {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!(error = %err, "discarding draft");
            return Err(err.into());
        }
    };

    let count = draft.len();
    *target = draft;
    tracing::info!(events = count, "installed drafted timeline");
    Ok(count)
}

/// Remove a surrounding Markdown code fence such as ```` ```json ... ``` ````.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"```json
{
    "name": "Linear",
    "initial_event": "event_1",
    "events": {
        "event_1": {"id": "event_1", "title": "One", "year": 1930, "month": 1,
            "choices": [{"id": "choice_1", "text": "Next", "next_event": "event_2"}]},
        "event_2": {"id": "event_2", "title": "Two", "year": 1930, "month": 2,
            "choices": [{"id": "choice_2", "text": "Next", "next_event": "event_9"}]}
    }
}
```"#;

    struct Canned(std::result::Result<&'static str, &'static str>);

    impl AuthoringAssistant for Canned {
        fn draft(&self, _description: &str) -> std::result::Result<String, AuthoringError> {
            self.0
                .map(str::to_string)
                .map_err(|msg| AuthoringError::Generator(msg.to_string()))
        }
    }

    fn authored() -> EventStore {
        EventStore::load(r#"{"events": {"mine": {"id": "mine", "title": "Mine", "year": 1930, "month": 1}}}"#)
            .unwrap()
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{}```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn test_parse_draft_repairs() {
        let store = parse_draft(DRAFT).unwrap();
        assert_eq!(store.len(), 2);
        let second = store.get_event("event_2").unwrap();
        assert!(second.choice("choice_2").unwrap().next_event.is_none());
    }

    #[test]
    fn test_import_replaces_on_success() {
        let mut target = authored();
        let count = import_draft(&Canned(Ok(DRAFT)), "1930s", &mut target).unwrap();

        assert_eq!(count, 2);
        assert_eq!(target.name(), Some("Linear"));
        assert!(!target.contains("mine"));
    }

    #[test]
    fn test_failed_generation_keeps_store() {
        let mut target = authored();
        let before = target.clone();

        let result = import_draft(&Canned(Err("timeout")), "1930s", &mut target);
        assert!(matches!(result, Err(TimelineError::Authoring(AuthoringError::Generator(_)))));
        assert_eq!(target, before);

        let result = import_draft(&Canned(Ok("{\"events\": {")), "1930s", &mut target);
        assert!(matches!(result, Err(TimelineError::Authoring(AuthoringError::InvalidDraft(_)))));
        assert_eq!(target, before);
    }

    #[test]
    fn test_streamed_draft() {
        let mut buffer = DraftBuffer::new();
        for chunk in DRAFT.as_bytes().chunks(17) {
            buffer.push_chunk(std::str::from_utf8(chunk).unwrap());
        }
        assert_eq!(buffer.text(), DRAFT);

        buffer.finish();
        buffer.push_chunk("trailing garbage");
        assert!(buffer.is_finished());
        assert_eq!(buffer.into_store().unwrap().len(), 2);
    }

    #[test]
    fn test_unfinished_stream_is_not_parsed() {
        let mut buffer = DraftBuffer::new();
        buffer.push_chunk(DRAFT);
        assert!(matches!(buffer.into_store(), Err(AuthoringError::Incomplete)));
    }
}
