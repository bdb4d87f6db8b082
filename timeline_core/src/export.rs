//! Graph export - a renderable description of the event store.
//!
//! Nodes are events labelled with title and date; edges are explicit choice
//! links labelled with the choice text. The initial event is flagged so a
//! renderer can highlight it. Export reads the store and never changes it.

use serde::Serialize;
use std::fmt::Write as _;

use crate::event_tree::{EventId, EventStore};

/// A node of the exported graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: EventId,
    /// `"<title>\n(<year>/<month>)"`.
    pub label: String,
    pub initial: bool,
    pub terminal: bool,
}

/// An edge of the exported graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: EventId,
    pub to: EventId,
    /// Choice text.
    pub label: String,
}

/// Snapshot of the store as nodes and edges, ordered by event id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TimelineGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl TimelineGraph {
    /// Build the graph from a store.
    pub fn from_store(store: &EventStore) -> Self {
        let nodes = store
            .events()
            .map(|event| GraphNode {
                id: event.id.clone(),
                label: format!("{}\n({})", event.title, event.time()),
                initial: store.initial_event() == Some(&event.id),
                terminal: event.is_terminal(),
            })
            .collect();

        let edges = store
            .events()
            .flat_map(|event| {
                event.links().map(move |(choice, to)| GraphEdge {
                    from: event.id.clone(),
                    to: to.clone(),
                    label: choice.text.clone(),
                })
            })
            .collect();

        Self { nodes, edges }
    }

    /// Render as Graphviz DOT, laid out top to bottom.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph timeline {\n");
        dot.push_str("    rankdir=TB;\n");
        dot.push_str("    node [shape=box, style=rounded];\n");

        for node in &self.nodes {
            let _ = write!(dot, "    \"{}\" [label=\"{}\"", escape(node.id.as_str()), escape(&node.label));
            if node.initial {
                dot.push_str(", style=\"rounded,filled\", fillcolor=lightblue");
            }
            dot.push_str("];\n");
        }

        for edge in &self.edges {
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                escape(edge.from.as_str()),
                escape(edge.to.as_str()),
                escape(&edge.label)
            );
        }

        dot.push_str("}\n");
        dot
    }
}

/// Escape a string for a double-quoted DOT id.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
