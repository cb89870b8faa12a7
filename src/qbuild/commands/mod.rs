//! # Tree Mutations
//!
//! One module per structural edit. Each `run` takes the live root by mutable
//! reference plus ids naming what to touch, applies the edit in place and
//! reports what happened in a [`CmdResult`].
//!
//! Commands never notify anyone; the session wraps every call and emits the
//! snapshot afterwards.
//!
//! A target id that resolves to nothing (or to the wrong kind of node) is not
//! an error. A stale "remove" button may fire after its node is already gone,
//! so the command leaves the tree alone and returns a warning instead.

use crate::model::Node;

pub mod add_group;
pub mod add_rule;
pub mod helpers;
pub mod remove;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Whether the tree was modified.
    pub changed: bool,
    /// Copies of the nodes that were inserted, removed or updated.
    pub affected_nodes: Vec<Node>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_affected_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.changed = !nodes.is_empty();
        self.affected_nodes = nodes;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// A no-op outcome carrying one warning.
    pub fn unchanged(warning: impl Into<String>) -> Self {
        Self::default().with_message(CmdMessage::warning(warning))
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
