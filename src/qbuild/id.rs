//! # Node Identifiers
//!
//! Every node gets a string id at creation time. Ids are never reused, even
//! after the node is removed. The `r-`/`g-` prefix only makes dumps easier to
//! read; nothing parses it back.
//!
//! Generation sits behind the [`IdGenerator`] trait so the session can run with
//! random ids in production ([`UuidIds`]) and predictable ones in tests
//! ([`SequentialIds`]).

use uuid::Uuid;

/// Which kind of node an id is being issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rule,
    Group,
}

impl NodeKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            NodeKind::Rule => "r",
            NodeKind::Group => "g",
        }
    }
}

/// Source of fresh node ids.
///
/// Implementations must never hand out the same id twice over their lifetime.
pub trait IdGenerator {
    fn next_id(&mut self, kind: NodeKind) -> String;
}

/// Random v4 UUIDs, e.g. `r-5f0c...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, kind: NodeKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }
}

/// Monotonic counter shared by both kinds: `g-1`, `r-2`, `r-3`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `issued`, e.g. when resuming a saved query.
    pub fn starting_after(issued: u64) -> Self {
        Self { issued }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: NodeKind) -> String {
        self.issued += 1;
        format!("{}-{}", kind.prefix(), self.issued)
    }
}
