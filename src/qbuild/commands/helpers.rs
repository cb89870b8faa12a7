use crate::commands::{CmdMessage, CmdResult};
use crate::locate::{collect_ids, contains_id, find_group_mut};
use crate::model::{Group, Node, NodeId};
use std::collections::HashSet;

/// Refusal for a node whose subtree carries an id that was removed earlier.
///
/// `None` when every id in `node` is still unused.
pub fn reject_retired(node: &Node, retired: &HashSet<NodeId>) -> Option<CmdResult> {
    let reused = collect_ids(node)
        .into_iter()
        .find(|id| retired.contains(*id))?;
    tracing::warn!(id = reused, "refusing to reuse a removed id");
    Some(CmdResult::unchanged(format!(
        "Id was removed and cannot be reused: {}",
        reused
    )))
}

/// Append `node` to the end of the group `parent_id`.
///
/// Refuses when the parent is missing or a rule, and when any id in `node`'s
/// subtree already exists in the tree.
pub fn append_child(root: &mut Group, node: Node, parent_id: &str) -> CmdResult {
    if let Some(taken) = collect_ids(&node)
        .into_iter()
        .find(|id| contains_id(root, id))
    {
        tracing::warn!(id = taken, parent = parent_id, "refusing to insert duplicate id");
        return CmdResult::unchanged(format!("Id already in use: {}", taken));
    }

    let Some(parent) = find_group_mut(root, parent_id) else {
        tracing::warn!(parent = parent_id, "parent group not found");
        return CmdResult::unchanged(format!("Parent group not found: {}", parent_id));
    };

    let kind = if node.is_group() { "Group" } else { "Rule" };
    let message = format!("{} added to {}: {}", kind, parent_id, node.id());
    tracing::debug!(id = node.id(), parent = parent_id, "appending child");

    parent.rules.push(node.clone());
    CmdResult::default()
        .with_affected_nodes(vec![node])
        .with_message(CmdMessage::success(message))
}
