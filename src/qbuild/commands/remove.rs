use crate::commands::{CmdMessage, CmdResult};
use crate::locate::find_group_mut;
use crate::model::Group;

/// Remove the child `node_id` from the group `parent_id`.
///
/// Later siblings shift left. Removing a group drops its whole subtree.
pub fn run(root: &mut Group, node_id: &str, parent_id: &str) -> CmdResult {
    let Some(parent) = find_group_mut(root, parent_id) else {
        tracing::warn!(id = node_id, parent = parent_id, "parent group not found");
        return CmdResult::unchanged(format!("Parent group not found: {}", parent_id));
    };

    let Some(index) = parent.rules.iter().position(|child| child.id() == node_id) else {
        tracing::warn!(id = node_id, parent = parent_id, "child not found");
        return CmdResult::unchanged(format!("Node {} not found in {}", node_id, parent_id));
    };

    let removed = parent.rules.remove(index);
    tracing::debug!(id = node_id, parent = parent_id, index, "removed child");

    let kind = if removed.is_group() { "Group" } else { "Rule" };
    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} removed from {}: {}",
            kind, parent_id, node_id
        )))
        .with_affected_nodes(vec![removed])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::QueryFixture;
    use crate::locate::contains_id;

    #[test]
    fn removes_and_keeps_sibling_order() {
        let mut root = QueryFixture::new()
            .with_rule("g-1")
            .with_rule("g-1")
            .with_rule("g-1")
            .into_root();

        let result = run(&mut root, "r-3", "g-1");

        assert!(result.changed);
        let ids: Vec<_> = root.rules.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["r-2", "r-4"]);
    }

    #[test]
    fn removing_group_drops_subtree() {
        let mut root = QueryFixture::new()
            .with_group("g-1")
            .with_rule("g-2")
            .into_root();

        let result = run(&mut root, "g-2", "g-1");

        assert_eq!(result.affected_nodes.len(), 1);
        assert!(root.rules.is_empty());
        assert!(!contains_id(&root, "r-3"));
    }

    #[test]
    fn second_removal_is_a_no_op() {
        let mut root = QueryFixture::new()
            .with_rule("g-1")
            .with_rule("g-1")
            .into_root();

        run(&mut root, "r-2", "g-1");
        let after_first = root.clone();
        let second = run(&mut root, "r-2", "g-1");

        assert!(!second.changed);
        assert!(second.has_warnings());
        assert_eq!(root, after_first);
    }

    #[test]
    fn only_direct_children_are_removed() {
        let mut root = QueryFixture::new()
            .with_group("g-1")
            .with_rule("g-2")
            .into_root();

        let result = run(&mut root, "r-3", "g-1");

        assert!(!result.changed);
        assert!(contains_id(&root, "r-3"));
    }

    #[test]
    fn root_cannot_remove_itself() {
        let mut root = QueryFixture::new().with_rule("g-1").into_root();
        let result = run(&mut root, "g-1", "g-1");

        assert!(!result.changed);
        assert_eq!(root.rules.len(), 1);
    }
}
