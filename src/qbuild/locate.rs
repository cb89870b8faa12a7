//! # Tree Lookups
//!
//! Everything here walks the tree depth-first, pre-order: a node is checked
//! before its children, and children in display order. Ids are unique, so the
//! first hit is the only hit; should that ever not hold, the first pre-order
//! match wins.
//!
//! ## Levels
//!
//! [`level_of`] counts the groups that sit strictly between the root and the
//! node. The root and its direct children are all at level 0, and each nested
//! group adds one for whatever it contains:
//!
//! ```text
//! g-root            0
//! ├── r-A           0
//! └── g-B           0
//!     └── r-C       1
//! ```
//!
//! A nested group sits at the level of its siblings, not of its contents.
//! Indentation code that puts a group header one step in must add that step
//! itself.

use crate::model::{Group, Node, NodeMut, NodeRef};

pub fn find_node<'a>(root: &'a Group, id: &str) -> Option<NodeRef<'a>> {
    if root.id == id {
        return Some(NodeRef::Group(root));
    }

    for child in &root.rules {
        match child {
            Node::Rule(rule) if rule.id == id => return Some(NodeRef::Rule(rule)),
            Node::Rule(_) => {}
            Node::Group(group) => {
                if let Some(found) = find_node(group, id) {
                    return Some(found);
                }
            }
        }
    }

    None
}

pub fn find_node_mut<'a>(root: &'a mut Group, id: &str) -> Option<NodeMut<'a>> {
    if root.id == id {
        return Some(NodeMut::Group(root));
    }

    for child in root.rules.iter_mut() {
        match child {
            Node::Rule(rule) => {
                if rule.id == id {
                    return Some(NodeMut::Rule(rule));
                }
            }
            Node::Group(group) => {
                if let Some(found) = find_node_mut(group, id) {
                    return Some(found);
                }
            }
        }
    }

    None
}

/// Like [`find_node_mut`], but only a group counts as a hit.
pub fn find_group_mut<'a>(root: &'a mut Group, id: &str) -> Option<&'a mut Group> {
    match find_node_mut(root, id)? {
        NodeMut::Group(group) => Some(group),
        NodeMut::Rule(_) => None,
    }
}

pub fn contains_id(root: &Group, id: &str) -> bool {
    find_node(root, id).is_some()
}

/// The group whose `rules` directly hold `id`. `None` for the root itself.
pub fn parent_of<'a>(root: &'a Group, id: &str) -> Option<&'a Group> {
    for child in &root.rules {
        if child.id() == id {
            return Some(root);
        }
        if let Node::Group(group) = child {
            if let Some(parent) = parent_of(group, id) {
                return Some(parent);
            }
        }
    }
    None
}

/// Nesting level of `id`, or `None` when no node carries it.
pub fn level_of(root: &Group, id: &str) -> Option<usize> {
    if root.id == id {
        return Some(0);
    }
    level_within(root, id, 0)
}

fn level_within(group: &Group, id: &str, level: usize) -> Option<usize> {
    for child in &group.rules {
        if child.id() == id {
            return Some(level);
        }
        if let Node::Group(nested) = child {
            if let Some(found) = level_within(nested, id, level + 1) {
                return Some(found);
            }
        }
    }
    None
}

/// Ids of `node` and everything beneath it, pre-order.
pub fn collect_ids(node: &Node) -> Vec<&str> {
    let mut ids = Vec::new();
    push_ids(node, &mut ids);
    ids
}

fn push_ids<'a>(node: &'a Node, ids: &mut Vec<&'a str>) {
    ids.push(node.id());
    if let Node::Group(group) = node {
        for child in &group.rules {
            push_ids(child, ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::QueryFixture;
    use crate::model::{Property, Rule};

    // g-1
    // ├── r-2
    // └── g-3
    //     ├── r-4
    //     └── g-5
    //         └── r-6
    fn sample() -> Group {
        QueryFixture::new()
            .with_rule("g-1")
            .with_group("g-1")
            .with_rule("g-3")
            .with_group("g-3")
            .with_rule("g-5")
            .into_root()
    }

    #[test]
    fn finds_root_rules_and_nested_groups() {
        let root = sample();
        assert_eq!(find_node(&root, "g-1").unwrap().id(), "g-1");
        assert!(!find_node(&root, "r-2").unwrap().is_group());
        assert!(find_node(&root, "g-5").unwrap().is_group());
        assert_eq!(find_node(&root, "r-6").unwrap().id(), "r-6");
    }

    #[test]
    fn missing_id_is_not_found() {
        let root = sample();
        assert!(find_node(&root, "r-99").is_none());
        assert!(!contains_id(&root, "r-99"));
        assert_eq!(level_of(&root, "r-99"), None);
    }

    #[test]
    fn first_preorder_match_wins_on_duplicates() {
        let mut root = sample();
        let duplicate = Rule {
            id: "r-6".into(),
            field: "dup".into(),
            operator: "=".into(),
            value: "".into(),
        };
        root.rules.insert(0, duplicate.into());

        match find_node(&root, "r-6").unwrap() {
            NodeRef::Rule(rule) => assert_eq!(rule.field, "dup"),
            NodeRef::Group(_) => panic!("expected a rule"),
        }
    }

    #[test]
    fn find_group_mut_skips_rules() {
        let mut root = sample();
        assert!(find_group_mut(&mut root, "r-4").is_none());
        find_group_mut(&mut root, "g-3").unwrap().combinator = "or".into();
        assert_eq!(
            find_node(&root, "g-3").unwrap().to_node().as_group().unwrap().combinator,
            "or"
        );
    }

    #[test]
    fn find_node_mut_edits_in_place() {
        let mut root = sample();
        let mut target = find_node_mut(&mut root, "r-6").unwrap();
        assert!(target.apply(Property::Field("email".into())));

        let rule = find_node(&root, "r-6").unwrap().to_node();
        assert_eq!(rule.as_rule().unwrap().field, "email");
    }

    #[test]
    fn levels_count_enclosing_groups_below_root() {
        let root = sample();
        assert_eq!(level_of(&root, "g-1"), Some(0));
        assert_eq!(level_of(&root, "r-2"), Some(0));
        assert_eq!(level_of(&root, "g-3"), Some(0));
        assert_eq!(level_of(&root, "r-4"), Some(1));
        assert_eq!(level_of(&root, "g-5"), Some(1));
        assert_eq!(level_of(&root, "r-6"), Some(2));
    }

    #[test]
    fn parent_of_reports_direct_container() {
        let root = sample();
        assert!(parent_of(&root, "g-1").is_none());
        assert_eq!(parent_of(&root, "r-2").unwrap().id, "g-1");
        assert_eq!(parent_of(&root, "r-6").unwrap().id, "g-5");
        assert!(parent_of(&root, "r-99").is_none());
    }

    #[test]
    fn collect_ids_walks_subtree_in_order() {
        let root = sample();
        let nested = root.rules[1].clone();
        assert_eq!(collect_ids(&nested), vec!["g-3", "r-4", "g-5", "r-6"]);
    }
}
