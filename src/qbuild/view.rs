//! # Display Data
//!
//! Flattens the tree into what a presentation layer needs to draw one control
//! row per node: where it sits, whether it may be removed, and which options
//! its selectors offer. The model never renders anything itself.

use crate::config::{OptionSpec, QueryConfig};
use crate::model::{Group, Node};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    Group {
        combinator: String,
        combinators: Vec<OptionSpec>,
        child_count: usize,
    },
    Rule {
        field: String,
        fields: Vec<OptionSpec>,
        operator: String,
        operators: Vec<OptionSpec>,
        value: Value,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub parent_id: Option<String>,
    pub level: usize,
    /// Only the root lacks a remove control.
    pub removable: bool,
    pub kind: ViewKind,
}

/// Pre-order list of views, root first.
///
/// `operators_for` supplies the operator options of each rule's field.
pub fn build<F>(root: &Group, config: &QueryConfig, operators_for: F) -> Vec<NodeView>
where
    F: Fn(&str) -> Vec<OptionSpec>,
{
    let mut views = vec![group_view(root, None, 0, config)];
    push_children(root, 0, config, &operators_for, &mut views);
    views
}

fn push_children<F>(
    group: &Group,
    level: usize,
    config: &QueryConfig,
    operators_for: &F,
    views: &mut Vec<NodeView>,
) where
    F: Fn(&str) -> Vec<OptionSpec>,
{
    for child in &group.rules {
        match child {
            Node::Rule(rule) => views.push(NodeView {
                id: rule.id.clone(),
                parent_id: Some(group.id.clone()),
                level,
                removable: true,
                kind: ViewKind::Rule {
                    field: rule.field.clone(),
                    fields: config.fields.clone(),
                    operator: rule.operator.clone(),
                    operators: operators_for(&rule.field),
                    value: rule.value.clone(),
                },
            }),
            Node::Group(nested) => {
                views.push(group_view(nested, Some(&group.id), level, config));
                push_children(nested, level + 1, config, operators_for, views);
            }
        }
    }
}

fn group_view(group: &Group, parent_id: Option<&str>, level: usize, config: &QueryConfig) -> NodeView {
    NodeView {
        id: group.id.clone(),
        parent_id: parent_id.map(str::to_string),
        level,
        removable: parent_id.is_some(),
        kind: ViewKind::Group {
            combinator: group.combinator.clone(),
            combinators: config.combinators.clone(),
            child_count: group.rules.len(),
        },
    }
}
