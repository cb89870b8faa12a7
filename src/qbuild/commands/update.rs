use crate::commands::{CmdMessage, CmdResult};
use crate::locate::find_node_mut;
use crate::model::{Group, Property};

/// Overwrite one property of the node `node_id`, wherever it sits.
pub fn run(root: &mut Group, node_id: &str, property: Property) -> CmdResult {
    let Some(mut node) = find_node_mut(root, node_id) else {
        tracing::warn!(id = node_id, "node not found for update");
        return CmdResult::unchanged(format!("Node not found: {}", node_id));
    };

    let name = property.name();
    if !node.apply(property) {
        tracing::warn!(id = node_id, property = %name, "property does not apply to node");
        return CmdResult::unchanged(format!("Node {} has no property {}", node_id, name));
    }

    tracing::debug!(id = node_id, property = %name, "updated property");
    let updated = node.to_node();
    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Updated {} on {}",
            name, node_id
        )))
        .with_affected_nodes(vec![updated])
}
