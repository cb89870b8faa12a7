use crate::commands::CmdResult;
use crate::model::Group;

use super::helpers::append_child;

pub fn run(root: &mut Group, group: Group, parent_id: &str) -> CmdResult {
    append_child(root, group.into(), parent_id)
}
