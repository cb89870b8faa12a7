use crate::commands::CmdResult;
use crate::model::{Group, Rule};

use super::helpers::append_child;

pub fn run(root: &mut Group, rule: Rule, parent_id: &str) -> CmdResult {
    append_child(root, rule.into(), parent_id)
}
