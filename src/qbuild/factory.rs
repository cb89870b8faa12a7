//! Builds new nodes seeded from the first entry of each configured list.
//!
//! Nodes are only ever created here, so their defaults always track the
//! current configuration.

use crate::config::QueryConfig;
use crate::error::{QbError, Result};
use crate::id::{IdGenerator, NodeKind};
use crate::model::{Group, Rule};
use serde_json::Value;

pub fn create_rule<G: IdGenerator>(config: &QueryConfig, ids: &mut G) -> Result<Rule> {
    let field = config.fields.first().ok_or(QbError::EmptyFields)?;
    let operator = config.operators.first().ok_or(QbError::EmptyOperators)?;

    Ok(Rule {
        id: ids.next_id(NodeKind::Rule),
        field: field.name.clone(),
        operator: operator.name.clone(),
        value: Value::String(String::new()),
    })
}

pub fn create_group<G: IdGenerator>(config: &QueryConfig, ids: &mut G) -> Result<Group> {
    let combinator = config
        .combinators
        .first()
        .ok_or(QbError::EmptyCombinators)?;

    Ok(Group {
        id: ids.next_id(NodeKind::Group),
        combinator: combinator.name.clone(),
        rules: Vec::new(),
    })
}
