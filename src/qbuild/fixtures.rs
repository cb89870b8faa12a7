//! Test fixtures: deterministic trees and an observer that records snapshots.
//!
//! Ids come from [`SequentialIds`], so a fixture always starts with root
//! `g-1` and numbers every node after it in creation order.

use crate::api::QueryBuilder;
use crate::commands::{add_group, add_rule};
use crate::config::{OptionSpec, QueryConfig};
use crate::factory;
use crate::id::SequentialIds;
use crate::model::{Group, Rule};
use std::cell::RefCell;
use std::rc::Rc;

/// `fields=[age]`, `operators=[=]`, `combinators=[and]`.
pub fn scenario_config() -> QueryConfig {
    QueryConfig {
        fields: vec![OptionSpec::new("age", "Age")],
        operators: vec![OptionSpec::new("=", "=")],
        combinators: vec![OptionSpec::new("and", "AND")],
        ..QueryConfig::default()
    }
}

pub fn sample_config() -> QueryConfig {
    QueryConfig::with_fields(vec![
        OptionSpec::new("firstName", "First Name"),
        OptionSpec::new("lastName", "Last Name"),
        OptionSpec::new("age", "Age"),
        OptionSpec::new("isDev", "Is a Developer?"),
    ])
}

pub struct QueryFixture {
    config: QueryConfig,
    ids: SequentialIds,
    root: Group,
}

impl Default for QueryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryFixture {
    pub fn new() -> Self {
        Self::with_config(sample_config())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        let mut ids = SequentialIds::new();
        let root = factory::create_group(&config, &mut ids).unwrap();
        Self { config, ids, root }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn new_rule(&mut self) -> Rule {
        factory::create_rule(&self.config, &mut self.ids).unwrap()
    }

    pub fn new_group(&mut self) -> Group {
        factory::create_group(&self.config, &mut self.ids).unwrap()
    }

    pub fn with_rule(mut self, parent_id: &str) -> Self {
        let rule = self.new_rule();
        let result = add_rule::run(&mut self.root, rule, parent_id);
        assert!(result.changed, "fixture parent {} not found", parent_id);
        self
    }

    pub fn with_group(mut self, parent_id: &str) -> Self {
        let group = self.new_group();
        let result = add_group::run(&mut self.root, group, parent_id);
        assert!(result.changed, "fixture parent {} not found", parent_id);
        self
    }

    pub fn into_root(self) -> Group {
        self.root
    }

    /// A session over the fixture tree that keeps numbering where the fixture
    /// left off.
    pub fn into_session(self) -> QueryBuilder<SequentialIds> {
        QueryBuilder::with_id_generator(self.config, Some(self.root), self.ids).unwrap()
    }
}

/// Shared log of every snapshot an observer received.
#[derive(Clone, Default)]
pub struct SnapshotLog {
    snapshots: Rc<RefCell<Vec<Group>>>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observer(&self) -> impl FnMut(Group) + 'static {
        let snapshots = Rc::clone(&self.snapshots);
        move |query| snapshots.borrow_mut().push(query)
    }

    pub fn snapshots(&self) -> Vec<Group> {
        self.snapshots.borrow().clone()
    }

    pub fn last(&self) -> Option<Group> {
        self.snapshots.borrow().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_numbers_nodes_in_creation_order() {
        let root = QueryFixture::new()
            .with_rule("g-1")
            .with_group("g-1")
            .with_rule("g-3")
            .into_root();

        assert_eq!(root.id, "g-1");
        assert_eq!(root.rules[0].id(), "r-2");
        assert_eq!(root.rules[1].as_group().unwrap().rules[0].id(), "r-4");
    }

    #[test]
    fn session_continues_numbering() {
        let mut qb = QueryFixture::new().with_rule("g-1").into_session();
        assert_eq!(qb.create_rule().unwrap().id, "r-3");
    }
}
