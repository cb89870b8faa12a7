//! # Editor Session
//!
//! [`QueryBuilder`] is the single entry point for editing a query. It owns the
//! live tree and the configuration, and it is a **thin facade**: structural
//! work is done by `commands/*.rs`, lookups by `locate`, node creation by
//! `factory`.
//!
//! ## Role and Responsibilities
//!
//! The session:
//! - **Owns** the root group; callers address nodes by id, never by reference
//! - **Dispatches** each edit to its command
//! - **Notifies** the observer with a fresh snapshot after every edit
//!
//! Ids removed from the tree are remembered for the life of the session, and
//! inserting a node that carries one is refused.
//!
//! Every mutating method produces exactly one snapshot, even when the command
//! turned out to be a no-op (unknown id, stale parent). Mounting produces one
//! more, carrying the initial tree.
//!
//! ## What the Session Does NOT Do
//!
//! - Validate that a rule's field/operator pair makes sense
//! - Keep history, persist, or render anything
//!
//! ## Generic Over IdGenerator
//!
//! `QueryBuilder<G: IdGenerator>` defaults to random UUID ids. Tests use
//! `SequentialIds` for predictable `g-1`, `r-2`, ... ids.

use crate::commands;
use crate::commands::helpers::reject_retired;
use crate::config::{OptionSpec, QueryConfig};
use crate::error::{QbError, Result};
use crate::factory;
use crate::id::{IdGenerator, UuidIds};
use crate::locate;
use crate::model::{Group, Node, NodeId, NodeRef, Property, Rule};
use crate::notify::{Notifier, QueryObserver};
use crate::view::{self, NodeView};
use serde_json::Value;
use std::collections::HashSet;

/// Field-specific operator lookup. Returning `None` falls back to the
/// configured operator list.
pub type OperatorResolver = Box<dyn Fn(&str) -> Option<Vec<OptionSpec>>>;

pub struct QueryBuilder<G: IdGenerator = UuidIds> {
    root: Group,
    config: QueryConfig,
    ids: G,
    operator_resolver: Option<OperatorResolver>,
    notifier: Notifier,
    retired: HashSet<NodeId>,
}

impl QueryBuilder<UuidIds> {
    /// Start a session on `query`, or on a fresh empty group when `None`.
    ///
    /// Fails when the configuration cannot seed default nodes.
    pub fn new(config: QueryConfig, query: Option<Group>) -> Result<Self> {
        Self::with_id_generator(config, query, UuidIds)
    }
}

impl<G: IdGenerator> QueryBuilder<G> {
    pub fn with_id_generator(config: QueryConfig, query: Option<Group>, mut ids: G) -> Result<Self> {
        config.validate()?;
        let root = match query {
            Some(query) => query,
            None => factory::create_group(&config, &mut ids)?,
        };
        tracing::debug!(root = %root.id, "query session created");

        Ok(Self {
            root,
            config,
            ids,
            operator_resolver: None,
            notifier: Notifier::new(),
            retired: HashSet::new(),
        })
    }

    pub fn with_operator_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Option<Vec<OptionSpec>> + 'static,
    {
        self.operator_resolver = Some(Box::new(resolver));
        self
    }

    /// Register the observer and deliver the initial snapshot to it.
    pub fn mount<O: QueryObserver + 'static>(&mut self, observer: O) {
        self.notifier.set_observer(observer);
        self.notifier.notify(&self.root);
    }

    pub fn unmount(&mut self) {
        self.notifier.clear_observer();
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn root_id(&self) -> &str {
        &self.root.id
    }

    /// A deep copy of the current tree.
    pub fn snapshot(&self) -> Group {
        self.root.clone()
    }

    /// Snapshots delivered so far, the mount snapshot included.
    pub fn notifications(&self) -> usize {
        self.notifier.delivered()
    }

    // --- Node creation ---

    pub fn create_rule(&mut self) -> Result<Rule> {
        factory::create_rule(&self.config, &mut self.ids)
    }

    pub fn create_group(&mut self) -> Result<Group> {
        factory::create_group(&self.config, &mut self.ids)
    }

    // --- Mutations (each notifies once) ---

    pub fn add_rule(&mut self, rule: Rule, parent_id: &str) -> CmdResult {
        let result = match reject_retired(&Node::Rule(rule.clone()), &self.retired) {
            Some(refused) => refused,
            None => commands::add_rule::run(&mut self.root, rule, parent_id),
        };
        self.commit(result)
    }

    pub fn add_group(&mut self, group: Group, parent_id: &str) -> CmdResult {
        let result = match reject_retired(&Node::Group(group.clone()), &self.retired) {
            Some(refused) => refused,
            None => commands::add_group::run(&mut self.root, group, parent_id),
        };
        self.commit(result)
    }

    pub fn remove_rule(&mut self, rule_id: &str, parent_id: &str) -> CmdResult {
        let result = commands::remove::run(&mut self.root, rule_id, parent_id);
        self.retire(&result);
        self.commit(result)
    }

    pub fn remove_group(&mut self, group_id: &str, parent_id: &str) -> CmdResult {
        let result = commands::remove::run(&mut self.root, group_id, parent_id);
        self.retire(&result);
        self.commit(result)
    }

    pub fn update_property(&mut self, node_id: &str, property: Property) -> CmdResult {
        let result = commands::update::run(&mut self.root, node_id, property);
        self.commit(result)
    }

    pub fn set_field(&mut self, rule_id: &str, field: impl Into<String>) -> CmdResult {
        self.update_property(rule_id, Property::Field(field.into()))
    }

    pub fn set_operator(&mut self, rule_id: &str, operator: impl Into<String>) -> CmdResult {
        self.update_property(rule_id, Property::Operator(operator.into()))
    }

    pub fn set_value(&mut self, rule_id: &str, value: impl Into<Value>) -> CmdResult {
        self.update_property(rule_id, Property::Value(value.into()))
    }

    pub fn set_combinator(&mut self, group_id: &str, combinator: impl Into<String>) -> CmdResult {
        self.update_property(group_id, Property::Combinator(combinator.into()))
    }

    fn retire(&mut self, result: &CmdResult) {
        for node in &result.affected_nodes {
            self.retired
                .extend(locate::collect_ids(node).into_iter().map(str::to_string));
        }
    }

    fn commit(&mut self, result: CmdResult) -> CmdResult {
        self.notifier.notify(&self.root);
        result
    }

    // --- Wholesale replacement (no notification) ---

    /// Replace the whole tree, discarding the current one.
    pub fn set_query(&mut self, query: Group) {
        tracing::debug!(old = %self.root.id, new = %query.id, "query replaced");
        self.root = query;
    }

    pub fn set_fields(&mut self, fields: Vec<OptionSpec>) -> Result<()> {
        if fields.is_empty() {
            return Err(QbError::EmptyFields);
        }
        self.config.fields = fields;
        Ok(())
    }

    // --- Queries ---

    pub fn find_node(&self, id: &str) -> Option<NodeRef<'_>> {
        locate::find_node(&self.root, id)
    }

    pub fn parent_id(&self, id: &str) -> Option<&str> {
        locate::parent_of(&self.root, id).map(|parent| parent.id.as_str())
    }

    pub fn level_of(&self, id: &str) -> Option<usize> {
        locate::level_of(&self.root, id)
    }

    /// Operators offered for `field`: the resolver's answer if it has one,
    /// else the configured list.
    pub fn operators_for(&self, field: &str) -> Vec<OptionSpec> {
        self.operator_resolver
            .as_ref()
            .and_then(|resolve| resolve(field))
            .unwrap_or_else(|| self.config.operators.clone())
    }

    pub fn view(&self) -> Vec<NodeView> {
        view::build(&self.root, &self.config, |field| self.operators_for(field))
    }
}

impl<G: IdGenerator + std::fmt::Debug> std::fmt::Debug for QueryBuilder<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("root", &self.root)
            .field("ids", &self.ids)
            .field("has_operator_resolver", &self.operator_resolver.is_some())
            .field("notifier", &self.notifier)
            .field("retired", &self.retired.len())
            .finish()
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
