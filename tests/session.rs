use qbuild::api::QueryBuilder;
use qbuild::config::{OptionSpec, QueryConfig};
use qbuild::model::{Group, Node, Property};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn age_config() -> QueryConfig {
    QueryConfig {
        fields: vec![OptionSpec::new("age", "Age")],
        operators: vec![OptionSpec::new("=", "=")],
        combinators: vec![OptionSpec::new("and", "AND")],
        ..QueryConfig::default()
    }
}

type Snapshots = Rc<RefCell<Vec<Group>>>;

fn mounted() -> (QueryBuilder, Snapshots) {
    let snapshots: Snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    let mut qb = QueryBuilder::new(age_config(), None).unwrap();
    qb.mount(move |query: Group| sink.borrow_mut().push(query));
    (qb, snapshots)
}

fn last(snapshots: &Snapshots) -> Group {
    snapshots.borrow().last().cloned().unwrap()
}

fn collect_ids(group: &Group, ids: &mut Vec<String>) {
    ids.push(group.id.clone());
    for child in &group.rules {
        match child {
            Node::Group(g) => collect_ids(g, ids),
            Node::Rule(r) => ids.push(r.id.clone()),
        }
    }
}

#[test]
fn mount_emits_empty_root() {
    let (_qb, snapshots) = mounted();

    let root = last(&snapshots);
    assert_eq!(snapshots.borrow().len(), 1);
    assert_eq!(root.combinator, "and");
    assert!(root.rules.is_empty());
    assert!(root.id.starts_with("g-"));
}

#[test]
fn added_rule_uses_defaults_then_updates() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let rule = qb.create_rule().unwrap();
    assert!(rule.id.starts_with("r-"));
    let rule_id = rule.id.clone();
    qb.add_rule(rule, &root);
    qb.update_property(&rule_id, Property::Value(json!("30")));

    let query = last(&snapshots);
    let rule = query.rules[0].as_rule().unwrap();
    assert_eq!(rule.field, "age");
    assert_eq!(rule.operator, "=");
    assert_eq!(rule.value, json!("30"));
    assert_eq!(snapshots.borrow().len(), 3);
}

#[test]
fn rule_lands_inside_nested_group() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let group = qb.create_group().unwrap();
    let group_id = group.id.clone();
    qb.add_group(group, &root);
    let rule = qb.create_rule().unwrap();
    let rule_id = rule.id.clone();
    qb.add_rule(rule, &group_id);

    let query = last(&snapshots);
    let nested = query.rules[0].as_group().unwrap();
    assert_eq!(nested.id, group_id);
    assert_eq!(nested.rules[0].id(), rule_id);

    assert_eq!(qb.level_of(&root), Some(0));
    assert_eq!(qb.level_of(&group_id), Some(0));
    assert_eq!(qb.level_of(&rule_id), Some(1));
    assert_eq!(qb.level_of("g-missing"), None);
}

#[test]
fn update_touches_only_the_target() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let first = qb.create_rule().unwrap();
    let second = qb.create_rule().unwrap();
    let first_id = first.id.clone();
    qb.add_rule(first, &root);
    qb.add_rule(second, &root);
    qb.set_value(&first_id, "30");
    let before = last(&snapshots);

    qb.set_value(&first_id, "31");

    let after = last(&snapshots);
    assert_eq!(after.rules[0].as_rule().unwrap().value, json!("31"));
    assert_eq!(after.rules[1], before.rules[1]);
    assert_eq!(after.combinator, before.combinator);
}

#[test]
fn removing_twice_leaves_tree_unchanged() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let rule = qb.create_rule().unwrap();
    let rule_id = rule.id.clone();
    qb.add_rule(rule, &root);

    assert!(qb.remove_rule(&rule_id, &root).changed);
    let once = last(&snapshots);
    let again = qb.remove_rule(&rule_id, &root);

    assert!(!again.changed);
    assert_eq!(last(&snapshots), once);
    assert!(once.rules.is_empty());
    assert_eq!(snapshots.borrow().len(), 4);
}

#[test]
fn removing_group_drops_its_subtree() {
    let (mut qb, _snapshots) = mounted();
    let root = qb.root_id().to_string();

    let group = qb.create_group().unwrap();
    let group_id = group.id.clone();
    qb.add_group(group, &root);
    let rule = qb.create_rule().unwrap();
    let rule_id = rule.id.clone();
    qb.add_rule(rule, &group_id);

    qb.remove_group(&group_id, &root);

    assert!(qb.find_node(&group_id).is_none());
    assert!(qb.find_node(&rule_id).is_none());
}

#[test]
fn ids_stay_unique() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    for _ in 0..5 {
        let rule = qb.create_rule().unwrap();
        qb.add_rule(rule, &root);
        let group = qb.create_group().unwrap();
        let group_id = group.id.clone();
        qb.add_group(group, &root);
        let rule = qb.create_rule().unwrap();
        qb.add_rule(rule, &group_id);
    }

    let mut ids = Vec::new();
    collect_ids(&last(&snapshots), &mut ids);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 16);
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn snapshots_do_not_follow_later_edits() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let rule = qb.create_rule().unwrap();
    let rule_id = rule.id.clone();
    qb.add_rule(rule, &root);
    let held = last(&snapshots);

    qb.set_value(&rule_id, "99");
    qb.set_combinator(&root, "or");

    assert_eq!(held.rules[0].as_rule().unwrap().value, json!(""));
    assert_eq!(held.combinator, "and");
}

#[test]
fn children_keep_insertion_order() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let mut expected = Vec::new();
    for _ in 0..3 {
        let rule = qb.create_rule().unwrap();
        expected.push(rule.id.clone());
        qb.add_rule(rule, &root);
    }
    qb.remove_rule(&expected[1], &root);
    expected.remove(1);

    let order: Vec<_> = last(&snapshots)
        .rules
        .iter()
        .map(|child| child.id().to_string())
        .collect();
    assert_eq!(order, expected);
}

#[test]
fn unknown_ids_are_reported_and_still_notify() {
    let (mut qb, snapshots) = mounted();

    let rule = qb.create_rule().unwrap();
    let result = qb.add_rule(rule, "g-nowhere");
    assert!(!result.changed);
    assert!(result.has_warnings());

    let result = qb.set_field("r-nowhere", "age");
    assert!(!result.changed);

    assert_eq!(snapshots.borrow().len(), 3);
    assert!(last(&snapshots).rules.is_empty());
}

#[test]
fn query_round_trips_through_json() {
    let (mut qb, _snapshots) = mounted();
    let root = qb.root_id().to_string();
    let group = qb.create_group().unwrap();
    let group_id = group.id.clone();
    qb.add_group(group, &root);
    let rule = qb.create_rule().unwrap();
    qb.add_rule(rule, &group_id);

    let text = serde_json::to_string(&qb.snapshot()).unwrap();
    let restored: Group = serde_json::from_str(&text).unwrap();
    assert_eq!(restored, qb.snapshot());

    let reopened = QueryBuilder::new(age_config(), Some(restored)).unwrap();
    assert_eq!(reopened.root_id(), root);
}

#[test]
fn removed_rule_cannot_be_added_again() {
    let (mut qb, snapshots) = mounted();
    let root = qb.root_id().to_string();

    let rule = qb.create_rule().unwrap();
    let rule_id = rule.id.clone();
    qb.add_rule(rule.clone(), &root);
    qb.remove_rule(&rule_id, &root);

    let again = qb.add_rule(rule, &root);

    assert!(!again.changed);
    assert!(again.has_warnings());
    assert!(qb.find_node(&rule_id).is_none());
    assert!(last(&snapshots).rules.is_empty());
}
