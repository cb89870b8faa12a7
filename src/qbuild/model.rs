//! # Query Tree Model
//!
//! A query is a tree with a [`Group`] at the root. Groups join their ordered
//! children with a combinator (`and`, `or`, ...); children are either nested
//! groups or leaf [`Rule`]s (field / operator / value).
//!
//! Nodes never point at their parent. Whoever mutates the tree names the
//! parent explicitly by id, see `commands`.
//!
//! ## Serialized Shape
//!
//! ```text
//! { "id": "g-1", "combinator": "and", "rules": [
//!     { "id": "r-2", "field": "age", "operator": "=", "value": "30" },
//!     { "id": "g-3", "combinator": "or", "rules": [] }
//! ] }
//! ```
//!
//! There is no discriminant on the wire: an object with `combinator` and
//! `rules` is a group, anything else must be a rule. In memory the two are
//! distinct variants of [`Node`], so classifying a node is a tag check.

use crate::error::{QbError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub type NodeId = String;

fn empty_value() -> Value {
    Value::String(String::new())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: NodeId,
    pub field: String,
    pub operator: String,
    #[serde(default = "empty_value")]
    pub value: Value,
}

impl Rule {
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: NodeId,
    pub combinator: String,
    pub rules: Vec<Node>,
}

impl Group {
    pub fn with_combinator(mut self, combinator: impl Into<String>) -> Self {
        self.combinator = combinator.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    // Group must come first: a rule object never has `combinator` + `rules`.
    Group(Group),
    Rule(Rule),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Group(g) => &g.id,
            Node::Rule(r) => &r.id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            Node::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(r) => Some(r),
            Node::Group(_) => None,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Group(g) => NodeRef::Group(g),
            Node::Rule(r) => NodeRef::Rule(r),
        }
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

/// A borrowed node anywhere in the tree, the root included.
///
/// The root is held as a bare [`Group`] rather than a [`Node`], so lookups hand
/// back this view instead of `&Node`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Group(&'a Group),
    Rule(&'a Rule),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            NodeRef::Group(g) => &g.id,
            NodeRef::Rule(r) => &r.id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NodeRef::Group(_))
    }

    pub fn to_node(&self) -> Node {
        match *self {
            NodeRef::Group(g) => Node::Group(g.clone()),
            NodeRef::Rule(r) => Node::Rule(r.clone()),
        }
    }
}

#[derive(Debug)]
pub enum NodeMut<'a> {
    Group(&'a mut Group),
    Rule(&'a mut Rule),
}

impl NodeMut<'_> {
    /// Overwrite one property in place.
    ///
    /// Returns `false` when the property does not exist on this variant
    /// (e.g. `combinator` on a rule); the node is left untouched.
    pub fn apply(&mut self, property: Property) -> bool {
        match (self, property) {
            (NodeMut::Rule(r), Property::Field(field)) => r.field = field,
            (NodeMut::Rule(r), Property::Operator(operator)) => r.operator = operator,
            (NodeMut::Rule(r), Property::Value(value)) => r.value = value,
            (NodeMut::Group(g), Property::Combinator(combinator)) => g.combinator = combinator,
            _ => return false,
        }
        true
    }

    pub fn to_node(&self) -> Node {
        match self {
            NodeMut::Group(g) => Node::Group((**g).clone()),
            NodeMut::Rule(r) => Node::Rule((**r).clone()),
        }
    }
}

/// Names of the editable node properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    Field,
    Operator,
    Value,
    Combinator,
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyName::Field => write!(f, "field"),
            PropertyName::Operator => write!(f, "operator"),
            PropertyName::Value => write!(f, "value"),
            PropertyName::Combinator => write!(f, "combinator"),
        }
    }
}

impl FromStr for PropertyName {
    type Err = QbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "field" => Ok(PropertyName::Field),
            "operator" => Ok(PropertyName::Operator),
            "value" => Ok(PropertyName::Value),
            "combinator" => Ok(PropertyName::Combinator),
            other => Err(QbError::UnknownProperty(other.to_string())),
        }
    }
}

/// Read user text as a JSON value when it parses (`true`, `42`, `"x"`,
/// `[1,2]`), keeping it as a plain string otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// A property assignment: which property, and its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Field(String),
    Operator(String),
    Value(Value),
    Combinator(String),
}

impl Property {
    pub fn name(&self) -> PropertyName {
        match self {
            Property::Field(_) => PropertyName::Field,
            Property::Operator(_) => PropertyName::Operator,
            Property::Value(_) => PropertyName::Value,
            Property::Combinator(_) => PropertyName::Combinator,
        }
    }

    /// Build an assignment from user text; values go through [`parse_value`].
    pub fn parse(name: &str, raw: &str) -> Result<Self> {
        let property = match name.parse::<PropertyName>()? {
            PropertyName::Field => Property::Field(raw.to_string()),
            PropertyName::Operator => Property::Operator(raw.to_string()),
            PropertyName::Combinator => Property::Combinator(raw.to_string()),
            PropertyName::Value => Property::Value(parse_value(raw)),
        };
        Ok(property)
    }
}
