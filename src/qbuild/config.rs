use crate::error::{QbError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// One selectable entry: a field, an operator or a combinator.
///
/// `name` is what ends up in the query; `label` is only shown to people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub label: String,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

static DEFAULT_OPERATORS: Lazy<Vec<OptionSpec>> = Lazy::new(|| {
    vec![
        OptionSpec::new("null", "Is Null"),
        OptionSpec::new("notNull", "Is Not Null"),
        OptionSpec::new("in", "In"),
        OptionSpec::new("notIn", "Not In"),
        OptionSpec::new("=", "="),
        OptionSpec::new("!=", "!="),
        OptionSpec::new("<", "<"),
        OptionSpec::new(">", ">"),
        OptionSpec::new("<=", "<="),
        OptionSpec::new(">=", ">="),
    ]
});

static DEFAULT_COMBINATORS: Lazy<Vec<OptionSpec>> =
    Lazy::new(|| vec![OptionSpec::new("and", "AND"), OptionSpec::new("or", "OR")]);

pub fn default_operators() -> Vec<OptionSpec> {
    DEFAULT_OPERATORS.clone()
}

pub fn default_combinators() -> Vec<OptionSpec> {
    DEFAULT_COMBINATORS.clone()
}

/// Display text for one control. Opaque to the query model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Translation {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            label: None,
        }
    }

    fn labelled(label: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
            label: Some(label.to_string()),
        }
    }

    /// The short label if there is one, else the title.
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Translations {
    pub fields: Translation,
    pub operators: Translation,
    pub value: Translation,
    pub remove_rule: Translation,
    pub remove_group: Translation,
    pub add_rule: Translation,
    pub add_group: Translation,
    pub combinators: Translation,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            fields: Translation::titled("Fields"),
            operators: Translation::titled("Operators"),
            value: Translation::titled("Value"),
            remove_rule: Translation::labelled("x", "Remove rule"),
            remove_group: Translation::labelled("x", "Remove group"),
            add_rule: Translation::labelled("+ Rule", "Add rule"),
            add_group: Translation::labelled("+ Group", "Add group"),
            combinators: Translation::titled("Combinators"),
        }
    }
}

/// Everything the editor needs to seed and display nodes.
///
/// Stored as `config.json`. Operators and combinators fall back to the
/// built-in lists; fields have no sensible default and must be supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryConfig {
    #[serde(default)]
    pub fields: Vec<OptionSpec>,

    #[serde(default = "default_operators")]
    pub operators: Vec<OptionSpec>,

    #[serde(default = "default_combinators")]
    pub combinators: Vec<OptionSpec>,

    #[serde(default)]
    pub translations: Translations,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            operators: default_operators(),
            combinators: default_combinators(),
            translations: Translations::default(),
        }
    }
}

impl QueryConfig {
    pub fn with_fields(fields: Vec<OptionSpec>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(config_path)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(QbError::Io)?;
        let config: QueryConfig =
            serde_json::from_str(&content).map_err(QbError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QbError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QbError::Serialization)?;
        fs::write(config_path, content).map_err(QbError::Io)?;
        Ok(())
    }

    /// Check that every list the factory draws defaults from is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(QbError::EmptyFields);
        }
        if self.operators.is_empty() {
            return Err(QbError::EmptyOperators);
        }
        if self.combinators.is_empty() {
            return Err(QbError::EmptyCombinators);
        }
        Ok(())
    }
}
