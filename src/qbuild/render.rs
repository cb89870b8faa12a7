use colored::Colorize;
use qbuild::api::{CmdMessage, MessageLevel};
use qbuild::config::{OptionSpec, Translations};
use qbuild::view::{NodeView, ViewKind};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 72;
const INDENT: &str = "  ";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// One line per node, ids right-aligned in a column.
pub(crate) fn print_tree(views: &[NodeView]) {
    for view in views {
        let depth = if view.parent_id.is_some() {
            view.level + 1
        } else {
            0
        };
        let indent = INDENT.repeat(depth);

        let (text, styled) = match &view.kind {
            ViewKind::Group {
                combinator,
                combinators,
                child_count,
            } => {
                let label = combinator_label(combinator, combinators);
                let text = if *child_count == 0 {
                    format!("{} (empty)", label)
                } else {
                    label.clone()
                };
                let styled = if *child_count == 0 {
                    format!("{} {}", label.bold().cyan(), "(empty)".dimmed())
                } else {
                    label.bold().cyan().to_string()
                };
                (text, styled)
            }
            ViewKind::Rule {
                field,
                fields,
                operator,
                operators,
                value,
            } => {
                let text = format!(
                    "{} {} {}",
                    option_label(field, fields),
                    option_label(operator, operators),
                    format_value(value)
                );
                (text.clone(), text)
            }
        };

        let available = LINE_WIDTH.saturating_sub(indent.width() + view.id.width() + 1);
        let (text, styled) = if text.width() > available {
            let cut = truncate_to_width(&text, available);
            (cut.clone(), cut)
        } else {
            (text, styled)
        };
        let padding = available.saturating_sub(text.width()) + 1;

        println!(
            "{}{}{}{}",
            indent,
            styled,
            " ".repeat(padding),
            view.id.dimmed()
        );
    }
}

pub(crate) fn print_operators(field: &str, operators: &[OptionSpec], translations: &Translations) {
    println!("{} ({})", translations.operators.title.bold(), field);
    let width = operators.iter().map(|op| op.name.width()).max().unwrap_or(0);
    for op in operators {
        let padding = width - op.name.width();
        println!(
            "{}{}{}  {}",
            INDENT,
            op.name,
            " ".repeat(padding),
            op.label.dimmed()
        );
    }
}

fn combinator_label(name: &str, combinators: &[OptionSpec]) -> String {
    combinators
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| name.to_uppercase())
}

fn option_label(name: &str, options: &[OptionSpec]) -> String {
    options
        .iter()
        .find(|o| o.name == name)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| name.to_string())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
