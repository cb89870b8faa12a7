use clap::Parser;
use directories::ProjectDirs;
use qbuild::api::QueryBuilder;
use qbuild::config::QueryConfig;
use qbuild::error::{QbError, Result};
use qbuild::model::{parse_value, Group, Property};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

mod args;
mod render;
use args::{Cli, Commands};

const ROOT_ALIAS: &str = "root";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct AppContext {
    session: QueryBuilder,
    query_path: PathBuf,
    latest: Rc<RefCell<Option<Group>>>,
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let path = cli.query;

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::New { force } => handle_new(config, path, force),
        Commands::Show { json } => handle_show(&open(config, path)?, json),
        Commands::AddRule {
            parent,
            field,
            operator,
            value,
        } => handle_add_rule(&mut open(config, path)?, &parent, field, operator, value),
        Commands::AddGroup { parent, combinator } => {
            handle_add_group(&mut open(config, path)?, &parent, combinator)
        }
        Commands::Remove { id, parent } => handle_remove(&mut open(config, path)?, &id, parent),
        Commands::Set {
            id,
            property,
            value,
        } => handle_set(&mut open(config, path)?, &id, &property, &value),
        Commands::Level { id } => handle_level(&open(config, path)?, &id),
        Commands::Operators { field } => handle_operators(&open(config, path)?, &field),
    }
}

fn load_config(path: Option<&Path>) -> Result<QueryConfig> {
    if let Some(path) = path {
        return QueryConfig::load_file(path);
    }
    match ProjectDirs::from("com", "qbuild", "qbuild") {
        Some(dirs) => QueryConfig::load(dirs.config_dir()),
        None => Ok(QueryConfig::default()),
    }
}

fn load_query(path: &Path) -> Result<Option<Group>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

fn save_query(path: &Path, query: &Group) -> Result<()> {
    let content = serde_json::to_string_pretty(query)?;
    fs::write(path, content)?;
    Ok(())
}

/// Start a session on the query file, creating a fresh query if it is absent.
fn open(config: QueryConfig, query_path: PathBuf) -> Result<AppContext> {
    let query = load_query(&query_path)?;
    init_context(config, query, query_path)
}

fn init_context(config: QueryConfig, query: Option<Group>, query_path: PathBuf) -> Result<AppContext> {
    let mut session = QueryBuilder::new(config, query)?;

    let latest = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&latest);
    session.mount(move |query: Group| *slot.borrow_mut() = Some(query));

    Ok(AppContext {
        session,
        query_path,
        latest,
    })
}

/// Write the most recent snapshot back to the query file.
fn persist(ctx: &AppContext) -> Result<()> {
    match ctx.latest.borrow().as_ref() {
        Some(query) => save_query(&ctx.query_path, query),
        None => Ok(()),
    }
}

fn resolve_id(ctx: &AppContext, id: &str) -> String {
    if id == ROOT_ALIAS {
        ctx.session.root_id().to_string()
    } else {
        id.to_string()
    }
}

fn handle_new(config: QueryConfig, path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(QbError::Api(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let ctx = init_context(config, None, path)?;
    persist(&ctx)?;
    println!(
        "Created query {} in {}",
        ctx.session.root_id(),
        ctx.query_path.display()
    );
    Ok(())
}

fn handle_show(ctx: &AppContext, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ctx.session.snapshot())?);
    } else {
        render::print_tree(&ctx.session.view());
    }
    Ok(())
}

fn handle_add_rule(
    ctx: &mut AppContext,
    parent: &str,
    field: Option<String>,
    operator: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let parent = resolve_id(ctx, parent);
    let mut rule = ctx.session.create_rule()?;
    if let Some(field) = field {
        rule = rule.with_field(field);
    }
    if let Some(operator) = operator {
        rule = rule.with_operator(operator);
    }
    if let Some(value) = value {
        rule = rule.with_value(parse_value(&value));
    }

    let result = ctx.session.add_rule(rule, &parent);
    persist(ctx)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_add_group(ctx: &mut AppContext, parent: &str, combinator: Option<String>) -> Result<()> {
    let parent = resolve_id(ctx, parent);
    let mut group = ctx.session.create_group()?;
    if let Some(combinator) = combinator {
        group = group.with_combinator(combinator);
    }

    let result = ctx.session.add_group(group, &parent);
    persist(ctx)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, id: &str, parent: Option<String>) -> Result<()> {
    let id = resolve_id(ctx, id);
    let parent = match parent {
        Some(parent) => resolve_id(ctx, &parent),
        None => match ctx.session.parent_id(&id) {
            Some(parent) => parent.to_string(),
            None => {
                return Err(QbError::Api(format!(
                    "No containing group for {} (the root cannot be removed)",
                    id
                )))
            }
        },
    };

    let is_group = ctx
        .session
        .find_node(&id)
        .map(|node| node.is_group())
        .unwrap_or(false);
    let result = if is_group {
        ctx.session.remove_group(&id, &parent)
    } else {
        ctx.session.remove_rule(&id, &parent)
    };
    persist(ctx)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_set(ctx: &mut AppContext, id: &str, property: &str, value: &str) -> Result<()> {
    let id = resolve_id(ctx, id);
    let property = Property::parse(property, value)?;

    let result = ctx.session.update_property(&id, property);
    persist(ctx)?;
    render::print_messages(&result.messages);
    Ok(())
}

fn handle_level(ctx: &AppContext, id: &str) -> Result<()> {
    let id = resolve_id(ctx, id);
    match ctx.session.level_of(&id) {
        Some(level) => println!("{}", level),
        None => println!("not found"),
    }
    Ok(())
}

fn handle_operators(ctx: &AppContext, field: &str) -> Result<()> {
    let operators = ctx.session.operators_for(field);
    render::print_operators(field, &operators, &ctx.session.config().translations);
    Ok(())
}
