use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qbuild", version)]
#[command(about = "Build and edit nested filter queries stored as JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Query file to read and update
    #[arg(short, long, global = true, default_value = "query.json")]
    pub query: PathBuf,

    /// Configuration file (defaults to config.json in the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new, empty query
    New {
        /// Overwrite an existing query file
        #[arg(long)]
        force: bool,
    },

    /// Show the query as a tree
    #[command(alias = "ls")]
    Show {
        /// Print the raw JSON document instead
        #[arg(long)]
        json: bool,
    },

    /// Append a rule to a group ("root" names the root group)
    #[command(alias = "ar")]
    AddRule {
        parent: String,

        #[arg(long)]
        field: Option<String>,

        #[arg(long)]
        operator: Option<String>,

        /// Rule value, read as JSON when it parses (true, 42, "x")
        #[arg(long)]
        value: Option<String>,
    },

    /// Append an empty group to a group ("root" names the root group)
    #[command(alias = "ag")]
    AddGroup {
        parent: String,

        #[arg(long)]
        combinator: Option<String>,
    },

    /// Remove a rule or group
    #[command(alias = "rm")]
    Remove {
        id: String,

        /// Containing group (looked up when omitted)
        #[arg(long)]
        parent: Option<String>,
    },

    /// Set a property: field, operator, value or combinator
    Set {
        id: String,
        property: String,
        value: String,
    },

    /// Print the nesting level of a node
    Level { id: String },

    /// List the operators offered for a field
    Operators { field: String },
}
