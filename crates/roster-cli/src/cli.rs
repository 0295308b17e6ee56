//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Browse the portal's tables: search, filter, sort and page through records.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
pub struct Cli {
    /// Log the pipeline's decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Student directory
    Students(TableArgs),
    /// Departments and their headcounts
    Departments(TableArgs),
    /// Registrations for the academic year
    Registrations(TableArgs),
}

impl Command {
    pub fn args(&self) -> &TableArgs {
        match self {
            Command::Students(args) | Command::Departments(args) | Command::Registrations(args) => {
                args
            }
        }
    }
}

/// Options shared by every table.
#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    /// JSON file with the records (defaults to the built-in sample data)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// YAML table configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Free-text search over the table's search fields
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Exact-match filter; repeat to combine. FIELD=all lifts the filter
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Sort by this field instead of the table's default
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, value_name = "N")]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Match "ecole" against "École"
    #[arg(long)]
    pub fold_accents: bool,

    /// List the distinct values of FIELD (the filter's options) and exit
    #[arg(long, value_name = "FIELD")]
    pub list_values: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned table with a pagination footer
    Text,
    /// The page and its metadata as JSON
    Json,
    /// Every matching record as CSV, ignoring pagination
    Csv,
}
