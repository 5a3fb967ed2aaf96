//! # shelfsort CLI Module
//!
//! Command-line interface for the catalog manager and sorting benchmarks.
//!
//! ## Available Commands
//!
//! - `add-book` - Add a validated book to the catalog
//! - `add-member` - Add a validated member to the catalog
//! - `list` - List books, members or transactions
//! - `borrow` - Lend a book to a member
//! - `return` - Take a book back from a member
//! - `fields` - Show the sortable fields of an entity
//! - `sort` - Sort an entity by a key with optional tie-breakers
//! - `bench` - Time both algorithms on synthetic data
//! - `import` - Append books or members from a CSV file
//! - `export` - Write books or members to a CSV file

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand, ValueEnum};
use shelfsort_core::{Algorithm, LogicalExpression, ShelfError};
use std::fmt;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// shelfsort - library catalog manager with pluggable sorting
///
/// Sorts books, members and loans by any field, breaking ties with
/// AND / OR / IMPLIES expressions over boolean fields.
#[derive(Parser, Debug)]
#[command(name = "shelfsort")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (defaults to ./shelfsort.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog JSON files
    #[arg(short = 'D', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    AddBook {
        /// Book title (1-100 characters)
        #[arg(short, long)]
        title: String,

        /// Author name (letters, spaces, dots, hyphens, apostrophes)
        #[arg(short, long)]
        author: String,

        /// ISBN-10 or ISBN-13, hyphens allowed
        #[arg(short, long)]
        isbn: String,
    },

    /// Add a member
    AddMember {
        /// Member name (letters and spaces)
        #[arg(short, long)]
        name: String,

        /// 10-digit phone number or e-mail address
        #[arg(short, long)]
        contact: String,
    },

    /// List catalog entries
    List {
        /// Which collection to list
        #[arg(value_enum)]
        entity: EntityKind,
    },

    /// Lend a book to a member
    Borrow {
        /// Book ID
        #[arg(short, long)]
        book: u64,

        /// Member ID
        #[arg(short, long)]
        member: u64,
    },

    /// Return a borrowed book
    Return {
        /// Book ID
        #[arg(short, long)]
        book: u64,

        /// Member ID
        #[arg(short, long)]
        member: u64,
    },

    /// Show the fields an entity can be sorted on
    Fields {
        /// Which entity
        #[arg(value_enum)]
        entity: EntityKind,
    },

    /// Sort catalog entries
    Sort {
        /// Which collection to sort
        #[arg(value_enum)]
        entity: EntityKind,

        /// Primary sort key
        #[arg(short, long)]
        key: String,

        /// Sorting algorithm (insertion, merge)
        #[arg(short, long, default_value = "merge")]
        algorithm: Algorithm,

        /// Tie-break expression `operator:left:right`, repeatable
        #[arg(short, long = "then")]
        then: Vec<LogicalExpression>,
    },

    /// Benchmark both algorithms on synthetic data
    Bench {
        /// Which record type to generate
        #[arg(value_enum, default_value = "books")]
        entity: CatalogKind,

        /// Data sizes (comma-separated); overrides the config file
        #[arg(short, long, value_delimiter = ',')]
        sizes: Vec<usize>,

        /// Also run every size with the default tie-breaker
        #[arg(long)]
        secondary: bool,

        /// Chart output path; overrides the config file
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Append books or members from a CSV file
    Import {
        /// Which collection to import into
        #[arg(value_enum)]
        entity: CatalogKind,

        /// CSV file with a header row
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Write books or members to a CSV file
    Export {
        /// Which collection to export
        #[arg(value_enum)]
        entity: CatalogKind,

        /// Output file; a bare file name lands in the data directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Catalog collections.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// `books.json`
    Books,
    /// `members.json`
    Members,
    /// `transactions.json`
    Transactions,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Books => "books",
            EntityKind::Members => "members",
            EntityKind::Transactions => "transactions",
        })
    }
}

/// Collections that can be benchmarked and moved through CSV.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Books (benchmarks key on title and tie-break on availability)
    Books,
    /// Members (benchmarks key on name and tie-break on having loans)
    Members,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatalogKind::Books => "books",
            CatalogKind::Members => "members",
        })
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration: file, then environment, then CLI flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, ShelfError> {
    let mut config = Config::load(cli.config.as_deref())?.with_env();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ShelfError> {
    let config = resolve_config(&cli)?;
    let data_dir = config.data_dir.as_path();
    let json = cli.json;

    match cli.command {
        Commands::AddBook {
            title,
            author,
            isbn,
        } => cmd_add_book(data_dir, json, &title, &author, &isbn),
        Commands::AddMember { name, contact } => cmd_add_member(data_dir, json, &name, &contact),
        Commands::List { entity } => cmd_list(data_dir, json, entity),
        Commands::Borrow { book, member } => cmd_borrow(data_dir, json, book, member),
        Commands::Return { book, member } => cmd_return(data_dir, json, book, member),
        Commands::Fields { entity } => cmd_fields(json, entity),
        Commands::Sort {
            entity,
            key,
            algorithm,
            then,
        } => cmd_sort(data_dir, json, entity, &key, algorithm, then),
        Commands::Bench {
            entity,
            sizes,
            secondary,
            chart,
        } => {
            let sizes = if sizes.is_empty() {
                config.benchmark.sizes.clone()
            } else {
                sizes
            };
            let chart = chart.unwrap_or_else(|| config.benchmark.chart_path.clone());
            cmd_bench(json, entity, &sizes, secondary, &chart)
        }
        Commands::Import { entity, file } => cmd_import(data_dir, json, entity, &file),
        Commands::Export { entity, output } => cmd_export(data_dir, json, entity, &output),
    }
}
