//! # shelfsort - Catalog Manager
//!
//! The main binary for the shelfsort library catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/shelfsort (THE BINARY)              │
//! │                                                          │
//! │  ┌────────────┐   ┌───────────────┐   ┌──────────────┐   │
//! │  │    CLI     │   │ Catalog Store │   │  Generator   │   │
//! │  │   (clap)   │   │    (JSON)     │   │    (rand)    │   │
//! │  └─────┬──────┘   └───────┬───────┘   └──────┬───────┘   │
//! │        └──────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │                  ┌─────────────────┐                     │
//! │                  │ shelfsort-core  │                     │
//! │                  │  (THE ENGINE)   │                     │
//! │                  └─────────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! shelfsort add-book -t "Dune" -a "Frank Herbert" -i 0441013597
//! shelfsort sort books -k title --then and:available:available
//! shelfsort bench books --sizes 10,100,1000 --secondary
//! shelfsort import members -f people.csv
//! shelfsort export books -o books.csv
//! ```

use clap::Parser;
use shelfsort::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // SHELFSORT_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("SHELFSORT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "shelfsort=debug,shelfsort_core=debug"
    } else {
        "shelfsort=info,shelfsort_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
