//! # site2wiki CLI
//!
//! Command-line interface for converting exported static sites into wiki trees.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site2wiki")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (site2wiki.yml is used when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print per-file diagnostics
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter site2wiki.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Convert an exported site into a wiki tree
    Convert {
        /// Directory holding the exported site
        source: PathBuf,

        /// Directory the wiki tree is written into
        output: PathBuf,

        /// Selector for the content region of each page
        #[arg(long)]
        content_selector: Option<String>,

        /// Selector used when the content selector matches nothing
        #[arg(long)]
        fallback_selector: Option<String>,

        /// Write a _Sidebar.md into every folder holding pages
        #[arg(long)]
        sidebars: bool,

        /// Basename override, e.g. --rename index.html=Home.md (repeatable)
        #[arg(long = "rename", value_name = "FROM=TO", value_parser = commands::parse_rename)]
        renames: Vec<(String, String)>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            commands::init_tracing(cli.debug)?;
            commands::init_project(path.as_deref())
        }
        Commands::Convert {
            source,
            output,
            content_selector,
            fallback_selector,
            sidebars,
            renames,
        } => {
            let overrides = commands::ConvertOverrides {
                content_selector,
                fallback_selector,
                sidebars,
                renames,
                debug: cli.debug,
            };
            commands::convert_site(cli.config.as_deref(), &source, &output, overrides)
        }
    }
}
