//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::SchemaFormat;

/// Interactive schema field editor: build nested field trees and derive a live JSON schema
#[derive(Parser, Debug)]
#[command(name = "rschema")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Document format: simple | json-schema
    #[arg(short, long, global = true)]
    pub format: Option<SchemaFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit a schema interactively (commands read from stdin)
    Repl {
        /// Do not print the document after each change
        #[arg(short, long)]
        quiet: bool,
    },

    /// Replay an editing script and print the resulting document
    Run {
        /// Script file, one command per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Also print the field tree
        #[arg(short, long)]
        tree: bool,
    },

    /// List field kinds and the type they project to
    Kinds,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
