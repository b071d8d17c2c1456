//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, new::NewArgs, schema::SchemaArgs,
    submit::SubmitArgs, summary::SummaryArgs,
};

pub use crate::core::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dlo")]
#[command(author, version, about = "Dental lab order wizard and draft checker")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Config file (default: <config dir>/dlo/config.yaml)
    #[arg(long, global = true, env = "DLO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for drafts and submissions (overrides config)
    #[arg(long, short = 'f', global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log debug events to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an order interactively, step by step
    New(NewArgs),

    /// Check a saved draft step by step
    Check(CheckArgs),

    /// Print the one-line case summary of a draft
    Summary(SummaryArgs),

    /// Validate a draft and emit the submitted order
    Submit(SubmitArgs),

    /// Show case fields and when they are required
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
