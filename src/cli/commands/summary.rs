//! `dlo summary` command - Print a draft's case summary

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_draft;
use crate::core::summary::{review_lines, summary};

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Draft file (YAML, or JSON with a .json extension)
    pub draft: PathBuf,

    /// Print every review line, not just the case summary
    #[arg(long, short = 'a')]
    pub all: bool,
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let draft = load_draft(&args.draft)?;

    if !args.all {
        println!("{}", summary(&draft));
        return Ok(());
    }

    let lines = review_lines(&draft);
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in lines {
        let label = format!("{:<width$}", label, width = width);
        println!("{}  {}", style(label).bold(), value);
    }
    Ok(())
}
