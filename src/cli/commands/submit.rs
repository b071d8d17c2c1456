//! `dlo submit` command - Validate a draft and emit the submitted order

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{load_config, load_draft, resolve_format};
use crate::cli::output::emit;
use crate::cli::GlobalOpts;
use crate::core::{OrderDraftStore, Step};

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Draft file (YAML, or JSON with a .json extension)
    pub draft: PathBuf,

    /// Write the submission here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Submit even if the draft was saved before reaching the review step
    #[arg(long)]
    pub from_any_step: bool,
}

pub fn run(args: SubmitArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let mut draft = load_draft(&args.draft)?;
    if args.from_any_step {
        draft.step = Step::Review;
    }

    let mut store = OrderDraftStore::from_draft(draft);
    let submission = store.submit().into_diagnostic()?;

    let format = resolve_format(global, &config, args.output.as_deref());
    emit(&submission, format, args.output.as_deref())?;

    if let Some(path) = &args.output {
        eprintln!(
            "{} Submitted {} to {}",
            style("✓").green(),
            style(&submission.id).cyan(),
            style(path.display()).dim()
        );
    }
    Ok(())
}
