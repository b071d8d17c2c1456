//! `dlo check` command - Step-by-step completeness report for a draft

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::load_draft;
use crate::cli::output::render;
use crate::cli::GlobalOpts;
use crate::core::validator::{field_warnings, first_incomplete_step, missing_fields};
use crate::core::{needs_shade_for, FieldWarning, OrderDraft, Step, StepSequencer};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Draft file (YAML, or JSON with a .json extension)
    pub draft: PathBuf,

    /// Only print problems
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Completion state of one wizard step
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub number: u8,
    pub complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub submittable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_incomplete: Option<Step>,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FieldWarning>,
}

impl CheckReport {
    pub fn build(draft: &OrderDraft) -> Self {
        let needs_shade = needs_shade_for(draft);
        let steps = StepSequencer::visible_steps(needs_shade)
            .into_iter()
            .filter(|s| *s != Step::Review)
            .map(|step| {
                let missing = missing_fields(step, draft);
                StepReport {
                    step,
                    number: StepSequencer::display_step(step, needs_shade),
                    complete: missing.is_empty(),
                    missing,
                }
            })
            .collect();
        let first_incomplete = first_incomplete_step(draft);
        Self {
            submittable: first_incomplete.is_none(),
            first_incomplete,
            steps,
            warnings: field_warnings(draft),
        }
    }
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    number: u8,
    #[tabled(rename = "Step")]
    title: &'static str,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Missing")]
    missing: String,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let draft = load_draft(&args.draft)?;
    let report = CheckReport::build(&draft);

    if let Some(format) = global.format {
        print!("{}", render(&report, format)?);
    } else {
        print_report(&report, &draft, args.quiet);
    }

    match report.first_incomplete {
        None => Ok(()),
        Some(step) => Err(miette::miette!(
            "Draft is not ready to submit: {} is incomplete",
            step.title()
        )),
    }
}

fn print_report(report: &CheckReport, draft: &OrderDraft, quiet: bool) {
    if !quiet {
        let rows: Vec<StepRow> = report
            .steps
            .iter()
            .map(|s| StepRow {
                number: s.number,
                title: s.step.title(),
                status: if s.complete {
                    style("ok").green().to_string()
                } else {
                    style("incomplete").red().to_string()
                },
                missing: s.missing.join(", "),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        println!("{} {}", style("Case:").bold(), crate::core::summary::summary(draft));
    }

    for warning in &report.warnings {
        println!(
            "{} {}: {}",
            style("!").yellow(),
            style(warning.field).yellow(),
            warning.message
        );
    }

    if report.submittable {
        println!("{} Draft is ready to submit", style("✓").green());
    } else if let Some(step) = report.first_incomplete {
        let missing = report
            .steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| s.missing.join(", "))
            .unwrap_or_default();
        println!(
            "{} {} is incomplete (missing: {})",
            style("✗").red(),
            step.title(),
            missing
        );
    }
}
