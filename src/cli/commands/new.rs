//! `dlo new` command - Interactive order wizard

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{load_catalog, load_config, load_draft, resolve_format};
use crate::cli::output::emit;
use crate::cli::GlobalOpts;
use crate::core::summary::review_lines;
use crate::core::validator::parse_age;
use crate::core::{
    Catalog, CaseType, Config, DraftError, Gender, OrderDraftStore, Priority, Step,
    StepSequencer,
};
use crate::schema::CaseWizard;

/// Where the draft is written on "save and quit" when no `--draft` is given
const DEFAULT_DRAFT_FILE: &str = "order-draft.yaml";

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Write the submitted order here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Resume from this draft file; "save and quit" writes back to it
    #[arg(long)]
    pub draft: Option<PathBuf>,
}

/// What to do after a step's prompts
enum Action {
    Next,
    Back,
    SaveAndQuit,
    Cancel,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let catalog = load_catalog(&config)?;
    let theme = ColorfulTheme::default();
    let case_wizard = CaseWizard::new();

    let mut store = match &args.draft {
        Some(path) if path.is_file() => OrderDraftStore::from_draft(load_draft(path)?),
        _ => {
            let mut store = OrderDraftStore::new();
            store.set_priority(config.default_priority);
            store
        }
    };

    loop {
        let step = store.step();
        println!(
            "\n{} {}",
            style(format!(
                "Step {}/{}",
                store.display_step(),
                store.display_total()
            ))
            .dim(),
            style(step.title()).bold().cyan()
        );

        if step == Step::Review {
            match review(&mut store, &theme)? {
                ReviewOutcome::Submit => match store.submit() {
                    Ok(submission) => {
                        let format = resolve_format(global, &config, args.output.as_deref());
                        emit(&submission, format, args.output.as_deref())?;
                        eprintln!(
                            "{} Order {} submitted: {}",
                            style("✓").green(),
                            style(&submission.id).cyan(),
                            submission.summary
                        );
                        return Ok(());
                    }
                    Err(err) => {
                        println!("{} {}", style("✗").red(), err);
                        if let DraftError::Incomplete { step, .. } = err {
                            store.go_to(step);
                        }
                        continue;
                    }
                },
                ReviewOutcome::Stay => continue,
                ReviewOutcome::SaveAndQuit => return save_draft(&store, &args, global, &config),
                ReviewOutcome::Cancel => return cancel(&mut store),
            }
        }

        match step {
            Step::Lab => prompt_lab(&mut store, &catalog, &config, &theme)?,
            Step::CaseType => prompt_case_type(&mut store, &theme)?,
            Step::Selection => case_wizard.run(&mut store)?,
            Step::Impression => prompt_impression(&mut store, &catalog, &theme)?,
            Step::Material => prompt_material(&mut store, &catalog, &theme)?,
            Step::Shade => prompt_shade(&mut store, &catalog, &theme)?,
            Step::PatientInfo => prompt_patient(&mut store, &theme)?,
            Step::Details => prompt_details(&mut store, &theme)?,
            Step::Review => {}
        }

        match choose_action(&theme, step)? {
            Action::Next => {
                if !store.next_step() {
                    println!(
                        "{} Missing: {}",
                        style("✗").red(),
                        store.missing_fields().join(", ")
                    );
                }
            }
            Action::Back => {
                store.prev_step();
            }
            Action::SaveAndQuit => return save_draft(&store, &args, global, &config),
            Action::Cancel => return cancel(&mut store),
        }
    }
}

fn choose_action(theme: &ColorfulTheme, step: Step) -> Result<Action> {
    let mut items = vec!["Next"];
    if step != Step::first() {
        items.push("Back");
    }
    items.push("Save draft and quit");
    items.push("Cancel order");

    let index = Select::with_theme(theme)
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;
    Ok(match items[index] {
        "Next" => Action::Next,
        "Back" => Action::Back,
        "Save draft and quit" => Action::SaveAndQuit,
        _ => Action::Cancel,
    })
}

fn save_draft(
    store: &OrderDraftStore,
    args: &NewArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<()> {
    let path = args
        .draft
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DRAFT_FILE));
    let format = resolve_format(global, config, Some(&path));
    emit(store.draft(), format, Some(&path))?;
    println!(
        "{} Draft saved to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn cancel(store: &mut OrderDraftStore) -> Result<()> {
    store.reset();
    println!("{} Order cancelled", style("✗").yellow());
    Ok(())
}

fn prompt_lab(
    store: &mut OrderDraftStore,
    catalog: &Catalog,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<()> {
    if catalog.labs.is_empty() {
        return Err(miette::miette!("The catalog has no labs"));
    }
    let current = store
        .draft()
        .lab_id
        .clone()
        .or_else(|| config.default_lab.clone());
    let default = current
        .and_then(|id| catalog.labs.iter().position(|lab| lab.id == id))
        .unwrap_or(0);
    let items: Vec<String> = catalog
        .labs
        .iter()
        .map(|lab| match &lab.city {
            Some(city) => format!("{} ({})", lab.name, city),
            None => lab.name.clone(),
        })
        .collect();

    let index = Select::with_theme(theme)
        .with_prompt("Lab")
        .items(&items)
        .default(default)
        .interact()
        .into_diagnostic()?;
    store.set_lab(catalog.labs[index].id.clone());
    Ok(())
}

fn prompt_case_type(store: &mut OrderDraftStore, theme: &ColorfulTheme) -> Result<()> {
    let types = CaseType::all();
    let current = store.case_type();
    let default = current
        .and_then(|ct| types.iter().position(|t| *t == ct))
        .unwrap_or(0);
    let labels: Vec<&str> = types.iter().map(|t| t.label()).collect();

    let index = Select::with_theme(theme)
        .with_prompt("Case type")
        .items(&labels)
        .default(default)
        .interact()
        .into_diagnostic()?;
    let chosen = types[index];

    if current == Some(chosen) {
        let start_over = Confirm::with_theme(theme)
            .with_prompt("Clear the details already entered for this case?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !start_over {
            return Ok(());
        }
    }
    store.set_case_type(chosen);
    Ok(())
}

fn prompt_impression(
    store: &mut OrderDraftStore,
    catalog: &Catalog,
    theme: &ColorfulTheme,
) -> Result<()> {
    let impression = store.draft().impression.clone();
    let physical = Confirm::with_theme(theme)
        .with_prompt("Sending a physical impression? (no = digital scan)")
        .default(impression.has_impression)
        .interact()
        .into_diagnostic()?;
    store.set_has_impression(physical);
    if !physical {
        return Ok(());
    }

    if !catalog.impression_materials.is_empty() {
        let default = impression
            .material
            .as_ref()
            .and_then(|m| catalog.impression_materials.iter().position(|i| i == m))
            .unwrap_or(0);
        let index = Select::with_theme(theme)
            .with_prompt("Impression material")
            .items(&catalog.impression_materials)
            .default(default)
            .interact()
            .into_diagnostic()?;
        store.set_impression_material(Some(catalog.impression_materials[index].clone()));
    }

    let bite = Confirm::with_theme(theme)
        .with_prompt("Bite registration included?")
        .default(impression.has_bite_registration)
        .interact()
        .into_diagnostic()?;
    store.set_bite_registration(bite);

    let opposing = Confirm::with_theme(theme)
        .with_prompt("Opposing model included?")
        .default(impression.has_opposing_model)
        .interact()
        .into_diagnostic()?;
    store.set_opposing_model(opposing);
    Ok(())
}

fn prompt_material(
    store: &mut OrderDraftStore,
    catalog: &Catalog,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(case_type) = store.case_type() else {
        return Ok(());
    };
    let materials = catalog.materials_for(case_type);
    if materials.is_empty() {
        return Err(miette::miette!(
            "The catalog has no materials for {}",
            case_type.label()
        ));
    }

    let default = store
        .draft()
        .material
        .as_ref()
        .and_then(|id| materials.iter().position(|m| &m.id == id))
        .unwrap_or(0);
    let items: Vec<&str> = materials.iter().map(|m| m.name.as_str()).collect();
    let index = Select::with_theme(theme)
        .with_prompt(format!("Material for {}", case_type.label()))
        .items(&items)
        .default(default)
        .interact()
        .into_diagnostic()?;
    store.set_material(Some(materials[index].id.clone()));

    if !store.needs_shade() {
        println!("{}", style("No shade needed for this material").dim());
    }
    Ok(())
}

fn prompt_shade(
    store: &mut OrderDraftStore,
    catalog: &Catalog,
    theme: &ColorfulTheme,
) -> Result<()> {
    if catalog.shades.is_empty() {
        let shade: String = Input::with_theme(theme)
            .with_prompt("Shade")
            .interact_text()
            .into_diagnostic()?;
        store.set_shade(Some(shade.trim().to_string()));
        return Ok(());
    }

    let default = store
        .draft()
        .shade
        .as_ref()
        .and_then(|s| catalog.shades.iter().position(|c| c == s))
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Shade")
        .items(&catalog.shades)
        .default(default)
        .interact()
        .into_diagnostic()?;
    store.set_shade(Some(catalog.shades[index].clone()));
    Ok(())
}

/// Free-text prompt where an empty answer clears the field
fn optional_text(
    theme: &ColorfulTheme,
    prompt: &str,
    current: Option<&str>,
) -> Result<Option<String>> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current.unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

fn prompt_patient(store: &mut OrderDraftStore, theme: &ColorfulTheme) -> Result<()> {
    let patient = store.draft().patient.clone();

    let name = optional_text(theme, "Patient name (optional)", patient.name.as_deref())?;
    store.set_patient_name(name);

    let age: String = Input::with_theme(theme)
        .with_prompt("Age (optional)")
        .with_initial_text(patient.age.map(|a| a.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| parse_age(input).map(|_| ()))
        .interact_text()
        .into_diagnostic()?;
    store.set_patient_age(parse_age(&age).map_err(|e| miette::miette!("{}", e))?);

    let mut genders = vec!["(skip)".to_string()];
    genders.extend(Gender::ALL.iter().map(|g| g.to_string()));
    let default = patient
        .gender
        .and_then(|g| Gender::ALL.iter().position(|x| *x == g))
        .map_or(0, |i| i + 1);
    let index = Select::with_theme(theme)
        .with_prompt("Gender")
        .items(&genders)
        .default(default)
        .interact()
        .into_diagnostic()?;
    store.set_patient_gender(index.checked_sub(1).map(|i| Gender::ALL[i]));

    let phone = optional_text(theme, "Phone (optional)", patient.phone.as_deref())?;
    store.set_patient_phone(phone);
    store.set_patient_pincode(optional_text(
        theme,
        "Delivery pincode (optional)",
        patient.pincode.as_deref(),
    )?);

    for warning in store.warnings() {
        println!("{} {}", style("!").yellow(), warning.message);
    }
    Ok(())
}

fn prompt_details(store: &mut OrderDraftStore, theme: &ColorfulTheme) -> Result<()> {
    let labels: Vec<String> = Priority::ALL.iter().map(|p| p.to_string()).collect();
    let default = Priority::ALL
        .iter()
        .position(|p| *p == store.draft().priority)
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Priority")
        .items(&labels)
        .default(default)
        .interact()
        .into_diagnostic()?;
    store.set_priority(Priority::ALL[index]);

    let instructions = optional_text(
        theme,
        "Instructions for the lab (optional)",
        Some(store.draft().instructions.as_str()),
    )?;
    store.set_instructions(instructions.unwrap_or_default());

    let photos: String = Input::with_theme(theme)
        .with_prompt("Add photo references (comma separated, optional)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    for photo in photos.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        store.add_photo(photo);
    }
    Ok(())
}

enum ReviewOutcome {
    Submit,
    Stay,
    SaveAndQuit,
    Cancel,
}

fn review(store: &mut OrderDraftStore, theme: &ColorfulTheme) -> Result<ReviewOutcome> {
    let lines = review_lines(store.draft());
    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in &lines {
        let label = format!("{:<width$}", label, width = width);
        println!("  {}  {}", style(label).bold(), value);
    }

    let items = [
        "Submit order",
        "Back",
        "Edit a step",
        "Save draft and quit",
        "Cancel order",
    ];
    let index = Select::with_theme(theme)
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;

    Ok(match index {
        0 => ReviewOutcome::Submit,
        1 => {
            store.prev_step();
            ReviewOutcome::Stay
        }
        2 => {
            let steps: Vec<Step> = StepSequencer::visible_steps(store.needs_shade())
                .into_iter()
                .filter(|s| *s != Step::Review)
                .collect();
            let titles: Vec<&str> = steps.iter().map(|s| s.title()).collect();
            let index = Select::with_theme(theme)
                .with_prompt("Edit which step?")
                .items(&titles)
                .interact()
                .into_diagnostic()?;
            store.go_to(steps[index]);
            ReviewOutcome::Stay
        }
        3 => ReviewOutcome::SaveAndQuit,
        _ => ReviewOutcome::Cancel,
    })
}
