//! Interactive editor for case records, driven by the schema registry

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::cases::inlay_onlay::{is_valid_surface_pattern, DEFAULT_SURFACE};
use crate::cases::{Arch, CaseDetails};
use crate::core::tooth::{join_teeth, parse_teeth, ToothCode, ToothParseError};
use crate::core::OrderDraftStore;
use crate::schema::registry::{CaseSchemaRegistry, FieldKind, FieldSpec, Requirement};

/// Prompts for the active case record's fields
pub struct CaseWizard {
    registry: CaseSchemaRegistry,
    theme: ColorfulTheme,
}

impl CaseWizard {
    pub fn new() -> Self {
        Self {
            registry: CaseSchemaRegistry::new(),
            theme: ColorfulTheme::default(),
        }
    }

    /// Walk the fields of the active case, writing answers through the store
    ///
    /// Conditional fields are re-evaluated after each answer, so choosing a
    /// denture type brings in that subtype's fields.
    pub fn run(&self, store: &mut OrderDraftStore) -> Result<()> {
        let Some(case_type) = store.case_type() else {
            return Ok(());
        };
        let Some(schema) = self.registry.get(case_type) else {
            return Ok(());
        };

        let include_optional = Confirm::with_theme(&self.theme)
            .with_prompt("Fill in optional details too?")
            .default(false)
            .interact()
            .into_diagnostic()?;

        for spec in schema.fields {
            let relevant = match (&spec.requirement, &store.draft().case) {
                (Requirement::Optional, _) => include_optional,
                (requirement, Some(case)) => requirement.is_relevant(case),
                (_, None) => false,
            };
            if relevant {
                self.prompt_field(store, spec)?;
            }
        }
        Ok(())
    }

    fn prompt_field(&self, store: &mut OrderDraftStore, spec: &FieldSpec) -> Result<()> {
        match spec.kind {
            FieldKind::Teeth => self.prompt_teeth(store, spec),
            FieldKind::ImplantSites => self.prompt_implant_sites(store, spec),
            FieldKind::BondedTeeth => self.prompt_bonded_teeth(store, spec),
            FieldKind::Surfaces => self.prompt_surfaces(store),
            // Start and end are asked together
            FieldKind::ToothRange if spec.name == "start_tooth" => self.prompt_bridge(store),
            FieldKind::ToothRange | FieldKind::Derived => Ok(()),
            _ => self.prompt_scalar(store, spec),
        }
    }

    fn prompt_scalar(&self, store: &mut OrderDraftStore, spec: &FieldSpec) -> Result<()> {
        let current = store
            .draft()
            .case
            .as_ref()
            .and_then(|case| serde_json::to_value(case).ok())
            .and_then(|json| json.get(spec.name).cloned())
            .unwrap_or(Value::Null);
        let prompt = field_prompt(spec);

        let value = match spec.kind {
            FieldKind::Choice(options) => {
                let default = current
                    .as_str()
                    .and_then(|c| options.iter().position(|o| *o == c))
                    .unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(options)
                    .default(default)
                    .interact()
                    .into_diagnostic()?;
                Value::from(options[index])
            }
            FieldKind::Arch => {
                let labels: Vec<String> = Arch::ALL.iter().map(|a| a.to_string()).collect();
                let default = current
                    .as_str()
                    .and_then(|c| labels.iter().position(|l| l == c))
                    .unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .items(&labels)
                    .default(default)
                    .interact()
                    .into_diagnostic()?;
                Value::from(labels[index].clone())
            }
            FieldKind::Flag => {
                let answer = Confirm::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .default(current.as_bool().unwrap_or(false))
                    .interact()
                    .into_diagnostic()?;
                Value::from(answer)
            }
            FieldKind::Count => {
                let mut input = Input::<u8>::with_theme(&self.theme).with_prompt(prompt);
                if let Some(n) = current.as_u64().and_then(|n| u8::try_from(n).ok()) {
                    input = input.default(n);
                }
                Value::from(input.interact_text().into_diagnostic()?)
            }
            _ => {
                let answer: String = Input::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .with_initial_text(current.as_str().unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                let answer = answer.trim();
                if answer.is_empty() {
                    Value::Null
                } else {
                    Value::from(answer)
                }
            }
        };

        let mut result = Ok(());
        store.update_case(|case| result = case.set_field(spec.name, value));
        result.map_err(|e| miette::miette!("{}", e))
    }

    fn prompt_teeth(&self, store: &mut OrderDraftStore, spec: &FieldSpec) -> Result<()> {
        let current = store
            .draft()
            .case
            .as_ref()
            .and_then(|case| case.selected_teeth())
            .cloned()
            .unwrap_or_default();
        let wanted = self.ask_teeth(&field_prompt(spec), &current)?;
        for tooth in current.symmetric_difference(&wanted) {
            store.toggle_tooth(*tooth);
        }
        Ok(())
    }

    fn prompt_implant_sites(&self, store: &mut OrderDraftStore, spec: &FieldSpec) -> Result<()> {
        let current = store
            .draft()
            .case
            .as_ref()
            .and_then(|case| case.implant_positions())
            .cloned()
            .unwrap_or_default();
        let wanted = self.ask_teeth(&field_prompt(spec), &current)?;
        for tooth in current.symmetric_difference(&wanted) {
            store.toggle_implant_position(*tooth);
        }
        Ok(())
    }

    fn prompt_bonded_teeth(&self, store: &mut OrderDraftStore, spec: &FieldSpec) -> Result<()> {
        let current = match &store.draft().case {
            Some(CaseDetails::Retainer(r)) => r.bonded_teeth.clone(),
            _ => return Ok(()),
        };
        let wanted = self.ask_teeth(&field_prompt(spec), &current)?;
        for tooth in current.symmetric_difference(&wanted) {
            store.toggle_bonded_tooth(*tooth);
        }
        Ok(())
    }

    fn prompt_surfaces(&self, store: &mut OrderDraftStore) -> Result<()> {
        let record = match &store.draft().case {
            Some(CaseDetails::InlayOnlay(r)) => r.clone(),
            _ => return Ok(()),
        };
        for tooth in &record.selected_teeth {
            let initial = record
                .surface_involvement
                .get(tooth)
                .map(String::as_str)
                .unwrap_or(DEFAULT_SURFACE);
            let pattern: String = Input::with_theme(&self.theme)
                .with_prompt(format!("Surfaces for {} (M, O, D, B, L)", tooth))
                .with_initial_text(initial)
                .validate_with(|input: &String| -> std::result::Result<(), String> {
                    if is_valid_surface_pattern(&input.trim().to_uppercase()) {
                        Ok(())
                    } else {
                        Err("Use letters M, O, D, B, L without repeats".to_string())
                    }
                })
                .interact_text()
                .into_diagnostic()?;
            store.set_surface(*tooth, pattern);
        }
        Ok(())
    }

    fn prompt_bridge(&self, store: &mut OrderDraftStore) -> Result<()> {
        let start = self.ask_tooth("Start tooth")?;
        let end = self.ask_tooth("End tooth")?;
        store.set_bridge_range(start, end);

        let Some(CaseDetails::Bridge(bridge)) = &store.draft().case else {
            return Ok(());
        };
        let span = bridge.span();
        if span.is_empty() {
            println!(
                "{} Start and end must be in the same quadrant",
                style("!").yellow()
            );
            return Ok(());
        }

        let labels: Vec<String> = span.iter().map(|t| t.to_string()).collect();
        let defaults: Vec<bool> = span.iter().map(|t| bridge.abutments.contains(t)).collect();
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Abutment teeth (unchecked teeth are pontics)")
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .into_diagnostic()?;

        let toggles: Vec<ToothCode> = span
            .iter()
            .enumerate()
            .filter(|(i, _)| defaults[*i] != chosen.contains(i))
            .map(|(_, t)| *t)
            .collect();
        for tooth in toggles {
            store.toggle_abutment(tooth);
        }
        Ok(())
    }

    fn ask_tooth(&self, prompt: &str) -> Result<ToothCode> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                input
                    .trim()
                    .parse::<ToothCode>()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .into_diagnostic()?;
        answer
            .trim()
            .parse()
            .map_err(|e: ToothParseError| miette::miette!("{}", e))
    }

    fn ask_teeth(&self, prompt: &str, current: &BTreeSet<ToothCode>) -> Result<BTreeSet<ToothCode>> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(format!("{} (FDI codes, e.g. 11, 21)", prompt))
            .with_initial_text(join_teeth(current))
            .allow_empty(true)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                parse_teeth(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .into_diagnostic()?;
        let teeth = parse_teeth(&answer).map_err(|e| miette::miette!("{}", e))?;
        Ok(teeth.into_iter().collect())
    }
}

impl Default for CaseWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompt text for a field, e.g. "Margin type" or "Pontic design (when ...)"
fn field_prompt(spec: &FieldSpec) -> String {
    let words = spec.name.replace('_', " ");
    let mut chars = words.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    match spec.requirement {
        Requirement::Optional => format!("{} (optional)", label),
        _ => label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CaseType;

    #[test]
    fn test_field_prompt() {
        let registry = CaseSchemaRegistry::new();
        let crown = registry.get(CaseType::Crown).unwrap();
        assert_eq!(field_prompt(crown.field("margin_type").unwrap()), "Margin type");
        assert_eq!(
            field_prompt(crown.field("occlusal_reduction").unwrap()),
            "Occlusal reduction (optional)"
        );
    }
}
