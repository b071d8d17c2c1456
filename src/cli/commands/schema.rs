//! `dlo schema` command - Case fields and their requirement rules

use console::style;
use miette::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::core::shade::NO_SHADE_CASE_TYPES;
use crate::core::CaseType;
use crate::schema::{CaseSchemaRegistry, FieldKind};

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Case type to describe (e.g. crown, inlay-onlay, all_on_x)
    pub case_type: Option<CaseType>,
}

#[derive(Tabled)]
struct CaseTypeRow {
    #[tabled(rename = "Case type")]
    id: &'static str,
    #[tabled(rename = "Name")]
    label: &'static str,
    #[tabled(rename = "Fields")]
    fields: usize,
    #[tabled(rename = "Shade")]
    shade: &'static str,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Input")]
    kind: &'static str,
    #[tabled(rename = "Required")]
    requirement: String,
    #[tabled(rename = "Values")]
    values: String,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let registry = CaseSchemaRegistry::new();

    let Some(case_type) = args.case_type else {
        let rows: Vec<CaseTypeRow> = registry
            .iter()
            .map(|schema| CaseTypeRow {
                id: schema.case_type.as_str(),
                label: schema.case_type.label(),
                fields: schema.fields.len(),
                shade: if NO_SHADE_CASE_TYPES.contains(&schema.case_type) {
                    "no"
                } else {
                    "yes"
                },
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        return Ok(());
    };

    let schema = registry
        .get(case_type)
        .ok_or_else(|| miette::miette!("No schema for case type {}", case_type))?;

    println!("{}", style(case_type.label()).bold());
    let rows: Vec<FieldRow> = schema
        .fields
        .iter()
        .map(|f| FieldRow {
            name: f.name,
            kind: f.kind.label(),
            requirement: f.requirement.label(),
            values: match f.kind {
                FieldKind::Choice(options) => options.join(" | "),
                FieldKind::Arch => "upper | lower | both".to_string(),
                FieldKind::Surfaces => "M O D B L, e.g. MOD".to_string(),
                _ => String::new(),
            },
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
