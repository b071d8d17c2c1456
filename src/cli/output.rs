//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;

/// Serialize a draft or submission in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write to `output`, or stdout when none is given
pub fn emit<T: Serialize>(value: &T, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = render(value, format)?;
    match output {
        Some(path) => std::fs::write(path, rendered).into_diagnostic(),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

/// Format implied by a file extension, if recognised
pub fn format_for_path(path: &Path) -> Option<OutputFormat> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "json" => Some(OutputFormat::Json),
        "yaml" | "yml" => Some(OutputFormat::Yaml),
        _ => None,
    }
}
