//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::cli::output::format_for_path;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Catalog, Config, OrderDraft};
use crate::yaml::parse_document_file;

/// Load configuration from `--config`/`DLO_CONFIG` or the default location
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load(global.config.as_deref()).into_diagnostic()
}

/// Catalog from the config's `catalog_dir`, or the built-in one
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    Ok(Catalog::load(config.catalog_dir.as_deref())?)
}

/// Read a saved draft (YAML, or JSON by extension)
pub fn load_draft(path: &Path) -> Result<OrderDraft> {
    Ok(parse_document_file(path)?)
}

/// Pick the output format: flag, then output extension, then config
pub fn resolve_format(global: &GlobalOpts, config: &Config, output: Option<&Path>) -> OutputFormat {
    global
        .format
        .or_else(|| output.and_then(format_for_path))
        .unwrap_or(config.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_precedence() {
        let mut global = GlobalOpts::default();
        let config = Config::default();
        assert_eq!(resolve_format(&global, &config, None), OutputFormat::Yaml);
        assert_eq!(
            resolve_format(&global, &config, Some(Path::new("o.json"))),
            OutputFormat::Json
        );
        global.format = Some(OutputFormat::Yaml);
        assert_eq!(
            resolve_format(&global, &config, Some(Path::new("o.json"))),
            OutputFormat::Yaml
        );
    }
}
