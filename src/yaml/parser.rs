//! Draft and catalog parsing with error handling

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML content, mapping failures to a diagnostic over `content`
pub fn parse_yaml<T: DeserializeOwned>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content).map_err(|e| {
        YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename))
    })
}

/// Read and parse a YAML file, naming it in any diagnostic
pub fn parse_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    parse_yaml(&std::fs::read_to_string(path)?, &path.display().to_string())
}

/// Parse a draft file, choosing JSON or YAML by extension
///
/// Anything other than `.json` is read as YAML.
pub fn parse_document_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return parse_yaml_file(path);
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| YamlError::Json {
        filename: path.display().to_string(),
        message: e.to_string(),
    })
}
