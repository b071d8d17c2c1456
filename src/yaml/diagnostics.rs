//! Draft file diagnostics rendered through miette

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while reading a draft or catalog file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Invalid JSON in {filename}: {message}")]
    #[diagnostic(code(dlo::json::invalid))]
    Json { filename: String, message: String },

    #[error("Failed to read file: {0}")]
    #[diagnostic(code(dlo::io))]
    Io(#[from] std::io::Error),
}

/// A YAML parse or shape error pointing at the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid YAML in {filename}: {message}")]
#[diagnostic(
    code(dlo::yaml::invalid),
    help("Tooth codes are two-digit FDI numbers such as 36, quadrant 1-4 and position 1-8")
)]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    pub fn from_serde_error(error: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = error.location().map(|loc| {
            let offset = loc.index().min(content.len());
            SourceSpan::from((offset, 1.min(content.len() - offset)))
        });
        Self {
            filename: filename.to_string(),
            message: error.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }

    /// Line (1-based) the error points at, if known
    pub fn line(&self) -> Option<usize> {
        let span = self.span?;
        let source = self.src.inner();
        let offset = span.offset().min(source.len());
        Some(source[..offset].matches('\n').count() + 1)
    }
}
