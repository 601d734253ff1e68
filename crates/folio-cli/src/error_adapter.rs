//! Error adapter for converting FolioError to miette diagnostics.
//!
//! This module provides the bridge between the library's error types and
//! miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use folio::FolioError;

/// Adapter rendering a [`FolioError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a FolioError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FolioError::Io(_) => "folio::io",
            FolioError::Input(_) => "folio::input",
            FolioError::Build(_) => "folio::build",
            FolioError::Compile { .. } => "folio::compile",
            FolioError::Config(_) => "folio::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FolioError::Input(_) => "The input must be a reflected project in JSON format",
            FolioError::Compile { .. } => {
                "Earlier passes completed; the project descriptor is incomplete"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps `err` for rendering with a miette report handler.
pub fn to_reportable(err: &FolioError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let input = folio::DocumentationBuilder::default()
            .build_from_json("[")
            .err()
            .unwrap();
        let adapter = to_reportable(&input);

        assert_eq!(adapter.code().unwrap().to_string(), "folio::input");
        assert!(adapter.help().is_some());
        assert!(adapter.to_string().starts_with("Invalid reflection input"));
    }

    #[test]
    fn test_render_report() {
        let err = FolioError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let mut out = String::new();

        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &to_reportable(&err))
            .unwrap();

        assert!(out.contains("folio::io"));
        assert!(out.contains("gone"));
    }
}
