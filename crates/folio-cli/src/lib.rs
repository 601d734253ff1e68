//! CLI logic for the Folio documentation compiler.
//!
//! Loads a reflected project, compiles it and reports what was found.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use folio::{DocumentationBuilder, FolioError, analyzer::AnalyzerReport};

/// Run the Folio CLI application
///
/// Reads the reflected project named by `args`, builds and compiles it and
/// returns the analysis of the compiled project.
///
/// # Errors
///
/// Returns `FolioError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed reflection input
/// - Build and compiler pass failures
pub fn run(args: &Args) -> Result<AnalyzerReport, FolioError> {
    info!(input_path = args.input; "Compiling project");

    let app_config = config::load_config(args.config.as_ref())?;
    let json = fs::read_to_string(&args.input)?;

    let builder = DocumentationBuilder::new(app_config);
    let project = builder.build_from_json(&json)?;
    let report = builder.analyze(&project);

    info!(files = report.files(); "Project compiled successfully");
    Ok(report)
}
