//! Lookup of files referenced by `@example` tags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{trace, warn};

use folio_core::descriptor::ExampleLocation;

use crate::config::ExamplesConfig;

/// Finds the content of an example.
pub trait ExampleFinder {
    /// Returns the (sliced) content of the example at `location`, or a
    /// placeholder text when the file cannot be found.
    fn find(&self, location: &ExampleLocation) -> String;
}

/// Finds examples on the local file system.
///
/// Candidates are tried in order: every example directory, the source
/// directory, `examples/` under the working directory and the working
/// directory itself.
#[derive(Debug, Clone, Default)]
pub struct FileExampleFinder {
    source_directory: Option<PathBuf>,
    example_directories: Vec<PathBuf>,
    working_directory: Option<PathBuf>,
}

impl FileExampleFinder {
    pub fn new(source_directory: Option<PathBuf>, example_directories: Vec<PathBuf>) -> Self {
        Self {
            source_directory,
            example_directories,
            working_directory: None,
        }
    }

    pub fn from_config(config: &ExamplesConfig) -> Self {
        Self::new(
            config.source_directory().map(Path::to_path_buf),
            config.directories().to_vec(),
        )
    }

    /// Uses `directory` instead of the process working directory.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    pub fn source_directory(&self) -> Option<&Path> {
        self.source_directory.as_deref()
    }

    pub fn example_directories(&self) -> &[PathBuf] {
        &self.example_directories
    }

    fn candidates(&self, file: &str) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = self
            .example_directories
            .iter()
            .map(|directory| directory.join(file))
            .collect();
        if let Some(source) = &self.source_directory {
            candidates.push(source.join(file));
        }
        let working_directory = self
            .working_directory
            .clone()
            .or_else(|| std::env::current_dir().ok());
        if let Some(working_directory) = working_directory {
            candidates.push(working_directory.join("examples").join(file));
            candidates.push(working_directory.join(file));
        }
        candidates
    }
}

impl ExampleFinder for FileExampleFinder {
    fn find(&self, location: &ExampleLocation) -> String {
        for candidate in self.candidates(location.file()) {
            if !candidate.is_file() {
                continue;
            }
            match fs::read_to_string(&candidate) {
                Ok(content) => {
                    trace!(path:? = candidate; "Found example");
                    return slice(&content, location.start(), location.length());
                }
                Err(err) => {
                    warn!(path:? = candidate, err:% = err; "Failed to read example");
                }
            }
        }

        warn!(file = location.file(); "Example file not found");
        format!("** File not found : {} **", location.file())
    }
}

/// Keeps `length` lines starting at line `start` (1-based).
fn slice(content: &str, start: Option<usize>, length: Option<usize>) -> String {
    let Some(start) = start else {
        return content.to_string();
    };
    let lines = content.lines().skip(start.saturating_sub(1));
    let lines: Vec<&str> = match length {
        Some(length) => lines.take(length).collect(),
        None => lines.collect(),
    };
    lines.join("\n")
}
