use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::diagnostics::format_diagnostics;
use super::diagnostics::Diagnostic;
use super::diagnostics::LineError;
use super::diagnostics::SourceInfo;
use super::diagnostics::Warning;
use super::record::parse_record;
use super::DeviceRegistry;
use super::RecordError;

/// Identifier used in reports for content that did not come from a file
const INLINE_SOURCE: &str = "<inline>";

/// UTF-8 byte-order mark some editors write at the start of a file
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Failure to read a device file at all. Individual bad lines never produce
/// this; they are collected in the [`LoadReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read device file '{}': {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

/// Outcome of a bulk load: what was read and everything that went wrong.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub source: Option<SourceInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &LineError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Error(e) => Some(e),
            Diagnostic::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Warning(w) => Some(w),
            Diagnostic::Error(_) => None,
        })
    }

    /// Render every diagnostic, see [`format_diagnostics`].
    pub fn format(&self) -> String {
        format_diagnostics(self.source.as_ref(), &self.diagnostics)
    }
}

impl DeviceRegistry {
    /// Create a registry populated from a device file.
    ///
    /// A path that does not exist gives an empty registry and a
    /// [`Warning::MissingFile`]. Bad lines are skipped and reported in the
    /// returned [`LoadReport`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<(Self, LoadReport), LoadError> {
        let mut registry = Self::new();
        let report = registry.load_file(path)?;
        Ok((registry, report))
    }

    /// Load every line of a device file into this registry.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Device file {} does not exist, starting empty",
                    path.display()
                );
                return Ok(LoadReport {
                    source: None,
                    diagnostics: vec![Diagnostic::Warning(Warning::MissingFile {
                        file_path: path.to_path_buf(),
                    })],
                });
            }
            Err(error) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    error,
                })
            }
        };

        info!("Loading devices from {}", path.display());
        Ok(self.load_source(SourceInfo {
            file_path: path.to_path_buf(),
            content,
        }))
    }

    /// Load device records from in-memory text.
    pub fn load_str(&mut self, content: &str) -> LoadReport {
        self.load_source(SourceInfo {
            file_path: PathBuf::from(INLINE_SOURCE),
            content: content.to_string(),
        })
    }

    fn load_source(&mut self, source: SourceInfo) -> LoadReport {
        let mut diagnostics = Vec::new();

        // Spans stay relative to the full content, mark included
        let content = source
            .content
            .strip_prefix(BYTE_ORDER_MARK)
            .unwrap_or(source.content.as_str());
        let mut offset = source.content.len() - content.len();

        for (index, raw) in content.split_inclusive('\n').enumerate() {
            let start = offset;
            offset += raw.len();

            let line = raw.trim_end_matches(&['\n', '\r'][..]);
            if line.trim().is_empty() {
                continue;
            }

            let line_number = index + 1;
            let result = parse_record(line)
                .and_then(|device| self.add(device).map_err(RecordError::from));

            match result {
                Ok(()) => debug!(line = line_number, "Loaded '{}'", line),
                Err(error) => {
                    warn!(line = line_number, "Skipping '{}': {}", line, error);
                    diagnostics.push(Diagnostic::Error(LineError {
                        line_number,
                        line: line.to_string(),
                        span: start..start + line.len(),
                        error,
                    }));
                }
            }
        }

        info!(
            "Loaded {} device(s), skipped {} line(s)",
            self.len(),
            diagnostics.len()
        );

        LoadReport {
            source: Some(source),
            diagnostics,
        }
    }
}
