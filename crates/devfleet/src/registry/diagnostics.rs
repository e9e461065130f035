use std::ops::Range;
use std::path::PathBuf;

use super::RecordError;

/// Source information for where a diagnostic came from
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub file_path: PathBuf,
    pub content: String,
}

/// A diagnostic message that can be either a warning or an error
#[derive(Debug, Clone)]
pub enum Diagnostic {
    Warning(Warning),
    Error(LineError),
}

/// Warnings that don't prevent the registry from being used
#[derive(Debug, Clone)]
pub enum Warning {
    MissingFile { file_path: PathBuf },
}

/// A line that was skipped during a bulk load
#[derive(Debug, Clone)]
pub struct LineError {
    /// 1-based line number
    pub line_number: usize,
    pub line: String,
    /// Byte range of the line within the loaded content
    pub span: Range<usize>,
    pub error: RecordError,
}

impl Diagnostic {
    /// Returns true if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Error(_))
    }

    /// Returns true if this diagnostic is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::Warning(_))
    }
}

/// Format all diagnostics for display.
///
/// Line errors are rendered with Ariadne against `source` when it is given,
/// and as a single plain line otherwise.
pub fn format_diagnostics(source: Option<&SourceInfo>, diagnostics: &[Diagnostic]) -> String {
    use ariadne::Config;
    use ariadne::IndexType;
    use ariadne::Label;
    use ariadne::Report;
    use ariadne::ReportKind;
    use ariadne::Source;

    let mut output = Vec::new();

    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::Warning(Warning::MissingFile { file_path }) => {
                let warning_msg = format!(
                    "Warning: Device file '{}' does not exist, starting with an empty registry\n",
                    file_path.display()
                );
                output.extend_from_slice(warning_msg.as_bytes());
            }
            Diagnostic::Error(line_error) => match source {
                Some(source) => {
                    let file_id = source.file_path.to_string_lossy().to_string();
                    Report::build(ReportKind::Error, (file_id.clone(), line_error.span.clone()))
                        .with_config(
                            Config::default()
                                .with_color(false)
                                .with_index_type(IndexType::Byte),
                        )
                        .with_code(line_error.error.kind())
                        .with_message(format!(
                            "Skipped line {}: {}",
                            line_error.line_number, line_error.error
                        ))
                        .with_label(
                            Label::new((file_id.clone(), line_error.span.clone()))
                                .with_message("this line was not loaded"),
                        )
                        .finish()
                        .write((file_id, Source::from(source.content.as_str())), &mut output)
                        .ok();
                }
                None => {
                    let error_msg = format!(
                        "Error on line {} '{}': {}\n",
                        line_error.line_number, line_error.line, line_error.error
                    );
                    output.extend_from_slice(error_msg.as_bytes());
                }
            },
        }
    }

    String::from_utf8_lossy(&output).to_string()
}
