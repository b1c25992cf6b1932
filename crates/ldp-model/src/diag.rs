#![deny(unsafe_code)]

use std::fmt;

/// Severity of a single pipeline diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One finding recorded during a pipeline run.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Pipeline stage or operation that produced the finding.
    pub stage: String,
    /// Column the finding refers to, when it is column-scoped.
    pub column: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(
                f,
                "[{}] {} ({}): {}",
                self.severity, self.stage, column, self.message
            ),
            None => write!(f, "[{}] {}: {}", self.severity, self.stage, self.message),
        }
    }
}

/// Diagnostics sink scoped to one pipeline run.
///
/// Created by the caller and passed `&mut` into each column-level operation.
/// Column operations record data-quality findings here instead of configuring
/// any process-wide logging themselves; the caller decides how to render the
/// entries once the run finishes.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn info(&mut self, stage: &str, column: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Info, stage, column, message);
    }

    pub fn warning(&mut self, stage: &str, column: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Warning, stage, column, message);
    }

    pub fn error(&mut self, stage: &str, column: Option<&str>, message: impl Into<String>) {
        self.record(Severity::Error, stage, column, message);
    }

    fn record(
        &mut self,
        severity: Severity,
        stage: &str,
        column: Option<&str>,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            stage: stage.to_string(),
            column: column.map(str::to_string),
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}
