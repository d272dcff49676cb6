//! Non-fatal resolution reports
//!
//! Diagnostics never abort a build. Each one is returned to the caller and
//! emitted through `tracing` at the level matching its severity.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Diagnostic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Malformed target specifier
    Syntax,
    /// Malformed metadata or config JSON
    Schema,
    /// Target absent in the inspected type
    TargetNotFound,
    /// Bare name matched several members where one was required
    AmbiguousTarget,
    /// Fewer matches than the quantifier's minimum
    QuantifierUnsatisfied,
    /// Zero matches with a zero minimum
    QuantifierEmpty,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::Schema => "schema",
            DiagnosticKind::TargetNotFound => "target_not_found",
            DiagnosticKind::AmbiguousTarget => "ambiguous_target",
            DiagnosticKind::QuantifierUnsatisfied => "quantifier_unsatisfied",
            DiagnosticKind::QuantifierEmpty => "quantifier_empty",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticKind::QuantifierEmpty => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// What the report is about (a specifier, a file, a handler)
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Log through tracing and hand the diagnostic back
    pub fn emit(self) -> Self {
        match self.severity {
            Severity::Error => tracing::error!(kind = %self.kind, "{}: {}", self.subject, self.message),
            Severity::Warning => tracing::warn!(kind = %self.kind, "{}: {}", self.subject, self.message),
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_quantifier_is_a_warning() {
        for kind in [
            DiagnosticKind::Syntax,
            DiagnosticKind::Schema,
            DiagnosticKind::TargetNotFound,
            DiagnosticKind::AmbiguousTarget,
            DiagnosticKind::QuantifierUnsatisfied,
        ] {
            assert_eq!(kind.default_severity(), Severity::Error);
        }
        assert_eq!(DiagnosticKind::QuantifierEmpty.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(DiagnosticKind::TargetNotFound, "tick", "not found in com.x.Bar");
        assert_eq!(diag.to_string(), "[target_not_found] tick: not found in com.x.Bar");
        assert!(diag.is_error());
    }
}
