//! Custom assertions for resolution results

use mixin_resolve::{Diagnostic, DiagnosticKind, Resolution};

/// Assert the matched members, by `Owner.name(desc)` key, in order
pub fn assert_matches(resolution: &Resolution<'_>, expected: &[&str]) {
    let actual: Vec<String> = resolution.matches.iter().map(|m| m.key().to_string()).collect();
    assert_eq!(
        actual, expected,
        "Unexpected matches; diagnostics: {:?}",
        resolution.diagnostics
    );
}

/// Assert exactly one diagnostic of `kind`
pub fn assert_single_diagnostic(diagnostics: &[Diagnostic], kind: DiagnosticKind) {
    assert_eq!(
        diagnostics.len(),
        1,
        "Expected one {kind} diagnostic, got: {:?}",
        diagnostics
    );
    assert_eq!(diagnostics[0].kind, kind);
}

pub fn assert_no_diagnostics(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics, got: {:?}",
        diagnostics
    );
}
