//! Member Resolver
//!
//! Decides which members of one target type a [`TargetSpecifier`] selects.
//! Candidates are visited once, left to right in declaration order, through
//! a single quantifier cursor that is asserted exactly once at the end.

use tracing::debug;

use crate::features::descriptor::parameters_match;
use crate::features::target_spec::TargetSpecifier;
use crate::shared::models::{
    Diagnostic, DiagnosticKind, MemberCandidate, TypeDecl, TypeSig, STATIC_INITIALIZER_NAME,
};

/// Matched members plus whatever was reported along the way
#[derive(Debug, Default)]
pub struct Resolution<'t> {
    pub matches: Vec<&'t MemberCandidate>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution<'_> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Resolves specifiers against the members of one target type
#[derive(Debug, Clone, Copy)]
pub struct MemberResolver<'t> {
    target: &'t TypeDecl,
}

impl<'t> MemberResolver<'t> {
    pub fn new(target: &'t TypeDecl) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'t TypeDecl {
        self.target
    }

    /// Resolve against the target's methods
    pub fn resolve_method(&self, spec: &TargetSpecifier) -> Resolution<'t> {
        self.resolve(spec, &self.target.methods)
    }

    /// Resolve against an ordered candidate catalogue of the target
    pub fn resolve(&self, spec: &TargetSpecifier, candidates: &'t [MemberCandidate]) -> Resolution<'t> {
        let mut resolution = Resolution::default();
        if !spec.applies_to(&self.target.name) {
            debug!(spec = %spec, target = %self.target.name, "Specifier names another owner");
            return resolution;
        }

        let eligible: Vec<&'t MemberCandidate> = candidates
            .iter()
            .filter(|candidate| self.name_matches(spec, candidate))
            .filter(|candidate| self.descriptor_matches(spec, candidate))
            .collect();

        if spec.quantifier.is_implicit()
            && spec.descriptor.is_none()
            && spec.name.is_some()
            && eligible.len() > 1
        {
            resolution.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::AmbiguousTarget,
                    &spec.raw,
                    format!(
                        "{} members of {} match by name; add a descriptor or quantifier",
                        eligible.len(),
                        self.target.name
                    ),
                )
                .emit(),
            );
            return resolution;
        }

        let mut cursor = spec.quantifier.cursor();
        for candidate in eligible {
            if cursor.matches() {
                resolution.matches.push(candidate);
            }
        }

        if let Some(report) = cursor.assert_satisfied(&spec.raw) {
            let report = if report.kind == DiagnosticKind::QuantifierEmpty && spec.quantifier.is_implicit() {
                self.not_found(&spec.raw)
            } else {
                report
            };
            resolution.diagnostics.push(report.emit());
        }
        resolution
    }

    /// Exact name with erased parameters equal to `params`
    pub fn find_method_exact(&self, name: &str, params: &[TypeSig]) -> Option<&'t MemberCandidate> {
        self.target.methods.iter().find(|candidate| {
            candidate.name == name && parameters_match(candidate, &self.target.type_parameters, params)
        })
    }

    pub fn find_field(&self, name: &str) -> Option<&'t MemberCandidate> {
        self.target.field(name)
    }

    /// TargetNotFound report naming the target type
    pub fn not_found(&self, subject: &str) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::TargetNotFound,
            subject,
            format!("not found in {}", self.target.name),
        )
    }

    fn name_matches(&self, spec: &TargetSpecifier, candidate: &MemberCandidate) -> bool {
        match spec.name.as_deref() {
            None => true,
            Some(_) if spec.targets_constructor() => candidate.is_constructor(),
            Some(STATIC_INITIALIZER_NAME) => candidate.is_static_initializer(),
            Some(name) => candidate.name == name,
        }
    }

    fn descriptor_matches(&self, spec: &TargetSpecifier, candidate: &MemberCandidate) -> bool {
        match &spec.descriptor {
            None => true,
            Some(_) if candidate.kind.is_field() => false,
            Some(descriptor) => {
                parameters_match(candidate, &self.target.type_parameters, &descriptor.params)
            }
        }
    }
}
