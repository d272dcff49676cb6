//! Quantifier - cardinality suffix of a target specifier
//!
//! | token   | lower | upper | minimum |
//! |---------|-------|-------|---------|
//! | (none)  | 1     | 1     | 0       |
//! | `*`     | 1     | ∞     | 0       |
//! | `+`     | 1     | ∞     | 1       |
//! | `{N}`   | N     | N     | 0       |
//! | `{L,}`  | L     | ∞     | L       |
//! | `{,U}`  | 1     | U     | 0       |
//! | `{L,U}` | L     | U     | L       |
//!
//! A parsed [`Quantifier`] is immutable. Evaluation state lives in a
//! [`QuantifierCursor`] created for one resolution pass and consumed by
//! [`QuantifierCursor::assert_satisfied`], so a pass can only be asserted once.

use serde::Serialize;
use std::fmt;

use crate::errors::{ResolveError, Result};
use crate::shared::models::{Diagnostic, DiagnosticKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quantifier {
    pub lower_bound: u32,
    /// `None` is unbounded
    pub upper_bound: Option<u32>,
    pub minimum_matches: u32,
    /// Token exactly as written, empty when absent
    token: String,
}

impl Default for Quantifier {
    fn default() -> Self {
        Self {
            lower_bound: 1,
            upper_bound: Some(1),
            minimum_matches: 0,
            token: String::new(),
        }
    }
}

impl Quantifier {
    /// Parse a quantifier token; `None` or `""` yields the implicit quantifier
    pub fn parse(token: Option<&str>) -> Result<Self> {
        let token = token.unwrap_or("");
        Self::parse_token(token).map_err(|(position, reason)| ResolveError::syntax(token, position, reason))
    }

    /// Parse with errors as (offset within token, reason)
    pub(crate) fn parse_token(token: &str) -> std::result::Result<Self, (usize, String)> {
        let (lower_bound, upper_bound, minimum_matches) = match token {
            "" => return Ok(Self::default()),
            "*" => (1, None, 0),
            "+" => (1, None, 1),
            _ => {
                let inner = token
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .ok_or_else(|| (0, format!("unrecognized quantifier '{}'", token)))?;
                match inner.split_once(',') {
                    None => {
                        let n = parse_bound(inner, 1)?;
                        (n, Some(n), 0)
                    }
                    Some(("", "")) => return Err((1, "empty quantifier bounds".to_string())),
                    Some(("", upper)) => (1, Some(parse_bound(upper, 2)?), 0),
                    Some((lower, "")) => {
                        let l = parse_bound(lower, 1)?;
                        (l, None, l)
                    }
                    Some((lower, upper)) => {
                        let l = parse_bound(lower, 1)?;
                        let u = parse_bound(upper, lower.len() + 2)?;
                        if l > u {
                            return Err((1, format!("lower bound {} exceeds upper bound {}", l, u)));
                        }
                        (l, Some(u), l)
                    }
                }
            }
        };
        Ok(Self {
            lower_bound,
            upper_bound,
            minimum_matches,
            token: token.to_string(),
        })
    }

    /// True when no token was written
    pub fn is_implicit(&self) -> bool {
        self.token.is_empty()
    }

    /// Start a fresh evaluation pass
    pub fn cursor(&self) -> QuantifierCursor<'_> {
        QuantifierCursor {
            quantifier: self,
            ordinal: 1,
            matches: 0,
        }
    }

    fn accepts(&self, ordinal: u32) -> bool {
        self.lower_bound <= ordinal && self.upper_bound.map_or(true, |upper| ordinal <= upper)
    }
}

fn parse_bound(digits: &str, offset: usize) -> std::result::Result<u32, (usize, String)> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err((offset, format!("expected a number, found '{}'", digits)));
    }
    digits
        .parse::<u32>()
        .map_err(|e| (offset, format!("bound '{}' out of range: {}", digits, e)))
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Single-pass evaluation state for one specifier over one candidate set
#[derive(Debug)]
pub struct QuantifierCursor<'q> {
    quantifier: &'q Quantifier,
    ordinal: u32,
    matches: u32,
}

impl QuantifierCursor<'_> {
    /// Consume the next ordinal; true (and counted) if within bounds
    pub fn matches(&mut self) -> bool {
        let accepted = self.quantifier.accepts(self.ordinal);
        self.ordinal = self.ordinal.saturating_add(1);
        if accepted {
            self.matches += 1;
        }
        accepted
    }

    pub fn matches_so_far(&self) -> u32 {
        self.matches
    }

    /// End the pass: an error below the minimum, a warning on zero matches
    pub fn assert_satisfied(self, subject: &str) -> Option<Diagnostic> {
        let q = self.quantifier;
        if self.matches < q.minimum_matches {
            Some(Diagnostic::new(
                DiagnosticKind::QuantifierUnsatisfied,
                subject,
                format!(
                    "expected at least {} match(es) but found {}",
                    q.minimum_matches, self.matches
                ),
            ))
        } else if self.matches == 0 {
            Some(Diagnostic::new(
                DiagnosticKind::QuantifierEmpty,
                subject,
                "no members matched",
            ))
        } else {
            None
        }
    }
}
