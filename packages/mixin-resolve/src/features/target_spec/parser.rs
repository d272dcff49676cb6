//! Hand-written specifier grammar
//!
//! `[owner.](name)?(quantifier)?(descriptor)?` or
//! `[Lowner;](name)?(quantifier)?(descriptor)?`
//!
//! The dotted owner is split off first, at the last `.` before any `(`.
//! The remainder is then scanned left to right.

use crate::features::descriptor::parse_method_descriptor;
use crate::features::quantifier::Quantifier;
use crate::errors::ResolveError;
use crate::shared::models::{TypeSig, CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME};

pub(super) struct SyntaxFault {
    pub position: usize,
    pub reason: String,
}

impl SyntaxFault {
    fn at(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

pub(super) struct ParsedParts<'a> {
    pub owner: Option<&'a str>,
    pub name: Option<&'a str>,
    pub quantifier: Quantifier,
    pub descriptor: Option<(Vec<TypeSig>, TypeSig)>,
}

type ParseResult<T> = std::result::Result<T, SyntaxFault>;

pub(super) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

pub(super) fn parse(raw: &str) -> ParseResult<ParsedParts<'_>> {
    let descriptor_start = raw.find('(').unwrap_or(raw.len());

    let (mut owner, mut pos) = match raw[..descriptor_start].rfind('.') {
        Some(dot) => {
            validate_dotted_owner(&raw[..dot])?;
            (Some(&raw[..dot]), dot + 1)
        }
        None => (None, 0),
    };

    if let Some(end) = scan_bytecode_owner(raw, pos, descriptor_start)? {
        if owner.is_some() {
            return Err(SyntaxFault::at(pos, "owner given in both dotted and L...; form"));
        }
        owner = Some(&raw[pos..end]);
        pos = end;
    }

    let name_end = scan_name(raw, pos)?;
    let name = (name_end > pos).then(|| &raw[pos..name_end]);
    pos = name_end;

    let quantifier_end = scan_quantifier(raw, pos)?;
    let quantifier = Quantifier::parse_token(&raw[pos..quantifier_end])
        .map_err(|(offset, reason)| SyntaxFault::at(pos + offset, reason))?;
    pos = quantifier_end;

    let descriptor = if pos < raw.len() {
        if pos != descriptor_start {
            let found = raw[pos..].chars().next().unwrap_or_default();
            return Err(SyntaxFault::at(pos, format!("unexpected '{}'", found)));
        }
        let parsed = parse_method_descriptor(&raw[pos..]).map_err(|e| match e {
            ResolveError::Descriptor { reason, .. } => SyntaxFault::at(pos, reason),
            other => SyntaxFault::at(pos, other.to_string()),
        })?;
        Some(parsed)
    } else {
        None
    };

    Ok(ParsedParts {
        owner,
        name,
        quantifier,
        descriptor,
    })
}

fn validate_dotted_owner(owner: &str) -> ParseResult<()> {
    let mut offset = 0;
    for segment in owner.split('.') {
        if segment.is_empty() {
            return Err(SyntaxFault::at(offset, "empty owner segment"));
        }
        if let Some((i, c)) = segment.char_indices().find(|&(_, c)| !is_name_char(c)) {
            return Err(SyntaxFault::at(offset + i, format!("unexpected '{}' in owner", c)));
        }
        offset += segment.len() + 1;
    }
    Ok(())
}

/// `L...;` owner at `start`, returning the offset just past `;`
///
/// Anything containing `;` before the descriptor must be a bytecode owner.
fn scan_bytecode_owner(raw: &str, start: usize, limit: usize) -> ParseResult<Option<usize>> {
    let Some(semi) = raw[start..limit].find(';').map(|i| start + i) else {
        return Ok(None);
    };
    if !raw[start..].starts_with('L') {
        return Err(SyntaxFault::at(semi, "unexpected ';'"));
    }
    let body = &raw[start + 1..semi];
    if body.is_empty() {
        return Err(SyntaxFault::at(start, "empty owner"));
    }
    if let Some((i, c)) = body
        .char_indices()
        .find(|&(_, c)| !(is_name_char(c) || c == '/'))
    {
        return Err(SyntaxFault::at(start + 1 + i, format!("unexpected '{}' in owner", c)));
    }
    Ok(Some(semi + 1))
}

fn scan_name(raw: &str, start: usize) -> ParseResult<usize> {
    let rest = &raw[start..];
    if rest.starts_with('<') {
        return [CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME]
            .iter()
            .find(|special| rest.starts_with(*special))
            .map(|special| start + special.len())
            .ok_or_else(|| SyntaxFault::at(start, "only <init> and <clinit> may use '<'"));
    }
    let len = rest
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map_or(rest.len(), |(i, _)| i);
    Ok(start + len)
}

fn scan_quantifier(raw: &str, start: usize) -> ParseResult<usize> {
    match raw.as_bytes().get(start) {
        Some(b'*') | Some(b'+') => Ok(start + 1),
        Some(b'{') => raw[start..]
            .find('}')
            .map(|i| start + i + 1)
            .ok_or_else(|| SyntaxFault::at(start, "unterminated quantifier")),
        _ => Ok(start),
    }
}
