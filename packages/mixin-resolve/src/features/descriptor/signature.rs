//! Scanning of bytecode type signatures and method descriptors
//!
//! Structural characters are all ASCII, so scanning works on bytes and
//! never splits a multi-byte identifier character.

use crate::errors::{ResolveError, Result};
use crate::shared::models::TypeSig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Base,
    Void,
    Array,
    Class,
    TypeVariable,
}

/// Classify a well-formed signature by its leading character
pub fn signature_kind(signature: &str) -> SignatureKind {
    match signature.as_bytes().first() {
        Some(b'[') => SignatureKind::Array,
        Some(b'V') => SignatureKind::Void,
        Some(b'T') => SignatureKind::TypeVariable,
        Some(b'L') | Some(b'Q') => SignatureKind::Class,
        _ => SignatureKind::Base,
    }
}

/// Name of a type variable signature (`TT;` → `T`)
pub fn type_variable_name(signature: &str) -> Option<&str> {
    signature
        .strip_prefix('T')
        .and_then(|rest| rest.strip_suffix(';'))
        .filter(|name| !name.is_empty())
}

/// Scan one type signature starting at `start`, returning its end offset
pub(crate) fn scan_type_signature(raw: &str, start: usize) -> std::result::Result<usize, String> {
    let bytes = raw.as_bytes();
    let mut i = start;
    while i < bytes.len() && bytes[i] == b'[' {
        i += 1;
    }
    let is_array = i > start;
    let Some(&lead) = bytes.get(i) else {
        return Err("unexpected end of signature".to_string());
    };
    match lead {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Ok(i + 1),
        b'V' if is_array => Err("array of void".to_string()),
        b'V' => Ok(i + 1),
        b'L' | b'Q' => scan_class_signature(bytes, i),
        b'T' => {
            let end = bytes[i + 1..]
                .iter()
                .position(|&b| b == b';')
                .map(|p| i + 1 + p)
                .ok_or_else(|| "unterminated type variable".to_string())?;
            if end == i + 1 {
                return Err("empty type variable name".to_string());
            }
            if bytes[i + 1..end].iter().any(|&b| matches!(b, b'<' | b'>' | b'(' | b')')) {
                return Err("malformed type variable".to_string());
            }
            Ok(end + 1)
        }
        other => Err(format!("unexpected '{}' at offset {}", other as char, i)),
    }
}

fn scan_class_signature(bytes: &[u8], start: usize) -> std::result::Result<usize, String> {
    let mut depth = 0usize;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced '>' at offset {}", i))?;
            }
            b'(' | b')' => return Err(format!("unexpected '{}' at offset {}", bytes[i] as char, i)),
            b';' if depth == 0 => {
                if i == start + 1 {
                    return Err("empty class name".to_string());
                }
                return Ok(i + 1);
            }
            _ => {}
        }
        i += 1;
    }
    Err("unterminated class signature".to_string())
}

/// Parse a single complete type signature
pub fn parse_type_signature(raw: &str) -> Result<TypeSig> {
    let end = scan_type_signature(raw, 0).map_err(|reason| ResolveError::descriptor(raw, reason))?;
    if end != raw.len() {
        return Err(ResolveError::descriptor(
            raw,
            format!("trailing characters at offset {}", end),
        ));
    }
    Ok(TypeSig::new(raw))
}

/// Parse `(params)ret` into parameter and return signatures
pub fn parse_method_descriptor(raw: &str) -> Result<(Vec<TypeSig>, TypeSig)> {
    let bytes = raw.as_bytes();
    if bytes.first() != Some(&b'(') {
        return Err(ResolveError::descriptor(raw, "expected '('"));
    }
    let mut params = Vec::new();
    let mut i = 1;
    loop {
        match bytes.get(i) {
            None => return Err(ResolveError::descriptor(raw, "unterminated parameter list")),
            Some(b')') => {
                i += 1;
                break;
            }
            Some(_) => {
                let end = scan_type_signature(raw, i)
                    .map_err(|reason| ResolveError::descriptor(raw, reason))?;
                if &raw[i..end] == "V" {
                    return Err(ResolveError::descriptor(raw, "void parameter"));
                }
                params.push(TypeSig::new(&raw[i..end]));
                i = end;
            }
        }
    }
    let end = scan_type_signature(raw, i).map_err(|reason| ResolveError::descriptor(raw, reason))?;
    if end != raw.len() {
        return Err(ResolveError::descriptor(
            raw,
            format!("trailing characters at offset {}", end),
        ));
    }
    Ok((params, TypeSig::new(&raw[i..end])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigs(values: &[&str]) -> Vec<TypeSig> {
        values.iter().map(|v| TypeSig::new(*v)).collect()
    }

    #[test]
    fn test_parse_primitive_descriptor() {
        let (params, ret) = parse_method_descriptor("(DDD)V").unwrap();
        assert_eq!(params, sigs(&["D", "D", "D"]));
        assert_eq!(ret.as_str(), "V");
    }

    #[test]
    fn test_parse_empty_parameter_list() {
        let (params, ret) = parse_method_descriptor("()Z").unwrap();
        assert!(params.is_empty());
        assert_eq!(ret.as_str(), "Z");
    }

    #[test]
    fn test_parse_reference_and_array_params() {
        let (params, ret) =
            parse_method_descriptor("(Ljava/lang/String;[I[[Lfoo.Bar;TT;)Ljava/util/List<TT;>;")
                .unwrap();
        assert_eq!(
            params,
            sigs(&["Ljava/lang/String;", "[I", "[[Lfoo.Bar;", "TT;"])
        );
        assert_eq!(ret.as_str(), "Ljava/util/List<TT;>;");
    }

    #[test]
    fn test_parse_nested_generics() {
        let (params, _) =
            parse_method_descriptor("(Ljava/util/Map<Ljava/lang/String;Ljava/util/List<+TT;>;>;)V")
                .unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["DDD)V", "(DDD", "(DDD)", "(X)V", "(V)V", "(Lfoo;)V;", "(Lfoo)V", "([V)V", "(L;)V"] {
            assert!(parse_method_descriptor(raw).is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_signature_kind() {
        assert_eq!(signature_kind("I"), SignatureKind::Base);
        assert_eq!(signature_kind("V"), SignatureKind::Void);
        assert_eq!(signature_kind("[I"), SignatureKind::Array);
        assert_eq!(signature_kind("Lfoo/Bar;"), SignatureKind::Class);
        assert_eq!(signature_kind("TT;"), SignatureKind::TypeVariable);
        assert_eq!(type_variable_name("TKey;"), Some("Key"));
        assert_eq!(type_variable_name("Lfoo;"), None);
    }

    #[test]
    fn test_parse_type_signature_requires_full_input() {
        assert!(parse_type_signature("Lfoo/Bar;").is_ok());
        assert!(parse_type_signature("Lfoo/Bar;I").is_err());
    }
}
