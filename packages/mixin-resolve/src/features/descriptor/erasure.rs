//! Type erasure and separator-insensitive signature comparison

use crate::shared::models::{MemberCandidate, TypeParameter, TypeSig};

use super::signature::type_variable_name;

/// Bound chains longer than this erase to Object
const MAX_BOUND_DEPTH: usize = 8;

/// Erase a signature against the type parameters in scope
///
/// `scopes` is searched in order, so the binding member's own parameters
/// go first and its owner's after. A type variable erases to its first
/// bound, or to Object if it has none or is not declared in scope.
pub fn erase(signature: &TypeSig, scopes: &[&[TypeParameter]]) -> TypeSig {
    erase_at_depth(signature.as_str(), scopes, 0)
}

fn erase_at_depth(signature: &str, scopes: &[&[TypeParameter]], depth: usize) -> TypeSig {
    let element = signature.trim_start_matches('[');
    let dims = &signature[..signature.len() - element.len()];

    let erased = if let Some(name) = type_variable_name(element) {
        let bound = scopes
            .iter()
            .flat_map(|scope| scope.iter())
            .find(|param| param.name == name)
            .and_then(|param| param.bounds.first());
        match bound {
            Some(bound) if depth < MAX_BOUND_DEPTH => {
                erase_at_depth(bound.as_str(), scopes, depth + 1).into_string()
            }
            _ => TypeSig::object().into_string(),
        }
    } else if element.contains('<') {
        strip_type_arguments(element)
    } else {
        element.to_string()
    };

    TypeSig::new(format!("{}{}", dims, erased))
}

/// Remove every `<...>` section (`Ljava/util/List<TT;>;` → `Ljava/util/List;`)
fn strip_type_arguments(signature: &str) -> String {
    let mut out = String::with_capacity(signature.len());
    let mut depth = 0usize;
    for c in signature.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Position-by-position equality where `/` and `.` are interchangeable
pub fn signatures_equal(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.chars().zip(b.chars()).all(|(x, y)| {
        x == y || matches!((x, y), ('/', '.') | ('.', '/'))
    })
}

/// Compare a candidate's erased parameters with expected signatures,
/// length-for-length and element-for-element
pub fn parameters_match(
    candidate: &MemberCandidate,
    owner_type_parameters: &[TypeParameter],
    expected: &[TypeSig],
) -> bool {
    if candidate.params.len() != expected.len() {
        return false;
    }
    let scopes: [&[TypeParameter]; 2] = [&candidate.type_parameters, owner_type_parameters];
    candidate
        .params
        .iter()
        .zip(expected)
        .all(|(actual, wanted)| {
            let actual = erase(actual, &scopes);
            let wanted = erase(wanted, &[]);
            signatures_equal(actual.as_str(), wanted.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::OBJECT_SIGNATURE;

    fn param(name: &str, bounds: &[&str]) -> TypeParameter {
        TypeParameter::new(name, bounds.iter().map(|b| TypeSig::new(*b)).collect())
    }

    #[test]
    fn test_identical_base_types() {
        assert!(signatures_equal("I", "I"));
        assert!(!signatures_equal("I", "J"));
    }

    #[test]
    fn test_separator_insensitive() {
        assert!(signatures_equal("Lfoo/Bar;", "Lfoo.Bar;"));
        assert!(signatures_equal("Lfoo/bar.Baz;", "Lfoo.bar/Baz;"));
        assert!(!signatures_equal("Lfoo/Bar;", "Lfoo/Baz;"));
        assert!(!signatures_equal("Lfoo/Bar;", "Lfoo/Bar$X;"));
    }

    #[test]
    fn test_type_variable_erases_to_first_bound() {
        let scope = [param("T", &["Ljava/lang/Comparable;"])];
        let erased = erase(&TypeSig::new("TT;"), &[&scope[..]]);
        assert_eq!(erased.as_str(), "Ljava/lang/Comparable;");

        let multi = [param("T", &["Ljava/lang/Number;", "Ljava/lang/Comparable;"])];
        assert_eq!(erase(&TypeSig::new("TT;"), &[&multi[..]]).as_str(), "Ljava/lang/Number;");
    }

    #[test]
    fn test_unbounded_type_variable_erases_to_object() {
        let scope = [param("T", &[])];
        assert_eq!(erase(&TypeSig::new("TT;"), &[&scope[..]]).as_str(), OBJECT_SIGNATURE);
        assert_eq!(erase(&TypeSig::new("TU;"), &[&scope[..]]).as_str(), OBJECT_SIGNATURE);
    }

    #[test]
    fn test_generic_bound_is_erased_too() {
        let scope = [param("T", &["Ljava/lang/Comparable<TT;>;"])];
        assert_eq!(erase(&TypeSig::new("TT;"), &[&scope[..]]).as_str(), "Ljava/lang/Comparable;");
    }

    #[test]
    fn test_array_of_type_variable() {
        let scope = [param("E", &["Ljava/lang/Enum;"])];
        assert_eq!(erase(&TypeSig::new("[[TE;"), &[&scope[..]]).as_str(), "[[Ljava/lang/Enum;");
    }

    #[test]
    fn test_member_scope_shadows_owner_scope() {
        let member = [param("T", &["Ljava/lang/CharSequence;"])];
        let owner = [param("T", &["Ljava/lang/Number;"])];
        assert_eq!(
            erase(&TypeSig::new("TT;"), &[&member[..], &owner[..]]).as_str(),
            "Ljava/lang/CharSequence;"
        );
        assert_eq!(erase(&TypeSig::new("TT;"), &[&[][..], &owner[..]]).as_str(), "Ljava/lang/Number;");
    }

    #[test]
    fn test_type_arguments_stripped() {
        assert_eq!(
            erase(&TypeSig::new("Ljava/util/Map<Ljava/lang/String;Ljava/util/List<TT;>;>;"), &[]).as_str(),
            "Ljava/util/Map;"
        );
    }

    #[test]
    fn test_cyclic_bounds_terminate() {
        let scope = [param("A", &["TB;"]), param("B", &["TA;"])];
        assert_eq!(erase(&TypeSig::new("TA;"), &[&scope[..]]).as_str(), OBJECT_SIGNATURE);
    }

    #[test]
    fn test_parameters_match_with_owner_bounds() {
        let owner = [param("T", &["Ljava/lang/Comparable;"])];
        let candidate = MemberCandidate::method("com.x.Box", "put", &["TT;", "I"], "V");
        let wanted = [TypeSig::new("Ljava.lang.Comparable;"), TypeSig::new("I")];
        assert!(parameters_match(&candidate, &owner, &wanted));
        assert!(!parameters_match(&candidate, &owner, &wanted[..1]));
    }
}
