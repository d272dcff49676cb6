//! Test fixture declarations

use mixin_resolve::{MemberCandidate, TypeDecl, TypeParameter, TypeSig};

/// `com.x.Bar` with overloads, a constructor and a field
pub fn fixture_bar() -> TypeDecl {
    let mut decl = TypeDecl::new("com.x.Bar")
        .with_method(MemberCandidate::constructor("com.x.Bar", &[]))
        .with_method(MemberCandidate::method("com.x.Bar", "Bar", &["Ljava/lang/String;"], "V"))
        .with_method(MemberCandidate::method("com.x.Bar", "tick", &["I"], "V"))
        .with_method(MemberCandidate::method("com.x.Bar", "tick", &["J"], "V"))
        .with_method(MemberCandidate::method("com.x.Bar", "tick", &["Ljava/lang/String;"], "V"))
        .with_method(MemberCandidate::method("com.x.Bar", "doThing", &[], "V"))
        .with_method(MemberCandidate::method("com.x.Bar", "func_1234_a", &["D", "D", "D"], "V"))
        .with_field(MemberCandidate::field("com.x.Bar", "count", "I"));
    decl.adopt_members();
    decl
}

/// `com.x.Box<T extends Comparable>` with a method generic in `U`
pub fn fixture_generic_box() -> TypeDecl {
    let mut decl = TypeDecl::new("com/x/Box")
        .with_type_parameter(TypeParameter::new(
            "T",
            vec![TypeSig::new("Ljava/lang/Comparable<TT;>;")],
        ))
        .with_method(MemberCandidate::method("com.x.Box", "put", &["TT;"], "V"))
        .with_method(
            MemberCandidate::method("com.x.Box", "map", &["TU;", "[TT;"], "V")
                .with_type_parameter(TypeParameter::new("U", vec![])),
        );
    decl.adopt_members();
    decl
}

/// Sequence of `count` same-named methods differing by parameter
pub fn fixture_repeated(name: &str, count: usize) -> TypeDecl {
    const PARAMS: [&str; 8] = ["I", "J", "Z", "B", "C", "S", "F", "D"];
    let mut decl = TypeDecl::new("com.x.Rep");
    for i in 0..count {
        decl = decl.with_method(MemberCandidate::method(
            "com.x.Rep",
            name,
            &[PARAMS[i % PARAMS.len()]],
            "V",
        ));
    }
    decl
}
