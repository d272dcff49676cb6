//! Builders for augmenting-type declarations

use mixin_resolve::{Annotation, MemberCandidate, TypeDecl};

const INJECTION: &str = "org.spongepowered.asm.mixin.injection.";

/// Fluent builder for a `@Mixin` class
pub struct MixinBuilder {
    decl: TypeDecl,
    targets: Vec<String>,
}

impl MixinBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            decl: TypeDecl::new(name),
            targets: Vec::new(),
        }
    }

    pub fn targets(mut self, target: &str) -> Self {
        self.targets.push(target.to_string());
        self
    }

    fn handler(mut self, name: &str, params: &[&str], ret: &str, annotation: Annotation) -> Self {
        let owner = self.decl.name.clone();
        self.decl = self
            .decl
            .with_method(MemberCandidate::method(owner, name, params, ret).with_annotation(annotation));
        self
    }

    /// Generic injector by simple name (`Inject`, `Redirect`, ...)
    pub fn injector(self, kind: &str, handler: &str, methods: &[&str]) -> Self {
        let annotation = Annotation::new(format!("{}{}", INJECTION, kind))
            .with_strings("method", methods.iter().copied());
        self.handler(handler, &[], "V", annotation)
    }

    pub fn inject(self, handler: &str, method: &str) -> Self {
        self.injector("Inject", handler, &[method])
    }

    pub fn overwrite(self, name: &str, params: &[&str], ret: &str) -> Self {
        self.handler(name, params, ret, Annotation::new("Overwrite"))
    }

    pub fn accessor(self, handler: &str, params: &[&str], ret: &str) -> Self {
        self.handler(handler, params, ret, Annotation::new("Accessor"))
    }

    pub fn invoker(self, handler: &str, params: &[&str], ret: &str) -> Self {
        self.handler(handler, params, ret, Annotation::new("Invoker"))
    }

    pub fn build(self) -> TypeDecl {
        let mixin = Annotation::new("org.spongepowered.asm.mixin.Mixin")
            .with_strings("targets", self.targets);
        let mut decl = self.decl.with_annotation(mixin);
        decl.adopt_members();
        decl
    }
}
