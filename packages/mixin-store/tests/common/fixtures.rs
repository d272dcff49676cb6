//! Project fixtures: declarations plus in-memory mod resources

use std::sync::Arc;

use mixin_resolve::{Annotation, InMemoryDeclarations, MemberCandidate, TypeDecl, TypeRef};
use mixin_store::{InMemoryModSource, MixinStore, ModSource, ProjectBinding};

pub const PROJECT: &str = "demo";
pub const INJECT: &str = "org.spongepowered.asm.mixin.injection.Inject";

pub fn t(name: &str) -> TypeRef {
    TypeRef::new(name)
}

pub fn metadata(configs: &[&str]) -> String {
    let entries: Vec<String> = configs.iter().map(|c| format!("\"{}\"", c)).collect();
    format!(
        r#"{{"schemaVersion": 1, "id": "demo", "version": "1.0.0", "mixins": [{}]}}"#,
        entries.join(", ")
    )
}

pub fn mixin_config(package: &str, mixins: &[&str]) -> String {
    let entries: Vec<String> = mixins.iter().map(|m| format!("\"{}\"", m)).collect();
    format!(
        r#"{{"required": true, "package": "{}", "mixins": [{}]}}"#,
        package,
        entries.join(", ")
    )
}

/// Target class `com.x.Bar` declaring `doThing()V`
pub fn target_bar() -> TypeDecl {
    TypeDecl::new("com.x.Bar")
        .with_method(MemberCandidate::method("com.x.Bar", "doThing", &[], "V"))
}

/// Mixin `name` targeting `target`, injecting into `doThing`
pub fn injecting_mixin(name: &str, target: &str) -> TypeDecl {
    TypeDecl::new(name)
        .with_annotation(Annotation::new("Mixin").with_class("value", target))
        .with_method(
            MemberCandidate::method(name, "onDoThing", &[], "V")
                .with_annotation(Annotation::new(INJECT).with_string("method", "doThing")),
        )
}

pub struct Fixture {
    pub store: MixinStore,
    pub declarations: Arc<InMemoryDeclarations>,
    pub project: Arc<InMemoryModSource>,
}

impl Fixture {
    /// `a.mixins.json` listing `com.x.Foo`, which injects into `com.x.Bar`
    pub fn new() -> Self {
        let declarations = Arc::new(InMemoryDeclarations::new());
        declarations.insert(target_bar());
        declarations.insert(TypeDecl::new("com.x.Baz"));
        declarations.insert(injecting_mixin("com.x.Foo", "com.x.Bar"));

        let project = Arc::new(
            InMemoryModSource::new(PROJECT)
                .with_file("fabric.mod.json", metadata(&["a.mixins.json"]))
                .with_file("a.mixins.json", mixin_config("com.x", &["Foo"])),
        );

        Self {
            store: MixinStore::new(Default::default()),
            declarations,
            project,
        }
    }

    pub fn binding(&self) -> ProjectBinding {
        let project: Arc<dyn ModSource> = self.project.clone();
        ProjectBinding::new(PROJECT, project, self.declarations.clone())
    }

    pub async fn registered() -> Self {
        let fixture = Self::new();
        fixture.store.register(fixture.binding()).await;
        fixture
    }
}
