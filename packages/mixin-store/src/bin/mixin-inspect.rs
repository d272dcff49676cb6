//! Mixin index inspector
//!
//! Builds the mixin index of one project and prints it as JSON.
//!
//! # Usage
//!
//! ```bash
//! mixin-inspect --project . --declarations build/types.json
//! mixin-inspect --project . --declarations build/types.json \
//!     --classpath libs/fabric-api --target net.minecraft.client.Minecraft
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use mixin_resolve::{InMemoryDeclarations, ResolverConfig, TypeRef};
use mixin_store::{DirectoryModSource, MixinStore, ModSource, ProjectBinding};

#[derive(Parser)]
#[command(name = "mixin-inspect")]
#[command(about = "Print the mixin index of a project", long_about = None)]
struct Cli {
    /// Project directory
    #[arg(short, long)]
    project: PathBuf,

    /// JSON array of type declarations
    #[arg(short, long)]
    declarations: PathBuf,

    /// Resource root of a dependency mod (repeatable)
    #[arg(long)]
    classpath: Vec<PathBuf>,

    /// Resolver config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also resolve the augmentations applied to this class
    #[arg(short, long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ResolverConfig::from_yaml(path)?,
        None => ResolverConfig::default(),
    };

    let declarations = InMemoryDeclarations::new();
    let count = declarations.load_json(&tokio::fs::read_to_string(&cli.declarations).await?)?;
    tracing::info!(types = count, "Declarations loaded");

    let resources = cli.project.join(&config.project_resources);
    let mut binding = ProjectBinding::new(
        cli.project.display().to_string(),
        Arc::new(DirectoryModSource::new(resources)),
        Arc::new(declarations),
    );
    for root in &cli.classpath {
        let source: Arc<dyn ModSource> = Arc::new(DirectoryModSource::new(root));
        binding = binding.with_classpath(source);
    }
    let project = binding.id.clone();

    let store = MixinStore::new(config);
    store.register(binding).await;
    let index = store.index(&project).await?;

    let mut report = json!({
        "project": project,
        "stats": index.stats(),
        "index": index.snapshot(),
    });

    if let Some(target) = &cli.target {
        let augmentations = store
            .augmentations_for(&project, &TypeRef::new(target))
            .await?;
        let summaries: Vec<_> = augmentations
            .summaries()
            .into_iter()
            .map(|summary| {
                json!({
                    "member": summary.member.to_string(),
                    "label": summary.to_string(),
                    "detail": summary,
                })
            })
            .collect();
        report["augmentations"] = json!({
            "target": target,
            "summaries": summaries,
            "diagnostics": augmentations.diagnostics,
        });
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
