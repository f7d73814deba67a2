//! `crudmapper` command line
//!
//! Reads a TOML configuration and a JSON schema document, generates the CRUD
//! surface of every table and writes it below an output directory.

use anyhow::Context;
use clap::{Parser, Subcommand};
use crudmapper::{Generator, GeneratorConfig, SchemaDocument, emit};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crudmapper")]
#[command(author, version, about = "Generate SQL maps, mappers, services and controllers from table metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate artifacts for every table in a schema document
    Generate {
        /// Generator configuration (TOML)
        #[arg(long, default_value = "crudmapper.toml")]
        config: PathBuf,

        /// Schema document (JSON)
        #[arg(long)]
        schema: PathBuf,

        /// Project root the configured output roots are relative to
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Log what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Also write a JSON manifest of the generated artifacts
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Number of tables generated in parallel
        #[arg(long, default_value_t = 1)]
        jobs: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crudmapper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            config,
            schema,
            out,
            dry_run,
            manifest,
            jobs,
        } => {
            let config = GeneratorConfig::load(&config)?;
            let text = std::fs::read_to_string(&schema)
                .with_context(|| format!("failed to read schema '{}'", schema.display()))?;
            let tables = SchemaDocument::from_json(&text)
                .and_then(|document| document.into_tables(&config))
                .with_context(|| format!("invalid schema '{}'", schema.display()))?;
            tracing::info!(tables = tables.len(), jobs, "generating");

            let artifacts = Generator::from_config(&config).generate_all(&tables, jobs);
            let summary = emit::write_artifacts(&out, &artifacts, dry_run)?;
            if let Some(path) = manifest
                && !dry_run
            {
                emit::write_manifest(&path, &artifacts)?;
            }
            tracing::info!(
                files = summary.written.len(),
                bytes = summary.bytes,
                dry_run,
                "done"
            );
        }
    }
    Ok(())
}
