//! Artifact emission
//!
//! Writes rendered artifacts below a project root, creating directories as
//! needed, and optionally a JSON manifest of what was produced.

use crate::decorate::ModelDecoration;
use crate::errors::{GenError, Result};
use crate::operations::OperationKind;
use crate::pipeline::{ArtifactKind, TableArtifacts};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where artifacts were (or in a dry run, would have been) written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub written: Vec<PathBuf>,
    pub bytes: usize,
}

/// Write every artifact of every table under `root`.
///
/// With `dry_run` nothing touches the filesystem; paths are only logged.
pub fn write_artifacts(
    root: &Path,
    artifacts: &[TableArtifacts],
    dry_run: bool,
) -> Result<EmitSummary> {
    let mut summary = EmitSummary::default();
    for table in artifacts {
        for file in &table.files {
            let path = root.join(&file.relative_path);
            if dry_run {
                tracing::info!(table = %table.table, path = %path.display(), "would write");
            } else {
                write_file(&path, &file.body)?;
                tracing::info!(
                    table = %table.table,
                    path = %path.display(),
                    bytes = file.body.len(),
                    "wrote artifact"
                );
            }
            summary.bytes += file.body.len();
            summary.written.push(path);
        }
    }
    Ok(summary)
}

fn write_file(path: &Path, body: &str) -> Result<()> {
    let write_error = |source| GenError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, body).map_err(write_error)
}

#[derive(Debug, Serialize)]
struct ManifestTable<'a> {
    table: &'a str,
    operations: &'a [OperationKind],
    methods: Vec<&'a str>,
    files: Vec<ManifestFile<'a>>,
    /// Annotations for the host-generated model class, one entry per decorator
    model_decorations: &'a [ModelDecoration],
}

#[derive(Debug, Serialize)]
struct ManifestFile<'a> {
    kind: ArtifactKind,
    path: &'a Path,
    bytes: usize,
}

/// Manifest JSON: per table, the derived operations, the service methods,
/// the generated files and the model annotations decorators produced
pub fn manifest_json(artifacts: &[TableArtifacts]) -> Result<String> {
    let tables: Vec<ManifestTable<'_>> = artifacts
        .iter()
        .map(|table| ManifestTable {
            table: &table.table,
            operations: &table.operations,
            methods: table
                .service
                .methods
                .iter()
                .map(|m| m.contract.name.as_str())
                .collect(),
            files: table
                .files
                .iter()
                .map(|f| ManifestFile {
                    kind: f.kind,
                    path: &f.relative_path,
                    bytes: f.body.len(),
                })
                .collect(),
            model_decorations: &table.model_decorations,
        })
        .collect();
    serde_json::to_string_pretty(&tables).map_err(GenError::Manifest)
}

/// Write the manifest of `artifacts` to `path`
pub fn write_manifest(path: &Path, artifacts: &[TableArtifacts]) -> Result<()> {
    let json = manifest_json(artifacts)?;
    write_file(path, &json)?;
    tracing::info!(path = %path.display(), tables = artifacts.len(), "wrote manifest");
    Ok(())
}
