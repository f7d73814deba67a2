//! Derive a consistent CRUD surface from table metadata: SQL map statements,
//! mapper interface methods, and service and controller classes that compile
//! against each other.
//!
//! ```no_run
//! use crudmapper::{Generator, GeneratorConfig, SchemaDocument};
//! use std::path::Path;
//!
//! # fn main() -> crudmapper::Result<()> {
//! let config = GeneratorConfig::load(Path::new("crudmapper.toml"))?;
//! let schema = std::fs::read_to_string("schema.json").unwrap_or_default();
//! let tables = SchemaDocument::from_json(&schema)?.into_tables(&config)?;
//! let artifacts = Generator::from_config(&config).generate_all(&tables, 1);
//! crudmapper::emit::write_artifacts(Path::new("."), &artifacts, false)?;
//! # Ok(())
//! # }
//! ```

pub mod codegen;
pub mod config;
pub mod contract;
pub mod decorate;
pub mod emit;
pub mod errors;
pub mod java;
pub mod naming;
pub mod operations;
pub mod pipeline;
pub mod schema;
pub mod sql;

pub use config::GeneratorConfig;
pub use contract::{MethodContract, PersistenceContracts, Signature};
pub use decorate::{ArtifactDecorator, SwaggerDecorator};
pub use errors::{GenError, Result};
pub use naming::Naming;
pub use operations::{DerivedOperation, OperationKind, OperationSet, derive_operations};
pub use pipeline::{Baseline, GeneratedArtifact, Generator, TableArtifacts, generate_table};
pub use schema::{Column, SchemaDocument, Table};
