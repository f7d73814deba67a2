//! # Generation Pipeline
//!
//! One forward pass per table:
//!
//! ```text
//! Table -> OperationSet -> { statements, contracts } -> service -> controller
//! ```
//!
//! [`generate_table`] is pure: the same table and configuration always give
//! byte-identical artifacts. Tables share nothing, so [`Generator::generate_all`]
//! can spread them across threads and still return results in input order.

use crate::codegen::{
    self, ControllerClass, ServiceClass, augment_interface, augment_sql_map, emit_controller,
    emit_service,
};
use crate::config::GeneratorConfig;
use crate::contract::PersistenceContracts;
use crate::decorate::{ArtifactDecorator, ModelDecoration, SwaggerDecorator};
use crate::java::{self, JavaClass, JavaType};
use crate::naming::Naming;
use crate::operations::{OperationKind, OperationSet};
use crate::schema::Table;
use crate::sql::{self, SqlMapDocument};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    SqlMap,
    MapperInterface,
    Service,
    Controller,
}

/// A source file ready to be written: path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub relative_path: PathBuf,
    #[serde(skip)]
    pub body: String,
}

/// Previously generated mapper interface and SQL map of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub mapper: JavaClass,
    pub sql_map: SqlMapDocument,
}

impl Baseline {
    /// What the host would generate for `table` before any derived operation
    #[must_use]
    pub fn scaffold(table: &Table) -> Self {
        let operations = OperationSet::derive(table, &Naming::new(table.domain_name()));
        let contracts = PersistenceContracts::build(table, &operations);
        Self {
            mapper: codegen::baseline_interface(table, &contracts),
            sql_map: codegen::baseline_sql_map(table, &operations),
        }
    }
}

/// Everything generated for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableArtifacts {
    pub table: String,
    pub operations: Vec<OperationKind>,
    pub contracts: PersistenceContracts,
    pub mapper: JavaClass,
    pub sql_map: SqlMapDocument,
    pub service: ServiceClass,
    pub controller: ControllerClass,
    pub service_java: JavaClass,
    pub controller_java: JavaClass,
    pub model_decorations: Vec<ModelDecoration>,
    pub files: Vec<GeneratedArtifact>,
}

impl TableArtifacts {
    #[must_use]
    pub fn file(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.files.iter().find(|f| f.kind == kind)
    }

    /// The baseline a later run should augment
    #[must_use]
    pub fn as_baseline(&self) -> Baseline {
        Baseline {
            mapper: self.mapper.clone(),
            sql_map: self.sql_map.clone(),
        }
    }
}

/// Generate every artifact of `table` on top of a scaffolded baseline
#[must_use]
pub fn generate_table(
    table: &Table,
    config: &GeneratorConfig,
    decorators: &[Box<dyn ArtifactDecorator>],
) -> TableArtifacts {
    augment_table(table, config, decorators, &Baseline::scaffold(table))
}

/// Generate every artifact of `table`, adding derived methods and statements
/// to `baseline` without removing anything from it
#[must_use]
pub fn augment_table(
    table: &Table,
    config: &GeneratorConfig,
    decorators: &[Box<dyn ArtifactDecorator>],
    baseline: &Baseline,
) -> TableArtifacts {
    let naming = Naming::new(table.domain_name());
    let operations = OperationSet::derive(table, &naming);
    let contracts = PersistenceContracts::build(table, &operations);
    tracing::debug!(
        table = table.name(),
        operations = ?operations.derived_kinds(),
        "derived operations"
    );

    let statements = sql::synthesize(table, &operations.derived, config);
    let mapper = augment_interface(&baseline.mapper, contracts.derived());
    let sql_map = augment_sql_map(&baseline.sql_map, statements);

    let service = emit_service(table, &naming, &contracts, config);
    let controller = emit_controller(&service, &naming, config);

    let service_java = service.to_java();
    let mut controller_java = controller.to_java();
    let mut model_decorations = Vec::new();
    for decorator in decorators {
        tracing::debug!(table = table.name(), decorator = decorator.name(), "decorating");
        decorator.decorate_controller(table, &mut controller_java);
        model_decorations.extend(decorator.model_decoration(table));
    }

    let files = vec![
        GeneratedArtifact {
            kind: ArtifactKind::SqlMap,
            relative_path: xml_path(&config.sql_map_root, table.mapper_type()),
            body: sql_map.render(),
        },
        GeneratedArtifact {
            kind: ArtifactKind::MapperInterface,
            relative_path: java_path(&config.output_root, &mapper.java_type),
            body: java::render(&mapper),
        },
        GeneratedArtifact {
            kind: ArtifactKind::Service,
            relative_path: java_path(&config.output_root, &service_java.java_type),
            body: java::render(&service_java),
        },
        GeneratedArtifact {
            kind: ArtifactKind::Controller,
            relative_path: java_path(&config.output_root, &controller_java.java_type),
            body: java::render(&controller_java),
        },
    ];

    TableArtifacts {
        table: table.name().to_string(),
        operations: operations.derived_kinds(),
        contracts,
        mapper,
        sql_map,
        service,
        controller,
        service_java,
        controller_java,
        model_decorations,
        files,
    }
}

fn package_dir(root: &Path, java_type: &JavaType) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(package) = java_type.package() {
        path.extend(package.split('.'));
    }
    path
}

fn java_path(root: &Path, java_type: &JavaType) -> PathBuf {
    package_dir(root, java_type).join(format!("{}.java", java_type.short_name_without_arguments()))
}

fn xml_path(root: &Path, mapper_type: &JavaType) -> PathBuf {
    package_dir(root, mapper_type).join(format!("{}.xml", mapper_type.short_name_without_arguments()))
}

/// Drives generation for a whole schema with one configuration and a fixed
/// list of decorators
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    decorators: Vec<Box<dyn ArtifactDecorator>>,
}

impl<'a> Generator<'a> {
    /// A generator without decorators
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            decorators: Vec::new(),
        }
    }

    /// A generator with the decorators `config` enables
    #[must_use]
    pub fn from_config(config: &'a GeneratorConfig) -> Self {
        let generator = Self::new(config);
        if config.swagger.enabled {
            generator.with_decorator(Box::new(SwaggerDecorator::new(config.swagger.clone())))
        } else {
            generator
        }
    }

    #[must_use]
    pub fn with_decorator(mut self, decorator: Box<dyn ArtifactDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    #[must_use]
    pub fn generate_table(&self, table: &Table) -> TableArtifacts {
        generate_table(table, self.config, &self.decorators)
    }

    #[must_use]
    pub fn augment_table(&self, table: &Table, baseline: &Baseline) -> TableArtifacts {
        augment_table(table, self.config, &self.decorators, baseline)
    }

    /// Generate every table, on up to `jobs` threads. Results keep input order.
    #[must_use]
    pub fn generate_all(&self, tables: &[Table], jobs: usize) -> Vec<TableArtifacts> {
        let jobs = jobs.clamp(1, tables.len().max(1));
        if jobs == 1 {
            return tables.iter().map(|t| self.generate_table(t)).collect();
        }

        let per_job = tables.len().div_ceil(jobs);
        std::thread::scope(|scope| {
            let handles: Vec<_> = tables
                .chunks(per_job)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|t| self.generate_table(t))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut results = Vec::with_capacity(tables.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk) => results.extend(chunk),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            results
        })
    }
}
