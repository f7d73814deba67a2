//! # Schema Facts
//!
//! Read-only table metadata supplied by the host's introspection step.
//!
//! The wire form ([`SchemaDocument`], [`TableSpec`], [`ColumnSpec`]) is lenient:
//! property names, domain types and mapper types may be omitted and are filled
//! in from naming conventions. [`Table::from_spec`] validates the host's
//! preconditions once; everything downstream works on the immutable [`Table`].

use crate::config::GeneratorConfig;
use crate::errors::{GenError, Result};
use crate::java::JavaType;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_COLUMN_LIST_REF: &str = "Base_Column_List";
pub const DEFAULT_RESULT_MAP_REF: &str = "BaseResultMap";

/// Top-level schema file: every table of one generation run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaDocument {
    pub tables: Vec<TableSpec>,
}

impl SchemaDocument {
    /// Parse a schema document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate every table against `config`, aborting on the first violation
    pub fn into_tables(self, config: &GeneratorConfig) -> Result<Vec<Table>> {
        self.tables
            .into_iter()
            .map(|spec| Table::from_spec(spec, config))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub property: Option<String>,
    pub java_type: JavaType,
    pub jdbc_type: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub domain_type: Option<JavaType>,
    #[serde(default)]
    pub mapper_type: Option<JavaType>,
    #[serde(default)]
    pub remarks: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub column_list_ref: Option<String>,
    #[serde(default)]
    pub result_map_ref: Option<String>,
}

/// One column of a table. Identity is the storage name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    actual_name: String,
    property: String,
    java_type: JavaType,
    jdbc_type: String,
    default_value: Option<String>,
    remarks: String,
}

impl Column {
    #[must_use]
    pub fn new(
        actual_name: impl Into<String>,
        java_type: JavaType,
        jdbc_type: impl Into<String>,
    ) -> Self {
        let actual_name = actual_name.into();
        Self {
            property: naming::property_name(&actual_name),
            actual_name,
            java_type,
            jdbc_type: jdbc_type.into(),
            default_value: None,
            remarks: String::new(),
        }
    }

    #[must_use]
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    #[must_use]
    pub fn actual_name(&self) -> &str {
        &self.actual_name
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub fn java_type(&self) -> &JavaType {
        &self.java_type
    }

    #[must_use]
    pub fn jdbc_type(&self) -> &str {
        &self.jdbc_type
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    fn from_spec(spec: ColumnSpec) -> Self {
        let mut column = Self::new(spec.name, spec.java_type, spec.jdbc_type);
        if let Some(property) = spec.property {
            column.property = property;
        }
        column.default_value = spec.default_value;
        column.remarks = spec.remarks;
        column
    }
}

/// A validated table. Primary-key columns are a subset of the base columns,
/// in base-column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    name: String,
    domain_type: JavaType,
    mapper_type: JavaType,
    remarks: String,
    base_columns: Vec<Column>,
    primary_key_columns: Vec<Column>,
    column_list_ref: String,
    result_map_ref: String,
}

impl Table {
    /// Build a table from already-resolved facts.
    ///
    /// `primary_key` lists storage names; each must name a base column. Key
    /// columns are kept in base-column order, whatever order they are listed in.
    pub fn new(
        name: impl Into<String>,
        domain_type: JavaType,
        mapper_type: JavaType,
        base_columns: Vec<Column>,
        primary_key: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        if base_columns.is_empty() {
            return Err(GenError::schema(name, "table has no base columns"));
        }

        let collisions = naming::Naming::new(domain_type.short_name_without_arguments()).collisions();
        if !collisions.is_empty() {
            return Err(GenError::schema(
                name,
                format!(
                    "domain name '{}' makes method names collide: {}",
                    domain_type.short_name_without_arguments(),
                    collisions.join(", ")
                ),
            ));
        }

        let mut seen = HashSet::new();
        for column in &base_columns {
            if !seen.insert(column.actual_name.as_str()) {
                return Err(GenError::schema(
                    name,
                    format!("duplicate column '{}'", column.actual_name),
                ));
            }
        }

        let mut key_positions = Vec::with_capacity(primary_key.len());
        for key in primary_key {
            let position = base_columns
                .iter()
                .position(|c| c.actual_name == *key)
                .ok_or_else(|| {
                    GenError::schema(
                        name.clone(),
                        format!("primary key column '{key}' is not a base column"),
                    )
                })?;
            if key_positions.contains(&position) {
                return Err(GenError::schema(
                    name,
                    format!("primary key column '{key}' listed twice"),
                ));
            }
            key_positions.push(position);
        }
        key_positions.sort_unstable();
        let primary_key_columns = key_positions
            .into_iter()
            .map(|position| base_columns[position].clone())
            .collect();

        Ok(Self {
            name,
            domain_type,
            mapper_type,
            remarks: String::new(),
            base_columns,
            primary_key_columns,
            column_list_ref: DEFAULT_COLUMN_LIST_REF.to_string(),
            result_map_ref: DEFAULT_RESULT_MAP_REF.to_string(),
        })
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Resolve a wire-form table, filling omitted types from `config`
    pub fn from_spec(spec: TableSpec, config: &GeneratorConfig) -> Result<Self> {
        let domain_type = match spec.domain_type {
            Some(domain_type) => domain_type,
            None => {
                let package = config.model_package.as_deref().ok_or_else(|| {
                    GenError::schema(
                        spec.name.clone(),
                        "no domain_type given and no model_package configured",
                    )
                })?;
                qualified(&spec.name, package, &naming::domain_name(&spec.name))?
            }
        };

        let mapper_type = match spec.mapper_type {
            Some(mapper_type) => mapper_type,
            None => {
                let package = config
                    .mapper_package
                    .clone()
                    .or_else(|| domain_type.package().map(str::to_string))
                    .unwrap_or_default();
                let simple = format!("{}Mapper", domain_type.short_name_without_arguments());
                qualified(&spec.name, &package, &simple)?
            }
        };

        let keys: Vec<&str> = spec.primary_key.iter().map(String::as_str).collect();
        let columns = spec.columns.into_iter().map(Column::from_spec).collect();
        let mut table = Self::new(spec.name.clone(), domain_type, mapper_type, columns, &keys)?
            .with_remarks(spec.remarks);
        if let Some(column_list_ref) = spec.column_list_ref {
            table.column_list_ref = column_list_ref;
        }
        if let Some(result_map_ref) = spec.result_map_ref {
            table.result_map_ref = result_map_ref;
        }
        Ok(table)
    }

    /// Storage name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified domain object type
    #[must_use]
    pub fn domain_type(&self) -> &JavaType {
        &self.domain_type
    }

    /// Short domain object name, e.g. `User`
    #[must_use]
    pub fn domain_name(&self) -> &str {
        self.domain_type.short_name_without_arguments()
    }

    #[must_use]
    pub fn mapper_type(&self) -> &JavaType {
        &self.mapper_type
    }

    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    #[must_use]
    pub fn base_columns(&self) -> &[Column] {
        &self.base_columns
    }

    #[must_use]
    pub fn primary_key_columns(&self) -> &[Column] {
        &self.primary_key_columns
    }

    #[must_use]
    pub fn is_primary_key(&self, column: &Column) -> bool {
        self.primary_key_columns
            .iter()
            .any(|k| k.actual_name == column.actual_name)
    }

    /// Base columns that are not part of the primary key, in table order
    pub fn non_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.base_columns.iter().filter(|c| !self.is_primary_key(c))
    }

    /// Id of the host's canonical column-list SQL fragment
    #[must_use]
    pub fn column_list_ref(&self) -> &str {
        &self.column_list_ref
    }

    #[must_use]
    pub fn result_map_ref(&self) -> &str {
        &self.result_map_ref
    }
}

fn qualified(table: &str, package: &str, simple: &str) -> Result<JavaType> {
    let name = if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    };
    JavaType::parse(&name)
        .ok_or_else(|| GenError::schema(table, format!("malformed Java type name '{name}'")))
}
