//! Swagger 2 annotations
//!
//! Controllers get `@Api` and one `@ApiOperation` per handler; the model
//! class gets `@ApiModel` and an `@ApiModelProperty` per column. Nothing is
//! added where an annotation of the same kind already exists.

use super::{ArtifactDecorator, escape_literal};
use crate::config::SwaggerConfig;
use crate::java::{JavaClass, JavaType};
use crate::naming::{self, Naming};
use crate::schema::{Column, Table};
use serde::Serialize;
use std::fmt::Write;

const API: &str = "io.swagger.annotations.Api";
const API_OPERATION: &str = "io.swagger.annotations.ApiOperation";
const API_MODEL: &str = "io.swagger.annotations.ApiModel";
const API_MODEL_PROPERTY: &str = "io.swagger.annotations.ApiModelProperty";
const TIMESTAMP: &str = "TIMESTAMP";

#[derive(Debug, Clone)]
pub struct SwaggerDecorator {
    config: SwaggerConfig,
}

impl SwaggerDecorator {
    #[must_use]
    pub fn new(config: SwaggerConfig) -> Self {
        Self { config }
    }

    fn operation_label(naming: &Naming, method: &str, remarks: &str) -> Option<String> {
        let label = if method == naming.add_method() {
            format!("新增{remarks}")
        } else if method == naming.delete_method() {
            format!("删除{remarks}")
        } else if method == naming.update_method() {
            format!("更新{remarks}")
        } else if method == naming.get_method() {
            format!("详情查询{remarks}")
        } else if method == naming::LIST_BY_IDS {
            format!("列表查询{remarks}-指定ID")
        } else if method == naming.list_method() {
            format!("列表查询{remarks}-复合参数")
        } else {
            return None;
        };
        Some(label)
    }

    fn property_annotation(&self, column: &Column) -> String {
        let mut annotation = format!(
            "@ApiModelProperty(value = \"{}\"",
            escape_literal(column.remarks())
        );
        let example = if column.jdbc_type().eq_ignore_ascii_case(TIMESTAMP) {
            Some(self.config.timestamp_example.as_str())
        } else {
            column.default_value()
        };
        if let Some(example) = example {
            let _ = write!(annotation, ", example = \"{}\"", escape_literal(example));
        }
        annotation.push(')');
        annotation
    }
}

impl ArtifactDecorator for SwaggerDecorator {
    fn name(&self) -> &'static str {
        "swagger"
    }

    fn decorate_controller(&self, table: &Table, controller: &mut JavaClass) {
        let remarks = escape_literal(table.remarks());
        if !controller.has_annotation("@Api(") {
            controller.annotations.push(format!("@Api(tags = \"{remarks}\")"));
            controller.import_name(API);
        }

        let naming = Naming::new(table.domain_name());
        let mut decorated = false;
        for method in &mut controller.methods {
            if method.annotations.iter().any(|a| a.starts_with("@ApiOperation")) {
                continue;
            }
            if let Some(label) = Self::operation_label(&naming, &method.name, &remarks) {
                method.annotations.push(format!("@ApiOperation(value = \"{label}\")"));
                decorated = true;
            }
        }
        if decorated {
            controller.import_name(API_OPERATION);
        }
    }

    fn model_decoration(&self, table: &Table) -> Option<ModelDecoration> {
        let model = table.domain_type();
        let value = if self.config.short_model_value {
            model.short_name()
        } else {
            model.to_string()
        };
        Some(ModelDecoration {
            model_type: model.clone(),
            annotation: format!(
                "@ApiModel(value = \"{value}\", description = \"{}\")",
                escape_literal(table.remarks())
            ),
            imports: vec![API_MODEL.to_string(), API_MODEL_PROPERTY.to_string()],
            fields: table
                .base_columns()
                .iter()
                .map(|column| FieldDecoration {
                    property: column.property().to_string(),
                    annotation: self.property_annotation(column),
                })
                .collect(),
        })
    }
}

/// Annotations for a model class the host generates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDecoration {
    pub model_type: JavaType,
    pub annotation: String,
    pub imports: Vec<String>,
    pub fields: Vec<FieldDecoration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecoration {
    pub property: String,
    pub annotation: String,
}

impl ModelDecoration {
    /// Add the annotations to a model class description, skipping the class
    /// annotation if `@ApiModel` is present and any field that already
    /// carries `@ApiModelProperty`
    pub fn apply(&self, model: &mut JavaClass) {
        if !model.has_annotation("@ApiModel(") {
            model.annotations.push(self.annotation.clone());
        }
        for import in &self.imports {
            model.import_name(import);
        }
        for decoration in &self.fields {
            let Some(field) = model.fields.iter_mut().find(|f| f.name == decoration.property) else {
                continue;
            };
            if !field.annotations.iter().any(|a| a.starts_with("@ApiModelProperty")) {
                field.annotations.push(decoration.annotation.clone());
            }
        }
    }
}
