//! Host-style baseline artifacts
//!
//! When no previously generated interface or SQL map exists, these stand in
//! for what the host generator would have produced: the result map, the
//! column list fragment and the primitive statements. Derived operations are
//! then added on top through the normal augmentation path.

use super::mapper::{augment_interface, empty_interface};
use crate::contract::PersistenceContracts;
use crate::java::JavaClass;
use crate::operations::{OperationSet, PrimitiveKind};
use crate::schema::{Column, Table};
use crate::sql::statements::binding;
use crate::sql::{SqlMapDocument, XmlElement};

/// The persistence interface with its primitive methods
#[must_use]
pub fn baseline_interface(table: &Table, contracts: &PersistenceContracts) -> JavaClass {
    augment_interface(&empty_interface(table.mapper_type()), contracts.primitives())
}

/// The SQL map with its result map, column list and primitive statements
#[must_use]
pub fn baseline_sql_map(table: &Table, operations: &OperationSet) -> SqlMapDocument {
    let mut document = SqlMapDocument::new(table.mapper_type().to_string());
    document.elements.push(result_map(table));
    document.elements.push(
        XmlElement::new("sql")
            .attr("id", table.column_list_ref())
            .text(column_list(table.base_columns())),
    );

    for primitive in &operations.primitives {
        let statement = match primitive.kind() {
            PrimitiveKind::Insert => insert(table),
            PrimitiveKind::DeleteByPrimaryKey => {
                XmlElement::new("delete")
                    .attr("id", primitive.method_name())
                    .attr("parameterType", key_parameter_type(table))
                    .text(format!("delete from {}", table.name()))
                    .texts(key_predicate(table))
            }
            PrimitiveKind::UpdateByPrimaryKey => {
                let assignments: Vec<&Column> = table.non_key_columns().collect();
                let last = assignments.len().saturating_sub(1);
                XmlElement::new("update")
                    .attr("id", primitive.method_name())
                    .attr("parameterType", table.domain_type().to_string())
                    .text(format!("update {}", table.name()))
                    .texts(assignments.iter().enumerate().map(|(i, c)| {
                        let keyword = if i == 0 { "set " } else { "  " };
                        let comma = if i == last { "" } else { "," };
                        format!("{keyword}{} = {}{comma}", c.actual_name(), binding(c))
                    }))
                    .texts(key_predicate(table))
            }
            PrimitiveKind::SelectByPrimaryKey => XmlElement::new("select")
                .attr("id", primitive.method_name())
                .attr("resultMap", table.result_map_ref())
                .attr("parameterType", key_parameter_type(table))
                .text("select")
                .child(XmlElement::new("include").attr("refid", table.column_list_ref()))
                .text(format!("from {}", table.name()))
                .texts(key_predicate(table)),
        };
        document.elements.push(statement);
    }
    document
}

fn result_map(table: &Table) -> XmlElement {
    let mut element = XmlElement::new("resultMap")
        .attr("id", table.result_map_ref())
        .attr("type", table.domain_type().to_string());
    for column in table.base_columns() {
        let tag = if table.is_primary_key(column) {
            "id"
        } else {
            "result"
        };
        element = element.child(
            XmlElement::new(tag)
                .attr("column", column.actual_name())
                .attr("jdbcType", column.jdbc_type())
                .attr("property", column.property()),
        );
    }
    element
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(Column::actual_name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert(table: &Table) -> XmlElement {
    let values: Vec<String> = table.base_columns().iter().map(binding).collect();
    XmlElement::new("insert")
        .attr("id", PrimitiveKind::Insert.method_name())
        .attr("parameterType", table.domain_type().to_string())
        .text(format!(
            "insert into {} ({})",
            table.name(),
            column_list(table.base_columns())
        ))
        .text(format!("values ({})", values.join(", ")))
}

fn key_parameter_type(table: &Table) -> String {
    match table.primary_key_columns() {
        [key] => key.java_type().boxed().to_string(),
        _ => table.domain_type().to_string(),
    }
}

fn key_predicate(table: &Table) -> Vec<String> {
    table
        .primary_key_columns()
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let keyword = if i == 0 { "where" } else { "  and" };
            format!("{keyword} {} = {}", key.actual_name(), binding(key))
        })
        .collect()
}
