//! Statement builders for the four derived operations.
//!
//! Every builder reads the [`DerivedOperation`] it is given for the statement
//! id and key column, so a statement always matches the interface method
//! built from the same operation.

use super::{ChunkLayout, XmlElement, chunk};
use crate::config::GeneratorConfig;
use crate::operations::{DerivedOperation, OperationKind};
use crate::schema::{Column, Table};

/// Typed binding of a record property, `#{name,jdbcType=VARCHAR}`
#[must_use]
pub fn binding(column: &Column) -> String {
    format!("#{{{},jdbcType={}}}", column.property(), column.jdbc_type())
}

/// Typed binding of a property of the current `foreach` item
#[must_use]
pub fn item_binding(column: &Column) -> String {
    format!("#{{item.{},jdbcType={}}}", column.property(), column.jdbc_type())
}

fn column_name(column: &Column) -> String {
    column.actual_name().to_string()
}

fn list_foreach() -> XmlElement {
    XmlElement::new("foreach")
        .attr("collection", "list")
        .attr("item", "item")
        .attr("separator", ",")
}

/// Multi-row insert of every base column, one value group per list item
#[must_use]
pub fn batch_insert(op: &DerivedOperation, table: &Table, layout: ChunkLayout) -> XmlElement {
    let columns = table.base_columns();
    let values = list_foreach()
        .text("(")
        .texts(chunk(columns, layout, item_binding))
        .text(")");

    XmlElement::new("insert")
        .attr("id", op.method_name())
        .attr("parameterType", table.domain_type().to_string())
        .text(format!("insert into {} (", table.name()))
        .texts(chunk(columns, layout, column_name))
        .text(") values ")
        .child(values)
}

/// Insert of every base column that updates the non-key columns on key conflict.
///
/// With an audit column configured the clause ends in `{audit} = now()`;
/// without one, the last assignment loses its comma. A table whose columns
/// are all key columns and has no audit column reassigns its first key to
/// itself, keeping the statement valid.
#[must_use]
pub fn upsert(op: &DerivedOperation, table: &Table, config: &GeneratorConfig) -> XmlElement {
    let columns = table.base_columns();
    let mut assignments: Vec<String> = table
        .non_key_columns()
        .map(|c| format!("  {} = {},", c.actual_name(), binding(c)))
        .collect();

    match config.audit_column() {
        Some(audit) => assignments.push(format!("  {audit} = now()")),
        None => match assignments.last_mut() {
            Some(last) => {
                last.pop();
            }
            None => {
                if let Some(key) = op.key_columns().first() {
                    tracing::debug!(
                        table = table.name(),
                        "no columns to update and no audit column, emitting no-op assignment"
                    );
                    assignments.push(format!("  {0} = {0}", key.actual_name()));
                }
            }
        },
    }

    XmlElement::new("insert")
        .attr("id", op.method_name())
        .attr("parameterType", table.domain_type().to_string())
        .text(format!("insert into {} (", table.name()))
        .texts(chunk(columns, config.chunk_layout, column_name))
        .text(") values (")
        .texts(chunk(columns, config.chunk_layout, binding))
        .text(") on duplicate key update ")
        .texts(assignments)
}

fn select_all(table: &Table) -> XmlElement {
    XmlElement::new("include").attr("refid", table.column_list_ref())
}

/// Unfiltered select of the canonical column list; the domain object
/// parameter only carries filter values
#[must_use]
pub fn filtered_list(op: &DerivedOperation, table: &Table) -> XmlElement {
    XmlElement::new("select")
        .attr("id", op.method_name())
        .attr("resultMap", table.result_map_ref())
        .attr("parameterType", table.domain_type().to_string())
        .text("select")
        .child(select_all(table))
        .text(format!("from {}", table.name()))
}

/// Select by a list of single-column key values.
///
/// Returns `None` if the operation does not carry exactly one key column.
#[must_use]
pub fn list_by_keys(op: &DerivedOperation, table: &Table) -> Option<XmlElement> {
    let key = op.single_key()?;
    Some(
        XmlElement::new("select")
            .attr("id", op.method_name())
            .attr("resultMap", table.result_map_ref())
            .text("select")
            .child(select_all(table))
            .text(format!("from {}", table.name()))
            .text(format!("where {} in (", key.actual_name()))
            .child(list_foreach().text("#{item}"))
            .text(")"),
    )
}

/// Build the statement of every operation, in the order given
#[must_use]
pub fn synthesize(
    table: &Table,
    operations: &[DerivedOperation],
    config: &GeneratorConfig,
) -> Vec<XmlElement> {
    operations
        .iter()
        .filter_map(|op| match op.kind() {
            OperationKind::BatchInsert => Some(batch_insert(op, table, config.chunk_layout)),
            OperationKind::Upsert => Some(upsert(op, table, config)),
            OperationKind::FilteredList => Some(filtered_list(op, table)),
            OperationKind::ListByKeys => list_by_keys(op, table),
        })
        .collect()
}
