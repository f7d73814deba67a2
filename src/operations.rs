//! # Operation Set Deriver
//!
//! Decides, per table, which persistence operations exist. Gates fail open:
//! a table without a primary key or with a composite one loses capabilities,
//! it never raises an error.
//!
//! | Operation | Gate |
//! |---|---|
//! | `batchInsert` | always |
//! | `insertOrUpdate` | primary key count ≥ 1 |
//! | `list{D}` | always |
//! | `listByPrimaryKey` | primary key count == 1 |
//!
//! The primitive operations the host normally generates are gated here too,
//! so that layers delegating to them disappear along with them.

use crate::naming::{self, Naming};
use crate::schema::{Column, Table};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    BatchInsert,
    Upsert,
    FilteredList,
    ListByKeys,
}

/// A derived operation whose gate already passed.
///
/// One instance per table per pass. The SQL synthesizer and the contract
/// builder both read it, so the statement and the method signature cannot
/// disagree about names or key columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedOperation {
    kind: OperationKind,
    method_name: String,
    key_columns: Vec<Column>,
}

impl DerivedOperation {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Method name on the mapper interface; also the statement id in the SQL map
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Primary-key columns captured when the gate was evaluated
    #[must_use]
    pub fn key_columns(&self) -> &[Column] {
        &self.key_columns
    }

    /// The single key column of `ListByKeys`
    #[must_use]
    pub fn single_key(&self) -> Option<&Column> {
        match self.key_columns.as_slice() {
            [key] => Some(key),
            _ => None,
        }
    }
}

/// Derive the operations that apply to `table`, in statement order:
/// batch insert, upsert, filtered list, list by keys.
#[must_use]
pub fn derive_operations(table: &Table, naming: &Naming) -> Vec<DerivedOperation> {
    let keys = table.primary_key_columns();
    let mut operations = Vec::with_capacity(4);

    operations.push(DerivedOperation {
        kind: OperationKind::BatchInsert,
        method_name: naming::BATCH_INSERT.to_string(),
        key_columns: Vec::new(),
    });

    if keys.is_empty() {
        tracing::debug!(table = table.name(), "no primary key, skipping insertOrUpdate");
    } else {
        operations.push(DerivedOperation {
            kind: OperationKind::Upsert,
            method_name: naming::INSERT_OR_UPDATE.to_string(),
            key_columns: keys.to_vec(),
        });
    }

    operations.push(DerivedOperation {
        kind: OperationKind::FilteredList,
        method_name: naming.list_method(),
        key_columns: Vec::new(),
    });

    if keys.len() == 1 {
        operations.push(DerivedOperation {
            kind: OperationKind::ListByKeys,
            method_name: naming::LIST_BY_PRIMARY_KEY.to_string(),
            key_columns: keys.to_vec(),
        });
    } else {
        tracing::debug!(
            table = table.name(),
            key_count = keys.len(),
            "primary key is not a single column, skipping listByPrimaryKey"
        );
    }

    operations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveKind {
    Insert,
    DeleteByPrimaryKey,
    UpdateByPrimaryKey,
    SelectByPrimaryKey,
}

impl PrimitiveKind {
    #[must_use]
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Insert => naming::INSERT,
            Self::DeleteByPrimaryKey => naming::DELETE_BY_PRIMARY_KEY,
            Self::UpdateByPrimaryKey => naming::UPDATE_BY_PRIMARY_KEY,
            Self::SelectByPrimaryKey => naming::SELECT_BY_PRIMARY_KEY,
        }
    }
}

/// A primitive persistence operation present on the host-generated mapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimitiveOperation {
    kind: PrimitiveKind,
    key_columns: Vec<Column>,
}

impl PrimitiveOperation {
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[must_use]
    pub fn method_name(&self) -> &'static str {
        self.kind.method_name()
    }

    #[must_use]
    pub fn key_columns(&self) -> &[Column] {
        &self.key_columns
    }
}

/// Primitive operations present for `table`.
///
/// Key-addressed operations need a primary key; `updateByPrimaryKey` also needs
/// at least one column to set.
#[must_use]
pub fn primitive_operations(table: &Table) -> Vec<PrimitiveOperation> {
    let keys = table.primary_key_columns();
    let mut primitives = vec![PrimitiveOperation {
        kind: PrimitiveKind::Insert,
        key_columns: Vec::new(),
    }];
    if keys.is_empty() {
        return primitives;
    }

    primitives.push(PrimitiveOperation {
        kind: PrimitiveKind::DeleteByPrimaryKey,
        key_columns: keys.to_vec(),
    });
    if table.non_key_columns().next().is_some() {
        primitives.push(PrimitiveOperation {
            kind: PrimitiveKind::UpdateByPrimaryKey,
            key_columns: keys.to_vec(),
        });
    }
    primitives.push(PrimitiveOperation {
        kind: PrimitiveKind::SelectByPrimaryKey,
        key_columns: keys.to_vec(),
    });
    primitives
}

/// Both operation families of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSet {
    pub primitives: Vec<PrimitiveOperation>,
    pub derived: Vec<DerivedOperation>,
}

impl OperationSet {
    #[must_use]
    pub fn derive(table: &Table, naming: &Naming) -> Self {
        Self {
            primitives: primitive_operations(table),
            derived: derive_operations(table, naming),
        }
    }

    #[must_use]
    pub fn derived_kinds(&self) -> Vec<OperationKind> {
        self.derived.iter().map(DerivedOperation::kind).collect()
    }

    #[must_use]
    pub fn has(&self, kind: OperationKind) -> bool {
        self.derived.iter().any(|op| op.kind == kind)
    }

    #[must_use]
    pub fn has_primitive(&self, kind: PrimitiveKind) -> bool {
        self.primitives.iter().any(|op| op.kind == kind)
    }
}
