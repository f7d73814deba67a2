//! # Interface Contract Builder
//!
//! A [`MethodContract`] is a name plus a shared [`Signature`]. The mapper
//! interface, the service method and the controller handler for one operation
//! all hold the same `Arc<Signature>`; a layer can rename a method but never
//! re-derive its parameters or return type.
//!
//! | Operation | Parameter | Return |
//! |---|---|---|
//! | `batchInsert` | `List<D> list` | `int` |
//! | `insertOrUpdate` | `D record` | `int` |
//! | `list{D}` | `D req` | `List<D>` |
//! | `listByPrimaryKey` | `List<K> ids` | `List<D>` |

use crate::java::{JavaMethod, JavaParameter, JavaType};
use crate::operations::{
    DerivedOperation, OperationKind, OperationSet, PrimitiveKind, PrimitiveOperation,
};
use crate::schema::Table;
use serde::Serialize;
use std::sync::Arc;

/// What a parameter carries; controllers bind parameters by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterRole {
    /// One domain object to write
    Record,
    /// Several domain objects to write
    RecordList,
    /// Domain object whose fields act as filter values
    Filter,
    /// Scalar value of a single-column primary key
    Key,
    /// Domain object carrying the fields of a composite primary key
    CompositeKey,
    /// Values of a single-column primary key
    KeyList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub java_type: JavaType,
    pub name: String,
    pub role: ParameterRole,
}

impl Parameter {
    fn new(java_type: JavaType, name: &str, role: ParameterRole) -> Self {
        Self {
            java_type,
            name: name.to_string(),
            role,
        }
    }
}

/// Ordered parameters and return type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_type: JavaType,
}

impl Signature {
    /// Parameter names joined for a call site, `a, b`
    #[must_use]
    pub fn argument_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Every type referenced by the signature
    pub fn types(&self) -> impl Iterator<Item = &JavaType> {
        self.parameters
            .iter()
            .map(|p| &p.java_type)
            .chain(std::iter::once(&self.return_type))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodContract {
    pub name: String,
    pub signature: Arc<Signature>,
}

impl MethodContract {
    fn new(name: impl Into<String>, parameters: Vec<Parameter>, return_type: JavaType) -> Self {
        Self {
            name: name.into(),
            signature: Arc::new(Signature {
                parameters,
                return_type,
            }),
        }
    }

    /// Same signature under another name
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: Arc::clone(&self.signature),
        }
    }

    /// True if both contracts hold the very same signature
    #[must_use]
    pub fn shares_signature(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.signature, &other.signature)
    }

    /// Interface method declaration: no annotations, no body
    #[must_use]
    pub fn declaration(&self) -> JavaMethod {
        JavaMethod {
            name: self.name.clone(),
            parameters: self
                .signature
                .parameters
                .iter()
                .map(|p| JavaParameter {
                    java_type: p.java_type.clone(),
                    name: p.name.clone(),
                    annotations: Vec::new(),
                })
                .collect(),
            return_type: Some(self.signature.return_type.clone()),
            annotations: Vec::new(),
            body: Vec::new(),
        }
    }
}

fn domain_list(table: &Table) -> JavaType {
    JavaType::list_of(table.domain_type().clone())
}

/// Build the contract of a derived operation.
///
/// Returns `None` for a `ListByKeys` operation that does not carry exactly
/// one key column.
#[must_use]
pub fn build_contract(op: &DerivedOperation, table: &Table) -> Option<MethodContract> {
    let domain = table.domain_type().clone();
    let contract = match op.kind() {
        OperationKind::BatchInsert => MethodContract::new(
            op.method_name(),
            vec![Parameter::new(domain_list(table), "list", ParameterRole::RecordList)],
            JavaType::int(),
        ),
        OperationKind::Upsert => MethodContract::new(
            op.method_name(),
            vec![Parameter::new(domain, "record", ParameterRole::Record)],
            JavaType::int(),
        ),
        OperationKind::FilteredList => MethodContract::new(
            op.method_name(),
            vec![Parameter::new(domain, "req", ParameterRole::Filter)],
            domain_list(table),
        ),
        OperationKind::ListByKeys => {
            let key = op.single_key()?;
            MethodContract::new(
                op.method_name(),
                vec![Parameter::new(
                    JavaType::list_of(key.java_type().boxed()),
                    "ids",
                    ParameterRole::KeyList,
                )],
                domain_list(table),
            )
        }
    };
    Some(contract)
}

fn key_parameter(op: &PrimitiveOperation, table: &Table) -> Parameter {
    match op.key_columns() {
        [key] => Parameter::new(key.java_type().clone(), "id", ParameterRole::Key),
        _ => Parameter::new(
            table.domain_type().clone(),
            "key",
            ParameterRole::CompositeKey,
        ),
    }
}

/// Build the contract of a primitive operation the host generates
#[must_use]
pub fn primitive_contract(op: &PrimitiveOperation, table: &Table) -> MethodContract {
    let domain = table.domain_type().clone();
    let record = || Parameter::new(domain.clone(), "record", ParameterRole::Record);
    match op.kind() {
        PrimitiveKind::Insert | PrimitiveKind::UpdateByPrimaryKey => {
            MethodContract::new(op.method_name(), vec![record()], JavaType::int())
        }
        PrimitiveKind::DeleteByPrimaryKey => MethodContract::new(
            op.method_name(),
            vec![key_parameter(op, table)],
            JavaType::int(),
        ),
        PrimitiveKind::SelectByPrimaryKey => MethodContract::new(
            op.method_name(),
            vec![key_parameter(op, table)],
            domain.clone(),
        ),
    }
}

/// A method of the persistence interface, by origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MapperMethod {
    Primitive(PrimitiveKind),
    Derived(OperationKind),
}

/// Every persistence contract of one table, built once and looked up by the
/// service emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceContracts {
    entries: Vec<(MapperMethod, MethodContract)>,
}

impl PersistenceContracts {
    #[must_use]
    pub fn build(table: &Table, operations: &OperationSet) -> Self {
        let primitives = operations.primitives.iter().map(|op| {
            (
                MapperMethod::Primitive(op.kind()),
                primitive_contract(op, table),
            )
        });
        let derived = operations.derived.iter().filter_map(|op| {
            build_contract(op, table).map(|contract| (MapperMethod::Derived(op.kind()), contract))
        });
        Self {
            entries: primitives.chain(derived).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, method: MapperMethod) -> Option<&MethodContract> {
        self.entries
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, contract)| contract)
    }

    /// Contracts of the derived operations, in statement order
    pub fn derived(&self) -> impl Iterator<Item = &MethodContract> {
        self.entries.iter().filter_map(|(m, c)| match m {
            MapperMethod::Derived(_) => Some(c),
            MapperMethod::Primitive(_) => None,
        })
    }

    pub fn primitives(&self) -> impl Iterator<Item = &MethodContract> {
        self.entries.iter().filter_map(|(m, c)| match m {
            MapperMethod::Primitive(_) => Some(c),
            MapperMethod::Derived(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::Naming;
    use crate::schema::Column;

    fn ty(name: &str) -> JavaType {
        JavaType::parse(name).unwrap()
    }

    fn table(keys: &[&str]) -> Table {
        let columns = vec![
            Column::new("id", ty("long"), "BIGINT"),
            Column::new("code", ty("java.lang.String"), "VARCHAR"),
            Column::new("name", ty("java.lang.String"), "VARCHAR"),
        ];
        Table::new("user", ty("com.example.model.User"), ty("com.example.mapper.UserMapper"), columns, keys)
            .unwrap()
    }

    fn contracts(keys: &[&str]) -> PersistenceContracts {
        let table = table(keys);
        let ops = OperationSet::derive(&table, &Naming::new("User"));
        PersistenceContracts::build(&table, &ops)
    }

    #[test]
    fn test_derived_contract_shapes() {
        let contracts = contracts(&["id"]);
        let shapes: Vec<String> = contracts
            .derived()
            .map(|c| {
                let params: Vec<String> = c
                    .signature
                    .parameters
                    .iter()
                    .map(|p| format!("{} {}", p.java_type.short_name(), p.name))
                    .collect();
                format!("{} {}({})", c.signature.return_type.short_name(), c.name, params.join(", "))
            })
            .collect();
        assert_eq!(
            shapes,
            vec![
                "int batchInsert(List<User> list)",
                "int insertOrUpdate(User record)",
                "List<User> listUser(User req)",
                "List<User> listByPrimaryKey(List<Long> ids)",
            ]
        );
    }

    #[test]
    fn test_list_by_keys_takes_boxed_single_key() {
        let table = table(&["id"]);
        let ops = OperationSet::derive(&table, &Naming::new("User"));
        let list = ops
            .derived
            .iter()
            .find(|op| op.kind() == OperationKind::ListByKeys)
            .and_then(|op| build_contract(op, &table))
            .unwrap();
        let ids = &list.signature.parameters[0];
        assert_eq!(ids.java_type.to_string(), "java.util.List<java.lang.Long>");
        assert_eq!(ids.role, ParameterRole::KeyList);

        let contracts = PersistenceContracts::build(&table, &ops);
        assert_eq!(contracts.derived().count(), ops.derived.len());
    }

    #[test]
    fn test_primitive_key_parameters() {
        let single = contracts(&["id"]);
        let delete = single
            .get(MapperMethod::Primitive(PrimitiveKind::DeleteByPrimaryKey))
            .unwrap();
        assert_eq!(delete.signature.parameters[0].name, "id");
        assert_eq!(delete.signature.parameters[0].role, ParameterRole::Key);
        assert_eq!(delete.signature.parameters[0].java_type.short_name(), "long");

        let composite = contracts(&["id", "code"]);
        let select = composite
            .get(MapperMethod::Primitive(PrimitiveKind::SelectByPrimaryKey))
            .unwrap();
        assert_eq!(select.signature.parameters[0].name, "key");
        assert_eq!(select.signature.parameters[0].role, ParameterRole::CompositeKey);
        assert_eq!(select.signature.return_type.short_name(), "User");
    }

    #[test]
    fn test_renamed_shares_signature() {
        let contracts = contracts(&["id"]);
        let list = contracts
            .get(MapperMethod::Derived(OperationKind::ListByKeys))
            .unwrap();
        let renamed = list.renamed("listByIds");
        assert!(renamed.shares_signature(list));
        assert_eq!(renamed.name, "listByIds");
        assert_eq!(renamed.signature.argument_list(), "ids");
    }

    #[test]
    fn test_keyless_contracts() {
        let contracts = contracts(&[]);
        assert_eq!(contracts.primitives().count(), 1);
        assert_eq!(contracts.derived().count(), 2);
        assert!(contracts
            .get(MapperMethod::Derived(OperationKind::Upsert))
            .is_none());
    }

    #[test]
    fn test_declaration_has_no_body() {
        let contracts = contracts(&["id"]);
        let batch = contracts
            .get(MapperMethod::Derived(OperationKind::BatchInsert))
            .unwrap()
            .declaration();
        assert!(batch.body.is_empty());
        assert_eq!(batch.return_type, Some(JavaType::int()));
    }
}
