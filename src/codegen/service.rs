//! Service emitter
//!
//! One pass-through method per action whose persistence delegate exists. A
//! method is the delegate's contract under the service name; the body calls
//! the injected mapper field and returns its result.

use crate::config::GeneratorConfig;
use crate::contract::{MapperMethod, MethodContract, PersistenceContracts};
use crate::java::{ClassKind, JavaClass, JavaField, JavaMethod, JavaParameter, JavaType};
use crate::naming::{self, Naming};
use crate::operations::{OperationKind, PrimitiveKind};
use crate::schema::Table;
use serde::Serialize;

const SERVICE_ANNOTATION: &str = "org.springframework.stereotype.Service";
pub(crate) const AUTOWIRED_ANNOTATION: &str =
    "org.springframework.beans.factory.annotation.Autowired";

/// Service-level actions, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceAction {
    Add,
    Delete,
    Update,
    Get,
    ListByIds,
    List,
}

impl ServiceAction {
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Delete,
        Self::Update,
        Self::Get,
        Self::ListByIds,
        Self::List,
    ];

    /// Persistence method this action delegates to
    #[must_use]
    pub fn delegate(self) -> MapperMethod {
        match self {
            Self::Add => MapperMethod::Primitive(PrimitiveKind::Insert),
            Self::Delete => MapperMethod::Primitive(PrimitiveKind::DeleteByPrimaryKey),
            Self::Update => MapperMethod::Primitive(PrimitiveKind::UpdateByPrimaryKey),
            Self::Get => MapperMethod::Primitive(PrimitiveKind::SelectByPrimaryKey),
            Self::ListByIds => MapperMethod::Derived(OperationKind::ListByKeys),
            Self::List => MapperMethod::Derived(OperationKind::FilteredList),
        }
    }

    #[must_use]
    pub fn method_name(self, naming: &Naming) -> String {
        match self {
            Self::Add => naming.add_method(),
            Self::Delete => naming.delete_method(),
            Self::Update => naming.update_method(),
            Self::Get => naming.get_method(),
            Self::ListByIds => naming::LIST_BY_IDS.to_string(),
            Self::List => naming.list_method(),
        }
    }

    /// Last URL path segment
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Get => "get",
            Self::ListByIds => "listByIds",
            Self::List => "list",
        }
    }

    #[must_use]
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Get | Self::ListByIds | Self::List)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMethod {
    pub action: ServiceAction,
    /// Service-named contract sharing the delegate's signature
    pub contract: MethodContract,
    pub delegate: MethodContract,
}

impl ServiceMethod {
    fn body(&self, mapper_field: &str) -> String {
        format!(
            "return {mapper_field}.{}({});",
            self.delegate.name,
            self.delegate.signature.argument_list()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceClass {
    pub java_type: JavaType,
    pub mapper_type: JavaType,
    pub mapper_field: String,
    pub methods: Vec<ServiceMethod>,
}

impl ServiceClass {
    #[must_use]
    pub fn method(&self, action: ServiceAction) -> Option<&ServiceMethod> {
        self.methods.iter().find(|m| m.action == action)
    }

    #[must_use]
    pub fn to_java(&self) -> JavaClass {
        let mut class = JavaClass::new(self.java_type.clone(), ClassKind::Class);
        class.import_name(SERVICE_ANNOTATION);
        class.import_name(AUTOWIRED_ANNOTATION);
        class.annotations.push("@Service".to_string());
        class.import_type(&self.mapper_type);
        class.fields.push(JavaField {
            java_type: self.mapper_type.clone(),
            name: self.mapper_field.clone(),
            annotations: vec!["@Autowired".to_string()],
        });

        for method in &self.methods {
            let signature = &method.contract.signature;
            for java_type in signature.types() {
                class.import_type(java_type);
            }
            class.methods.push(JavaMethod {
                name: method.contract.name.clone(),
                parameters: signature
                    .parameters
                    .iter()
                    .map(|p| JavaParameter {
                        java_type: p.java_type.clone(),
                        name: p.name.clone(),
                        annotations: Vec::new(),
                    })
                    .collect(),
                return_type: Some(signature.return_type.clone()),
                annotations: Vec::new(),
                body: vec![method.body(&self.mapper_field)],
            });
        }
        class
    }
}

/// Build the service of `table`; actions whose delegate is absent are omitted
#[must_use]
pub fn emit_service(
    table: &Table,
    naming: &Naming,
    contracts: &PersistenceContracts,
    config: &GeneratorConfig,
) -> ServiceClass {
    let methods = ServiceAction::ALL
        .iter()
        .filter_map(|&action| {
            let Some(delegate) = contracts.get(action.delegate()) else {
                tracing::debug!(
                    table = table.name(),
                    action = ?action,
                    "delegate absent, omitting service method"
                );
                return None;
            };
            Some(ServiceMethod {
                action,
                contract: delegate.renamed(action.method_name(naming)),
                delegate: delegate.clone(),
            })
        })
        .collect();

    let mapper_type = table.mapper_type().clone();
    ServiceClass {
        java_type: JavaType::in_package(&config.service_package, &naming.service_type_name()),
        mapper_field: naming::mapper_field(mapper_type.short_name_without_arguments()),
        mapper_type,
        methods,
    }
}
