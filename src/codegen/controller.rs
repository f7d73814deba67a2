//! Controller emitter
//!
//! One request handler per service method, mapped to
//! `/{lowerCamel(D)}/{action}`. Handlers keep the service method's contract
//! and wrap its return value in the configured response envelope.

use super::service::{AUTOWIRED_ANNOTATION, ServiceAction, ServiceClass};
use crate::config::GeneratorConfig;
use crate::contract::{MethodContract, Parameter, ParameterRole};
use crate::java::{ClassKind, JavaClass, JavaField, JavaMethod, JavaParameter, JavaType};
use crate::naming::Naming;
use serde::Serialize;

const WEB_ANNOTATIONS: &str = "org.springframework.web.bind.annotation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn mapping(self) -> &'static str {
        match self {
            Self::Get => "GetMapping",
            Self::Post => "PostMapping",
        }
    }
}

/// How a request supplies a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Binding {
    /// Deserialized from the request body
    Body,
    /// Query or form parameter of the given name
    Param(String),
    /// Bound field by field without an annotation
    ModelAttribute,
}

impl Binding {
    #[must_use]
    pub fn for_parameter(parameter: &Parameter) -> Self {
        match parameter.role {
            ParameterRole::Record
            | ParameterRole::RecordList
            | ParameterRole::Filter
            | ParameterRole::KeyList => Self::Body,
            ParameterRole::Key => Self::Param(parameter.name.clone()),
            ParameterRole::CompositeKey => Self::ModelAttribute,
        }
    }

    fn annotation(&self) -> Option<String> {
        match self {
            Self::Body => Some("@RequestBody".to_string()),
            Self::Param(name) => Some(format!("@RequestParam(\"{name}\")")),
            Self::ModelAttribute => None,
        }
    }

    fn annotation_type(&self) -> Option<&'static str> {
        match self {
            Self::Body => Some("RequestBody"),
            Self::Param(_) => Some("RequestParam"),
            Self::ModelAttribute => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handler {
    pub action: ServiceAction,
    /// The service method's contract, signature shared
    pub contract: MethodContract,
    pub http_method: HttpMethod,
    pub path: String,
    /// Envelope around the boxed service return type
    pub return_type: JavaType,
}

impl Handler {
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        self.contract
            .signature
            .parameters
            .iter()
            .map(Binding::for_parameter)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerClass {
    pub java_type: JavaType,
    pub service_type: JavaType,
    pub service_field: String,
    pub response_type: JavaType,
    pub handlers: Vec<Handler>,
}

impl ControllerClass {
    #[must_use]
    pub fn handler(&self, action: ServiceAction) -> Option<&Handler> {
        self.handlers.iter().find(|h| h.action == action)
    }

    #[must_use]
    pub fn to_java(&self) -> JavaClass {
        let mut class = JavaClass::new(self.java_type.clone(), ClassKind::Class);
        class.import_name(&format!("{WEB_ANNOTATIONS}.RestController"));
        class.import_name(AUTOWIRED_ANNOTATION);
        class.annotations.push("@RestController".to_string());
        class.import_type(&self.service_type);
        class.fields.push(JavaField {
            java_type: self.service_type.clone(),
            name: self.service_field.clone(),
            annotations: vec!["@Autowired".to_string()],
        });

        let envelope = self.response_type.short_name_without_arguments();
        for handler in &self.handlers {
            class.import_name(&format!("{WEB_ANNOTATIONS}.{}", handler.http_method.mapping()));
            class.import_type(&handler.return_type);

            let mut parameters = Vec::new();
            for (parameter, binding) in handler
                .contract
                .signature
                .parameters
                .iter()
                .zip(handler.bindings())
            {
                class.import_type(&parameter.java_type);
                if let Some(annotation_type) = binding.annotation_type() {
                    class.import_name(&format!("{WEB_ANNOTATIONS}.{annotation_type}"));
                }
                parameters.push(JavaParameter {
                    java_type: parameter.java_type.clone(),
                    name: parameter.name.clone(),
                    annotations: binding.annotation().into_iter().collect(),
                });
            }

            class.methods.push(JavaMethod {
                name: handler.contract.name.clone(),
                parameters,
                return_type: Some(handler.return_type.clone()),
                annotations: vec![format!(
                    "@{}(value = \"{}\")",
                    handler.http_method.mapping(),
                    handler.path
                )],
                body: vec![format!(
                    "return new {envelope}<>({}.{}({}));",
                    self.service_field,
                    handler.contract.name,
                    handler.contract.signature.argument_list()
                )],
            });
        }
        class
    }
}

/// Build the controller fronting `service`. Only service methods that exist
/// get a handler.
#[must_use]
pub fn emit_controller(
    service: &ServiceClass,
    naming: &Naming,
    config: &GeneratorConfig,
) -> ControllerClass {
    let handlers = service
        .methods
        .iter()
        .map(|method| {
            let contract = method.contract.clone();
            let has_body = contract
                .signature
                .parameters
                .iter()
                .any(|p| Binding::for_parameter(p) == Binding::Body);
            let http_method = if method.action.is_read_only() && !has_body {
                HttpMethod::Get
            } else {
                HttpMethod::Post
            };
            let return_type = config
                .response_type
                .with_arguments(vec![contract.signature.return_type.boxed()]);
            Handler {
                action: method.action,
                http_method,
                path: naming.url_path(method.action.path_segment()),
                return_type,
                contract,
            }
        })
        .collect();

    ControllerClass {
        java_type: JavaType::in_package(&config.controller_package, &naming.controller_type_name()),
        service_type: service.java_type.clone(),
        service_field: naming.service_field(),
        response_type: config.response_type.clone(),
        handlers,
    }
}
